use file_sorter::{sort_tree, Config, Copier, FileItem, Reporter, RunSummary};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Barrier, Mutex};
use tempfile::tempdir;
use walkdir::WalkDir;

#[derive(Default)]
struct Recorder {
    copied: Mutex<Vec<PathBuf>>,
    failed: Mutex<Vec<PathBuf>>,
}

impl Reporter for Recorder {
    fn copied(&self, _src: &Path, dest: &Path) {
        self.copied.lock().unwrap().push(dest.to_path_buf());
    }
    fn copy_failed(&self, src: &Path, _dest_root: &Path, _err: &anyhow::Error) {
        self.failed.lock().unwrap().push(src.to_path_buf());
    }
    fn walk_failed(&self, _err: &anyhow::Error) {}
}

/// Relative path -> contents for every file under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn sample_tree(src: &Path) {
    for (rel, body) in [
        ("a.txt", "a"),
        ("one/b.PDF", "b"),
        ("one/two/c.rs", "c"),
        ("one/two/three/Makefile", "m"),
        ("x/archive.tar.gz", "gz"),
        ("x/.hidden", "h"),
        ("x/.config.json", "j"),
    ] {
        let p = src.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, body).unwrap();
    }
}

#[test]
fn every_file_lands_in_its_bucket() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    sample_tree(&src);

    let rec = Recorder::default();
    let summary = sort_tree(&Config::new(&src, &dest), &rec).unwrap();
    assert_eq!(summary.files_seen, 7);
    assert_eq!(summary.copied, 7);
    assert_eq!(summary.failed, 0);
    assert_eq!(rec.copied.lock().unwrap().len(), 7);

    let got: Vec<_> = snapshot(&dest).into_keys().collect();
    let want: Vec<PathBuf> = [
        "PDF/b.PDF",
        "gz/archive.tar.gz",
        "json/.config.json",
        "rs/c.rs",
        "txt/a.txt",
        "unknown/.hidden",
        "unknown/Makefile",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(got, want);
}

#[test]
fn source_is_not_modified() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    sample_tree(&src);
    let before = snapshot(&src);
    let mtime_before = fs::metadata(src.join("one/two/c.rs")).unwrap().modified().unwrap();

    sort_tree(&Config::new(&src, td.path().join("dest")), &Recorder::default()).unwrap();

    assert_eq!(snapshot(&src), before);
    let mtime_after = fs::metadata(src.join("one/two/c.rs")).unwrap().modified().unwrap();
    assert_eq!(mtime_before, mtime_after);
}

#[test]
fn rerun_produces_the_same_tree() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    sample_tree(&src);

    sort_tree(&Config::new(&src, &dest), &Recorder::default()).unwrap();
    let first = snapshot(&dest);
    sort_tree(&Config::new(&src, &dest), &Recorder::default()).unwrap();
    assert_eq!(snapshot(&dest), first);

    // No temp files left behind by either run.
    for entry in WalkDir::new(&dest).into_iter().filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy();
        assert!(!name.starts_with(file_sorter::fs_ops::TEMP_PREFIX), "left behind: {name}");
    }
}

#[test]
fn same_basename_same_extension_keeps_exactly_one() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    for dir in ["a", "b", "c"] {
        fs::create_dir_all(src.join(dir)).unwrap();
        fs::write(src.join(dir).join("notes.md"), dir).unwrap();
    }

    let summary = sort_tree(&Config::new(&src, &dest), &Recorder::default()).unwrap();
    assert_eq!(summary.copied, 3);

    let bucket: Vec<_> = fs::read_dir(dest.join("md")).unwrap().collect();
    assert_eq!(bucket.len(), 1);
    let survivor = fs::read_to_string(dest.join("md/notes.md")).unwrap();
    assert!(["a", "b", "c"].contains(&survivor.as_str()), "{survivor}");
}

#[test]
fn many_files_racing_for_one_bucket() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    for d in 0..8 {
        let dir = src.join(format!("d{d}"));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..25 {
            fs::write(dir.join(format!("f{d}_{f}.log")), format!("{d}:{f}")).unwrap();
        }
    }
    let mut cfg = Config::new(&src, &dest);
    cfg.jobs = 16;

    let rec = Recorder::default();
    let summary = sort_tree(&cfg, &rec).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            files_seen: 200,
            copied: 200,
            failed: 0,
            walk_errors: 0
        }
    );
    assert!(rec.failed.lock().unwrap().is_empty());
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 1);
    assert_eq!(fs::read_dir(dest.join("log")).unwrap().count(), 200);
    assert_eq!(fs::read_to_string(dest.join("log/f3_7.log")).unwrap(), "3:7");
}

#[test]
fn concurrent_copiers_create_the_bucket_once() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(&src).unwrap();
    let items: Vec<FileItem> = (0..32)
        .map(|i| {
            let p = src.join(format!("n{i}.bin"));
            fs::write(&p, [i as u8]).unwrap();
            FileItem { path: p, depth: 1 }
        })
        .collect();
    let copier = Copier::new(td.path().join("dest"));
    let barrier = Barrier::new(items.len());

    std::thread::scope(|s| {
        for item in &items {
            let copier = &copier;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                copier.copy(item).expect("copy should tolerate an existing bucket");
            });
        }
    });

    assert_eq!(fs::read_dir(td.path().join("dest/bin")).unwrap().count(), 32);
}

#[test]
fn failure_of_one_file_does_not_stop_the_rest() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("good.csv"), "1,2").unwrap();
    fs::write(src.join("blocked.dat"), "x").unwrap();
    // A regular file squatting on the bucket name makes every .dat copy fail.
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("dat"), "squatter").unwrap();

    let rec = Recorder::default();
    let summary = sort_tree(&Config::new(&src, &dest), &rec).unwrap();
    assert_eq!(summary.copied, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(*rec.failed.lock().unwrap(), vec![src.join("blocked.dat")]);
    assert!(dest.join("csv/good.csv").exists());
}
