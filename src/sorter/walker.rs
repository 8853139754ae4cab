//! Recursive tree walker yielding regular files.
//!
//! Symlinks are followed (both to files and to directories). walkdir tracks
//! the ancestors of each followed link, so a cycle surfaces as an error item
//! rather than endless recursion.

use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

use super::bucket::bucket_name;

/// One regular file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    /// Path as reached from the source root.
    pub path: PathBuf,
    /// Depth below the source root (direct children are 1).
    pub depth: usize,
}

impl FileItem {
    /// Base name of the file.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }

    /// Bucket this file belongs in.
    pub fn bucket(&self) -> Option<OsString> {
        self.file_name().map(bucket_name)
    }
}

/// Lazy, single-pass sequence of the regular files under a root.
///
/// Directories are descended into, never yielded; other entry types
/// (sockets, FIFOs, devices) are skipped. Unreadable directories and broken
/// links come out as `Err` items and the walk carries on. Order is whatever the
/// filesystem returns.
pub struct TreeWalker {
    inner: walkdir::IntoIter,
    exclude: Option<PathBuf>,
}

impl TreeWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            inner: WalkDir::new(root).min_depth(1).follow_links(true).into_iter(),
            exclude: None,
        }
    }

    /// Prune the subtree at `dir` (as it would be spelled under the root).
    pub fn excluding(mut self, dir: Option<PathBuf>) -> Self {
        self.exclude = dir;
        self
    }
}

impl Iterator for TreeWalker {
    type Item = Result<FileItem>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) if is_dangling_link(&e) => {
                    trace!(path = ?e.path(), "skipping dangling symlink");
                    continue;
                }
                Err(e) => return Some(Err(e.into())),
            };
            let ft = entry.file_type();
            if ft.is_dir() {
                if self.exclude.as_deref() == Some(entry.path()) {
                    trace!(path = %entry.path().display(), "skipping destination subtree");
                    self.inner.skip_current_dir();
                }
                continue;
            }
            if ft.is_file() {
                return Some(Ok(FileItem {
                    depth: entry.depth(),
                    path: entry.into_path(),
                }));
            }
            trace!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }
}

/// A link whose target is gone is not a regular file; it is skipped like
/// any other non-file entry. Loops and unreadable directories stay errors.
fn is_dangling_link(e: &walkdir::Error) -> bool {
    let target_missing = e
        .io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
    target_missing
        && e.path()
            .and_then(|p| std::fs::symlink_metadata(p).ok())
            .is_some_and(|m| m.file_type().is_symlink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::collections::BTreeSet;

    fn names(walker: TreeWalker) -> BTreeSet<String> {
        walker
            .map(|r| r.unwrap())
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn yields_files_at_every_depth_and_no_dirs() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("top.txt").write_str("1").unwrap();
        temp.child("a/mid.rs").write_str("2").unwrap();
        temp.child("a/b/c/deep").write_str("3").unwrap();
        temp.child("empty/dir").create_dir_all().unwrap();

        let got = names(TreeWalker::new(temp.path()));
        let want: BTreeSet<String> = ["top.txt", "mid.rs", "deep"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn depth_counts_from_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b/f.txt").write_str("x").unwrap();
        let item = TreeWalker::new(temp.path()).next().unwrap().unwrap();
        assert_eq!(item.depth, 3);
        assert_eq!(item.bucket().unwrap(), "txt");
    }

    #[test]
    fn excluded_subtree_is_pruned() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("keep.txt").write_str("k").unwrap();
        temp.child("out/txt/old.txt").write_str("o").unwrap();

        let got = names(TreeWalker::new(temp.path()).excluding(Some(temp.path().join("out"))));
        assert_eq!(got.into_iter().collect::<Vec<_>>(), vec!["keep.txt".to_string()]);
    }

    #[test]
    fn missing_root_yields_one_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut w = TreeWalker::new(&temp.path().join("absent"));
        assert!(w.next().unwrap().is_err());
        assert!(w.next().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_and_survives_cycles() {
        use std::os::unix::fs::symlink;
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("real/inside.md").write_str("x").unwrap();
        temp.child("linked.txt").write_str("y").unwrap();
        symlink(temp.path().join("real"), temp.path().join("alias")).unwrap();
        symlink(temp.path(), temp.path().join("real/loop")).unwrap();

        let results: Vec<_> = TreeWalker::new(temp.path()).collect();
        let files: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        // inside.md is reached through both `real` and `alias`.
        assert_eq!(
            files.iter().filter(|f| f.file_name().unwrap() == "inside.md").count(),
            2
        );
        assert!(files.iter().any(|f| f.file_name().unwrap() == "linked.txt"));
        assert!(results.iter().any(|r| r.is_err()), "loop should be reported");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped_quietly() {
        use std::os::unix::fs::symlink;
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("ok.txt").write_str("ok").unwrap();
        symlink(temp.path().join("nowhere.txt"), temp.path().join("dangling.txt")).unwrap();

        let results: Vec<_> = TreeWalker::new(temp.path()).collect();
        assert_eq!(results.len(), 1, "{results:?}");
        assert_eq!(results[0].as_ref().unwrap().file_name().unwrap(), "ok.txt");
    }
}
