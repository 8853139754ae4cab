#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of the hidden temp files written next to a destination during a copy.
pub const TEMP_PREFIX: &str = ".file_sorter.";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temp name unique within the process even when many copies target one bucket
/// in the same instant: ".file_sorter.<pid>.<nanos>.<seq>.tmp".
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!("{TEMP_PREFIX}{pid}.{nanos}.{seq}.tmp"))
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_paths_are_distinct_and_hidden() {
        let dir = Path::new("/tmp/bucket");
        let a = unique_temp_path(dir);
        let b = unique_temp_path(dir);
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(dir));
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(TEMP_PREFIX) && name.ends_with(".tmp"), "{name}");
    }
}
