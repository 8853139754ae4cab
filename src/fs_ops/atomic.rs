//! Commit step of a copy: move a finished temp file over its destination name.

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::helpers::io_error_with_help;

/// Rename `tmp` onto `dest`, replacing whatever file currently holds that name.
///
/// When several copies race for one name, each commit wins in turn and the
/// last rename is the file that remains.
pub(super) fn commit_over(tmp: &Path, dest: &Path) -> Result<()> {
    #[cfg(windows)]
    clear_existing(dest)?;

    fs::rename(tmp, dest).map_err(io_error_with_help("replace destination file", dest))?;

    #[cfg(unix)]
    if let Some(bucket) = dest.parent() {
        // The copy already succeeded; a failed directory sync is not an error.
        let _ = super::util::fsync_dir(bucket);
    }
    Ok(())
}

/// Windows will not rename onto an existing file, nor delete a read-only one.
#[cfg(windows)]
fn clear_existing(dest: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(dest) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(io_error_with_help("stat destination file", dest)(e)),
    };
    let mut perms = meta.permissions();
    if perms.readonly() {
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        let _ = fs::set_permissions(dest, perms);
    }
    match fs::remove_file(dest) {
        // Another worker may have committed and we raced its removal.
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            Err(io_error_with_help("remove existing destination file", dest)(e))
        }
        _ => Ok(()),
    }
}
