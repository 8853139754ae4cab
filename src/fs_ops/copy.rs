//! Safe copy-and-rename helper:
//! - Copies to a hidden temp file next to the destination
//! - Applies the source's timestamps/permissions to the temp file
//! - Atomically renames temp -> dest, replacing any existing file of that name
//!
//! Readers of the destination see either the old file or the complete new one,
//! never a partially written copy.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;
use tracing::trace;

use super::atomic::commit_over;
use super::helpers::io_error_with_help;
use super::{io_copy, metadata, util};

/// Copy `src` to `dest` (whose parent directory must already exist), carrying
/// over timestamps and permission bits. Returns the number of bytes copied.
pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    // Stat before copying so timestamps reflect the bytes we read.
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source file", src))?;

    let tmp_path = util::unique_temp_path(dest_dir);

    let result = (|| -> Result<u64> {
        let bytes = io_copy::copy_streaming(src, &tmp_path)
            .map_err(io_error_with_help("copy to temporary file", &tmp_path))?;
        metadata::preserve_xattrs(src, &tmp_path)?;
        metadata::preserve_metadata(&tmp_path, &src_meta)?;
        commit_over(&tmp_path, dest)?;
        Ok(bytes)
    })();

    if result.is_err() {
        // Best-effort cleanup; the temp file may never have been created.
        let _ = fs::remove_file(&tmp_path);
    } else {
        trace!(src = %src.display(), dest = %dest.display(), "copy committed");
    }
    result
}
