//! Windows implementations of platform helpers.
//!
//! Windows lacks POSIX mode semantics; ACLs are left to the parent directory.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use crate::fs_ops::io_error_with_help_io;

/// Open the log file for appending, creating parent directories as needed.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error_with_help_io("create log directory", parent))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error_with_help_io("open log file", path))
}
