//! I/O error enrichment.
//!
//! Wraps io::Error with the operation, the path, and a short platform-aware
//! hint, for use with `map_err` in both anyhow::Result and io::Result code:
//!
//!   fs::create_dir_all(bucket).map_err(io_error_with_help("create bucket directory", bucket))?;
//!   File::open(p).map_err(io_error_with_help_io("open log file", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::ENOENT => "path not found; it may have been removed during the walk",
        libc::EEXIST | libc::ENOTDIR => "a non-directory is occupying part of the path",
        libc::ENOSPC | libc::EDQUOT => "insufficient space on device",
        libc::EROFS => "read-only filesystem",
        libc::EBUSY => "resource busy; another process may hold the file",
        libc::ELOOP => "too many levels of symbolic links",
        libc::ENAMETOOLONG => "file name or path too long",
        libc::EMFILE | libc::ENFILE => "open file limit reached",
        _ => return None,
    })
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    Some(match code {
        5 => "access denied; check permissions",   // ERROR_ACCESS_DENIED
        2 | 3 => "path not found",                 // ERROR_FILE/PATH_NOT_FOUND
        32 => "sharing violation; file is in use", // ERROR_SHARING_VIOLATION
        112 => "insufficient disk space",          // ERROR_DISK_FULL
        19 => "write-protected media",             // ERROR_WRITE_PROTECT
        206 => "file name or path too long",       // ERROR_FILENAME_EXCED_RANGE
        4 => "too many open files",                // ERROR_TOO_MANY_OPEN_FILES
        _ => return None,
    })
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been removed during the walk"),
        io::ErrorKind::StorageFull => Some("insufficient space on device"),
        _ => None,
    }
}

/// "<op> '<path>': <error> (<hint>) [os code: N]"
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code).or_else(|| kind_hint(e.kind())),
        None => kind_hint(e.kind()),
    };
    if let Some(hint) = hint {
        msg.push_str(&format!(" ({hint})"));
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// `map_err` adapter converting io::Error into an enriched anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// `map_err` adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
