//! Extension → bucket name classification.

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Bucket used for names without a usable extension.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Bucket (sub-folder) name for a file name: the text after the last `.`,
/// case as found. Names with no dot, a trailing dot, or only a leading dot
/// (`.bashrc`) land in [`UNKNOWN_BUCKET`].
pub fn bucket_name(file_name: &OsStr) -> OsString {
    match Path::new(file_name).extension() {
        Some(ext) if !ext.is_empty() => ext.to_os_string(),
        _ => OsString::from(UNKNOWN_BUCKET),
    }
}
