//! Filesystem operations: the metadata-preserving copy used for every file.

mod atomic;
mod copy;
mod helpers;
mod io_copy;
mod metadata;
mod util;

pub use copy::safe_copy_and_rename;
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use metadata::{preserve_metadata, preserve_xattrs};
pub use util::TEMP_PREFIX;
