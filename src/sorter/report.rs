//! Outcome reporting, injected into the pipeline.

use std::path::Path;
use tracing::{debug, error};

use crate::output as out;

/// Receives the outcome of every discovered item. Called from copy workers,
/// so implementations must be thread-safe.
pub trait Reporter: Send + Sync {
    /// A file landed at `dest`.
    fn copied(&self, src: &Path, dest: &Path);
    /// Copying `src` under `dest_root` failed; the run continues.
    fn copy_failed(&self, src: &Path, dest_root: &Path, err: &anyhow::Error);
    /// The walk could not read an entry.
    fn walk_failed(&self, err: &anyhow::Error);
}

/// Prints one line per copied file and records failures as ERROR events
/// (which the logging setup routes to the error log file).
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn copied(&self, src: &Path, dest: &Path) {
        out::print_user(&format!("Copied: {} -> {}", src.display(), dest.display()));
        debug!(src = %src.display(), dest = %dest.display(), "copy completed");
    }

    fn copy_failed(&self, src: &Path, dest_root: &Path, err: &anyhow::Error) {
        error!(
            src = %src.display(),
            dest_root = %dest_root.display(),
            "Error copying file {} to {}: {:#}",
            src.display(),
            dest_root.display(),
            err
        );
    }

    fn walk_failed(&self, err: &anyhow::Error) {
        // walkdir errors already spell out their io cause.
        error!("Error reading source tree: {}", err);
    }
}
