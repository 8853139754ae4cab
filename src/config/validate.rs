//! Pre-run checks on the two path references.
//! The source must be a readable directory; the destination root is created if
//! absent. Each fatal condition is logged exactly once, here.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;
use crate::errors::SortError;

impl Config {
    /// Validate the source, then make sure the destination root exists.
    /// The destination is never touched when the source check fails.
    pub fn validate(&self) -> Result<(), SortError> {
        self.check_source()?;
        self.ensure_distinct()?;
        self.ensure_destination()
    }

    /// Source must exist, be a directory, and be listable.
    pub fn check_source(&self) -> Result<(), SortError> {
        let src = &self.source;
        if !src.exists() {
            error!(code = 10u16, path = %src.display(), "Source folder does not exist: {}", src.display());
            return Err(SortError::SourceNotFound(src.clone()));
        }
        if !src.is_dir() {
            error!(code = 11u16, path = %src.display(), "Source is not a directory: {}", src.display());
            return Err(SortError::SourceNotDirectory(src.clone()));
        }
        if let Err(e) = fs::read_dir(src) {
            error!(code = 12u16, path = %src.display(), error = %e, "Cannot read source directory");
            return Err(SortError::SourceUnreadable {
                path: src.clone(),
                source: e,
            });
        }
        debug!("source readable: {}", src.display());
        Ok(())
    }

    /// Create the destination root (and parents) if missing.
    /// Failing to do so stops the run instead of failing every file one by one.
    pub fn ensure_destination(&self) -> Result<(), SortError> {
        let dest = &self.destination;
        if dest.exists() {
            if !dest.is_dir() {
                error!(code = 20u16, path = %dest.display(), "Destination exists but isn't a directory");
                return Err(SortError::DestinationNotDirectory(dest.clone()));
            }
            return Ok(());
        }
        create_root(dest)?;
        info!("Created destination directory: {}", dest.display());
        Ok(())
    }

    /// Sorting a tree into itself would re-walk its own buckets.
    fn ensure_distinct(&self) -> Result<(), SortError> {
        let src_real = fs::canonicalize(&self.source).unwrap_or_else(|_| self.source.clone());
        let dest_real =
            fs::canonicalize(&self.destination).unwrap_or_else(|_| self.destination.clone());
        if src_real == dest_real {
            error!(code = 22u16, path = %src_real.display(), "Source and destination resolve to the same path");
            return Err(SortError::DestinationIsSource(src_real));
        }
        Ok(())
    }
}

fn create_root(dest: &Path) -> Result<(), SortError> {
    fs::create_dir_all(dest).map_err(|e| {
        error!(code = 21u16, path = %dest.display(), error = %e, "Failed to create destination directory");
        SortError::DestinationCreate {
            path: dest.to_path_buf(),
            source: e,
        }
    })
}
