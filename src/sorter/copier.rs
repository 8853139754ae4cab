//! Per-file classify-and-copy step.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::walker::FileItem;
use crate::fs_ops::{io_error_with_help, safe_copy_and_rename};

/// Copies files into `<destination>/<bucket>/<file name>`.
#[derive(Debug, Clone)]
pub struct Copier {
    destination: PathBuf,
}

impl Copier {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Destination root this copier writes under.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Where `item` would be copied to.
    pub fn target_for(&self, item: &FileItem) -> Result<PathBuf> {
        let (Some(name), Some(bucket)) = (item.file_name(), item.bucket()) else {
            return Err(anyhow!("Source file missing a file name: {}", item.path.display()));
        };
        Ok(self.destination.join(bucket).join(name))
    }

    /// Copy one file into its bucket, creating the bucket if needed.
    ///
    /// A file of the same name already in the bucket is replaced. Bucket
    /// creation tolerates concurrent creators of the same directory.
    pub fn copy(&self, item: &FileItem) -> Result<PathBuf> {
        let dest = self.target_for(item)?;
        let bucket = dest
            .parent()
            .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

        fs::create_dir_all(bucket).map_err(io_error_with_help("create bucket directory", bucket))?;
        let bytes = safe_copy_and_rename(&item.path, &dest)?;
        debug!(src = %item.path.display(), dest = %dest.display(), bytes, "copied");
        Ok(dest)
    }
}
