//! Typed error definitions for file_sorter.
//! Covers the run-level failure modes; per-file copy errors stay `anyhow::Error`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Source folder does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("Cannot read source directory {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination exists but isn't a directory: {}", .0.display())]
    DestinationNotDirectory(PathBuf),

    #[error("Failed to create destination directory {}: {source}", path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Source and destination are the same directory. Sorting a tree into
    /// itself would re-walk its own buckets, so the run stops with exit
    /// status 1 instead.
    #[error("Destination must differ from the source; both resolve to {}", .0.display())]
    DestinationIsSource(PathBuf),

    #[error("Failed to build copy worker pool: {0}")]
    WorkerPool(String),

    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl SortError {
    /// Stable numeric code, used as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            SortError::SourceNotFound(_) => 10,
            SortError::SourceNotDirectory(_) => 11,
            SortError::SourceUnreadable { .. } => 12,
            SortError::DestinationNotDirectory(_) => 20,
            SortError::DestinationCreate { .. } => 21,
            SortError::DestinationIsSource(_) => 22,
            SortError::WorkerPool(_) => 30,
            SortError::Config { .. } => 40,
        }
    }

    /// Process exit status for this failure.
    /// A missing or unusable source is reported separately from everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            SortError::SourceNotFound(_)
            | SortError::SourceNotDirectory(_)
            | SortError::SourceUnreadable { .. } => 2,
            _ => 1,
        }
    }
}
