//! The walk → classify → copy pipeline.

mod bucket;
mod copier;
mod pipeline;
mod report;
mod walker;

pub use bucket::{bucket_name, UNKNOWN_BUCKET};
pub use copier::Copier;
pub use pipeline::{sort_tree, RunSummary};
pub use report::{ConsoleReporter, Reporter};
pub use walker::{FileItem, TreeWalker};
