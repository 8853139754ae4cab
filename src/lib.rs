//! Core library for `file_sorter`.
//!
//! Walks a source tree and copies every regular file into
//! `<destination>/<extension>/<file name>`. The binary is a thin shell around
//! [`sort_tree`]; everything it does is reachable (and testable) from here.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod sorter;

pub use config::{default_config_path, default_log_path, Config, LogLevel};
pub use errors::SortError;
pub use sorter::{
    bucket_name, sort_tree, ConsoleReporter, Copier, FileItem, Reporter, RunSummary, TreeWalker,
    UNKNOWN_BUCKET,
};
