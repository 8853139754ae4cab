//! Config module.
//! Provides the run configuration, default paths, XML loading of ambient
//! settings, and the pre-run checks on the source/destination references.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path};
pub use types::{Config, LogLevel};
pub use xml::{load_settings, load_settings_from, XmlSettings};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILE_SORTER_CONFIG";
/// Error log written to the current directory unless configured otherwise.
pub const LOG_FILE_DEFAULT: &str = "file_sorter.log";
