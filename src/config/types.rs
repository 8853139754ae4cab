//! Core configuration types.
//! - Config holds the two path references plus ambient settings.
//! - LogLevel represents console verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

/// Console verbosity. The error log file always records ERROR events regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Nothing but copy lines and fatal messages (default)
    #[default]
    Quiet,
    /// Informational output
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one sorting run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree to scan
    pub source: PathBuf,
    /// Root under which extension buckets are created
    pub destination: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Error log file; `None` disables file logging
    pub log_file: Option<PathBuf>,
    /// Emit JSON events instead of plain text
    pub json_logs: bool,
    /// Copy worker threads; 0 lets the pool pick one per CPU
    pub jobs: usize,
}

impl Config {
    /// Construct a Config for the given pair of references; ambient settings use defaults.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            log_level: LogLevel::default(),
            log_file: Some(paths::default_log_path()),
            json_logs: false,
            jobs: 0,
        }
    }
}
