//! CLI definition and parsing.
//! Two positional paths; no other flags besides clap's --help/--version.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::Config;

/// Copy every file under SOURCE into DESTINATION/<extension>/.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Sort files by extension into folders.",
    after_help = "Exit status: 0 when the run completes (individual copy failures are \
                  recorded in the error log), 2 when SOURCE is missing or unreadable, \
                  1 when DESTINATION cannot be used or is the same folder as SOURCE."
)]
pub struct Args {
    /// Path to the source folder.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
    pub source: PathBuf,

    /// Path to the destination folder.
    #[arg(value_name = "DESTINATION", value_hint = ValueHint::DirPath)]
    pub destination: PathBuf,
}

impl Args {
    /// Config for these paths with default ambient settings.
    pub fn to_config(&self) -> Config {
        Config::new(&self.source, &self.destination)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
