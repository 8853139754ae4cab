//! XML configuration support.
//! - Loads ambient settings (log level, log file, JSON logs, worker count)
//!   from config.xml via quick_xml + serde.
//! - A missing file is not an error; a malformed one is.
//!
//! Notes:
//! - The source and destination references always come from the command line;
//!   the file cannot change what gets copied.
//! - Unknown XML fields are rejected to surface typos early.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use crate::errors::SortError;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "json_logs", default, deserialize_with = "de_bool_trimmed_opt")]
    json_logs: Option<bool>,
    #[serde(rename = "jobs", default, deserialize_with = "de_usize_trimmed_opt")]
    jobs: Option<usize>,
}

fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("jobs must be a non-negative integer, got '{s}'"))),
    }
}

fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) => match s.as_str() {
            "" => Ok(None),
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("expected a boolean, got '{other}'"))),
        },
    }
}

/// Ambient settings read from the config file. `None` fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlSettings {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub json_logs: Option<bool>,
    pub jobs: Option<usize>,
}

impl XmlSettings {
    /// Overlay the settings that were present onto `cfg`.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if let Some(json) = self.json_logs {
            cfg.json_logs = json;
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs;
        }
    }
}

/// Load settings from the default location (see [`default_config_path`]).
pub fn load_settings() -> Result<Option<XmlSettings>, SortError> {
    match default_config_path() {
        Some(path) => load_settings_from(&path),
        None => Ok(None),
    }
}

/// Load settings from `path`. Returns `Ok(None)` when the file does not exist.
pub fn load_settings_from(path: &Path) -> Result<Option<XmlSettings>, SortError> {
    if !path.exists() {
        debug!("No config file at {}; using defaults", path.display());
        return Ok(None);
    }

    let config_err = |message: String| SortError::Config {
        path: path.to_path_buf(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
    let parsed: XmlConfig = from_xml_str(&content).map_err(|e| config_err(e.to_string()))?;

    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<LogLevel>().map_err(config_err)?),
    };
    let log_file = parsed.log_file.as_deref().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    });

    Ok(Some(XmlSettings {
        log_level,
        log_file,
        json_logs: parsed.json_logs,
        jobs: parsed.jobs,
    }))
}
