//! Default path helpers.
//! Determines where the config file is looked up and where errors are logged.

use dirs::config_dir;
use std::env;
use std::path::PathBuf;

use super::{CONFIG_ENV, LOG_FILE_DEFAULT};

/// Config file location:
/// - `$FILE_SORTER_CONFIG` when set (relative paths resolve against the current directory)
/// - otherwise `<config dir>/file_sorter/config.xml`
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        let p = PathBuf::from(explicit);
        if p.is_absolute() {
            return Some(p);
        }
        return Some(env::current_dir().map(|cwd| cwd.join(&p)).unwrap_or(p));
    }
    config_dir().map(|base| base.join("file_sorter").join("config.xml"))
}

/// Default error log: `file_sorter.log` in the current directory.
pub fn default_log_path() -> PathBuf {
    PathBuf::from(LOG_FILE_DEFAULT)
}
