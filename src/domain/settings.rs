//! Runtime settings resolved from configuration.
//!
//! ```ini
//! [store]
//! root = data
//! date_format = %Y-%m-%d
//!
//! [lookup]
//! fill = true
//!
//! [strategy]
//! dir = .
//! ```

use crate::domain::error::PricebookError;
use crate::domain::price_lookup::DateFormat;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_STORE_ROOT: &str = "data";
pub const DEFAULT_STRATEGY_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_root: PathBuf,
    pub date_format: DateFormat,
    pub fill: bool,
    pub strategy_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from(DEFAULT_STORE_ROOT),
            date_format: DateFormat::default(),
            fill: true,
            strategy_dir: PathBuf::from(DEFAULT_STRATEGY_DIR),
        }
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PricebookError> {
        let defaults = Self::default();

        let store_root = match config.get_string("store", "root") {
            Some(root) if root.trim().is_empty() => {
                return Err(invalid("store", "root", "root must not be empty"));
            }
            Some(root) => PathBuf::from(root.trim()),
            None => defaults.store_root,
        };

        let date_format = match config.get_string("store", "date_format") {
            Some(pattern) => {
                DateFormat::new(&pattern).map_err(|reason| invalid("store", "date_format", &reason))?
            }
            None => defaults.date_format,
        };

        let strategy_dir = config
            .get_string("strategy", "dir")
            .map(|dir| PathBuf::from(dir.trim()))
            .unwrap_or(defaults.strategy_dir);

        Ok(Self {
            store_root,
            date_format,
            fill: config.get_bool("lookup", "fill", defaults.fill),
            strategy_dir,
        })
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> PricebookError {
    PricebookError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
