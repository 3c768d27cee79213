//! INI file configuration adapter.
//!
//! Serves the sections [`Settings`](crate::domain::settings::Settings) reads:
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
//! dir = strategies
//! ```
//!
//! Booleans accept `true/yes/on/1` and `false/no/off/0`; anything else falls
//! back to the caller's default.

use crate::domain::error::PricebookError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    /// Load an INI file. Unreadable or malformed files are `ConfigParse`
    /// errors naming the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PricebookError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| PricebookError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, PricebookError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| PricebookError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}
