use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::toolkit::Toolkit;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Corresponding `log` crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for the image comparison process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Which external toolkit performs the comparison
    pub toolkit: Toolkit,

    /// Prefix prepended to the toolkit executable name, e.g. "/opt/local/bin/"
    pub app_path: Option<String>,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toolkit: Toolkit::GraphicsMagick,
            app_path: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(app_path) = &self.app_path {
            if app_path.is_empty() {
                return Err(Error::Configuration(
                    "app_path must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Full name of the executable to spawn for the configured toolkit.
    /// The installation prefix is plain string concatenation, not path joining.
    pub fn executable(&self) -> String {
        match &self.app_path {
            Some(prefix) => format!("{}{}", prefix, self.toolkit.binary()),
            None => self.toolkit.binary().to_string(),
        }
    }
}

// -- Tests --
