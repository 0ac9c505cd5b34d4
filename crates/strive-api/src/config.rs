//! RON configuration for the API server

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Listen address (e.g., "127.0.0.1:8080")
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Database file; unset means an in-memory store
    #[serde(default)]
    pub db_path: Option<String>,
    /// Wipe the store and load the demo fixtures at startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            db_path: None,
            seed_demo_data: false,
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Config {
    /// Load configuration from a RON file.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %path.as_ref().display(),
                    "no config file, using defaults"
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        ron::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
