use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config is not valid JSON: {0}")]
    Serde(String),

    #[error("Invalid `{field}` setting: {reason}")]
    Invalid { field: &'static str, reason: String },
}
