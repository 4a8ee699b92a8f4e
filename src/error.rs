//! Error types for the playground

use std::path::PathBuf;
use thiserror::Error;

/// Result type for playground operations
pub type PlaygroundResult<T> = Result<T, PlaygroundError>;

#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Cannot determine config directory")]
    NoConfigDir,

    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlaygroundError {
    pub fn config(message: impl Into<String>) -> Self {
        PlaygroundError::Config {
            message: message.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        PlaygroundError::Terminal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PlaygroundError::config("delay too long").to_string(),
            "Configuration error: delay too long"
        );
        assert_eq!(
            PlaygroundError::terminal("not a tty").to_string(),
            "Terminal error: not a tty"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let err: PlaygroundError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, PlaygroundError::ConfigParse(_)));
    }
}
