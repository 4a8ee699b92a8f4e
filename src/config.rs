use crate::error::{PlaygroundError, PlaygroundResult};
use crate::keyboard::KeyboardConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest simulated fetch delay accepted from configuration
pub const MAX_FETCH_DELAY_MS: u64 = 60_000;

/// Application configuration persisted as TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub view_model: ViewModelConfig,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

/// View-model tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModelConfig {
    /// Simulated network latency for page fetches
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    /// Fetches still outstanding after this long fail
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Fixed seed for the color picker; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_fetch_delay_ms() -> u64 {
    1000
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

impl Default for ViewModelConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            seed: None,
        }
    }
}

impl ViewModelConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PlaygroundResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PlaygroundError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> PlaygroundResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> PlaygroundResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Get the configuration directory for the application
    pub fn config_dir() -> PlaygroundResult<PathBuf> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config")
        } else {
            return Err(PlaygroundError::NoConfigDir);
        };

        Ok(config_dir.join("mvvm-playground"))
    }

    /// Get the default path for the configuration file
    pub fn default_path() -> PlaygroundResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> PlaygroundResult<()> {
        if self.view_model.fetch_delay_ms > MAX_FETCH_DELAY_MS {
            return Err(PlaygroundError::config(format!(
                "fetch_delay_ms {} exceeds {}",
                self.view_model.fetch_delay_ms, MAX_FETCH_DELAY_MS
            )));
        }

        if self.view_model.fetch_timeout_ms == 0 {
            return Err(PlaygroundError::config("fetch_timeout_ms must be greater than 0"));
        }

        let issues = self.keyboard.validate();
        if !issues.is_empty() {
            return Err(PlaygroundError::config(issues.join("; ")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.view_model.fetch_delay(), Duration::from_secs(1));
        assert_eq!(config.view_model.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.view_model.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [view_model]
            seed = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.view_model.fetch_delay_ms, 1000);
        assert_eq!(config.view_model.seed, Some(5));
        assert_eq!(config.keyboard, KeyboardConfig::default());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.view_model.fetch_delay_ms = 250;
        config.view_model.seed = Some(11);
        config.save_to_file(&path).unwrap();
        assert!(path.exists());

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_long_delay() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[view_model]\nfetch_delay_ms = 120000\n").unwrap();

        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, PlaygroundError::Config { .. }));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.view_model.fetch_timeout_ms = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fetch_timeout_ms"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::load_from_file("/nonexistent/mvvm-playground.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mvvm-playground.toml"));
    }
}
