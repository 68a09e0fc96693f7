use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CONFIG_PATH, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE_NAME,
    ENV_CONFIDENCE_THRESHOLD, ENV_CONFIG_PATH,
};
use crate::error::{CrmError, Result};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    /// Results scoring below this are reported as low confidence; never enforced by `parse`
    pub confidence_threshold: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_LOG_DIRECTORY.to_string(),
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Path from `CRM_CONFIG`, else `config.toml`
    pub fn default_path() -> PathBuf {
        std::env::var(ENV_CONFIG_PATH)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let config_content = fs::read_to_string(path).map_err(|e| {
                CrmError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
            })?;
            Self::from_toml_str(&config_content)?
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(ENV_CONFIDENCE_THRESHOLD) {
            let threshold = raw.trim().parse::<f64>().map_err(|_| {
                CrmError::Config(format!("{} must be a number, got '{}'", ENV_CONFIDENCE_THRESHOLD, raw))
            })?;
            self.parser.confidence_threshold = threshold;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let threshold = self.parser.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CrmError::Config(format!(
                "confidence_threshold must be between 0 and 1, got {}",
                threshold
            )));
        }
        if self.logging.file_name.trim().is_empty() {
            return Err(CrmError::Config("logging.file_name cannot be empty".to_string()));
        }
        Ok(())
    }
}
