#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for dwiz
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/dwiz/config.toml)
//! - Environment variables
//! - CLI flags (applied by the CLI itself)

pub mod sections;

pub use sections::{CatalogConfig, GeneralConfig, MirrorConfig, NetworkConfig, ResolverConfig};

use dwiz_errors::{ConfigError, Error};
use dwiz_types::{ColorChoice, OutputFormat, StableLine};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub mirrors: MirrorConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("dwiz").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!("no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // DWIZ_OUTPUT
        if let Ok(output) = std::env::var("DWIZ_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "DWIZ_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // DWIZ_COLOR
        if let Ok(color) = std::env::var("DWIZ_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "DWIZ_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // DWIZ_API_URL
        if let Ok(url) = std::env::var("DWIZ_API_URL") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: "DWIZ_API_URL".to_string(),
                    value: url,
                }
                .into());
            }
            self.network.api_url = url;
        }

        // DWIZ_STABLE_LINE
        if let Ok(line) = std::env::var("DWIZ_STABLE_LINE") {
            match line.parse::<StableLine>() {
                Ok(parsed) => self.resolver.preferred_core_line = Some(parsed),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: "DWIZ_STABLE_LINE".to_string(),
                        value: line,
                    }
                    .into())
                }
            }
        }

        Ok(())
    }

    /// Check cross-field constraints serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error when a value is out of range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.network.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "network.api_url".to_string(),
            }
            .into());
        }
        if self.network.busy_retry_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "network.busy_retry_delay_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.mirrors.expected_count < self.mirrors.known.len() {
            return Err(ConfigError::Invalid {
                message: format!(
                    "mirrors.expected_count ({}) is smaller than the number of known mirrors ({})",
                    self.mirrors.expected_count,
                    self.mirrors.known.len()
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Delay between attempts while the deployment service reports busy
    #[must_use]
    pub fn busy_retry_delay(&self) -> Duration {
        Duration::from_millis(self.network.busy_retry_delay_ms)
    }
}
