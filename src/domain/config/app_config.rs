//! Application configuration value object

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Largest accepted `max_upload_mb`; keeps the byte cap in range on 32-bit targets
pub const MAX_UPLOAD_MB_CEILING: usize = 1024;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Invalid log format \"{}\". Valid formats are: pretty, json",
                other
            )),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
/// Unknown keys in a settings file are an error, not silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<String>,
    pub max_upload_mb: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub dev_mode: Option<bool>,
    pub log_format: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            upload_dir: Some(DEFAULT_UPLOAD_DIR.to_string()),
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            dev_mode: Some(false),
            log_format: Some("pretty".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            upload_dir: other.upload_dir.or(self.upload_dir),
            max_upload_mb: other.max_upload_mb.or(self.max_upload_mb),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            dev_mode: other.dev_mode.or(self.dev_mode),
            log_format: other.log_format.or(self.log_format),
        }
    }

    /// Reject values the server cannot run with. Unset fields pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(invalid("model", "Value must not be empty"));
            }
        }
        if let Some(host) = &self.host {
            if host.trim().is_empty() {
                return Err(invalid("host", "Value must not be empty"));
            }
        }
        if let Some(mb) = self.max_upload_mb {
            if mb == 0 || mb > MAX_UPLOAD_MB_CEILING {
                return Err(invalid(
                    "max_upload_mb",
                    format!("Value must be between 1 and {}", MAX_UPLOAD_MB_CEILING),
                ));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs", "Value must be at least 1 second"));
        }
        if let Some(format) = &self.log_format {
            format.parse::<LogFormat>().map_err(|e| invalid("log_format", e))?;
        }
        Ok(())
    }

    /// Get the API key if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Get model name, or the default model
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Get bind host, or loopback
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Get bind port, or the default port
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Get directory for staged uploads
    pub fn upload_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.upload_dir.as_deref().unwrap_or(DEFAULT_UPLOAD_DIR))
    }

    /// Get the ingestion cap in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB) * 1024 * 1024
    }

    /// Get the transcription deadline
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Get development mode setting, or false if not set
    pub fn dev_mode_or_default(&self) -> bool {
        self.dev_mode.unwrap_or(false)
    }

    /// Get log format as parsed LogFormat, or default if not set/invalid
    pub fn log_format_or_default(&self) -> LogFormat {
        self.log_format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert_eq!(config.model_or_default(), "gemini-2.0-flash");
        assert_eq!(config.port_or_default(), 5001);
        assert_eq!(config.max_upload_bytes(), 25 * 1024 * 1024);
        assert_eq!(config.timeout_or_default(), Duration::from_secs(60));
        assert!(!config.dev_mode_or_default());
        assert_eq!(config.log_format_or_default(), LogFormat::Pretty);
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.model.is_none());
        assert!(config.port.is_none());
        assert!(config.dev_mode.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            port: Some(5001),
            model: Some("gemini-2.0-flash".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            port: None, // Should not override
            model: Some("gemini-2.5-flash".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.port, Some(5001)); // Kept from base
        assert_eq!(merged.model, Some("gemini-2.5-flash".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            api_key: Some("key".to_string()),
            dev_mode: Some(true),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.api_key, Some("key".to_string()));
        assert_eq!(merged.dev_mode, Some(true));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = AppConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn log_format_parses() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn log_format_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            log_format: Some("xml".to_string()),
            ..Default::default()
        };
        assert_eq!(config.log_format_or_default(), LogFormat::Pretty);
    }

    fn invalid_key(config: &AppConfig) -> String {
        match config.validate() {
            Err(ConfigError::ValidationError { key, .. }) => key,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn defaults_and_empty_config_are_valid() {
        AppConfig::defaults().validate().unwrap();
        AppConfig::empty().validate().unwrap();
    }

    #[test]
    fn validate_rejects_unusable_upload_cap() {
        let zero = AppConfig {
            max_upload_mb: Some(0),
            ..Default::default()
        };
        let huge = AppConfig {
            max_upload_mb: Some(MAX_UPLOAD_MB_CEILING + 1),
            ..Default::default()
        };
        assert_eq!(invalid_key(&zero), "max_upload_mb");
        assert_eq!(invalid_key(&huge), "max_upload_mb");

        let ceiling = AppConfig {
            max_upload_mb: Some(MAX_UPLOAD_MB_CEILING),
            ..Default::default()
        };
        ceiling.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_timeout_and_unknown_log_format() {
        let timeout = AppConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let format = AppConfig {
            log_format: Some("xml".to_string()),
            ..Default::default()
        };
        assert_eq!(invalid_key(&timeout), "timeout_secs");
        assert_eq!(invalid_key(&format), "log_format");
    }

    #[test]
    fn validate_rejects_blank_model_and_host() {
        let model = AppConfig {
            model: Some("  ".to_string()),
            ..Default::default()
        };
        let host = AppConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(invalid_key(&model), "model");
        assert_eq!(invalid_key(&host), "host");
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.host_or_default(), "127.0.0.1");
        assert_eq!(config.upload_dir_or_default(), PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes(), 25 * 1024 * 1024);
    }
}
