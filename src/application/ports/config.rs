//! Settings persistence port

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persisted service settings, the lowest layer under env and `serve` flags.
///
/// `load` only returns settings that pass [`AppConfig::validate`], and
/// `save` refuses settings that don't.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Stored settings; every field `None` when nothing has been saved
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings with `config`
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Where the settings live, as shown by `config path`
    fn location(&self) -> &Path;

    /// Store [`AppConfig::defaults`]. Never overwrites existing settings.
    async fn init(&self) -> Result<(), ConfigError>;
}
