//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `SCHOOLHUB__` environment variables. Each sub-module
//! represents a logical configuration section, and every field has a
//! default so an empty source still yields a usable configuration.

pub mod logging;
pub mod notifications;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::notifications::NotificationsConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Durable storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Notification engine settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `base` TOML file.
    ///
    /// Merges `base`, the `config/{env}` overlay and environment variables
    /// prefixed with `SCHOOLHUB__`. Missing files are skipped.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        tracing::debug!(base, env, "Loading configuration");
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SCHOOLHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
