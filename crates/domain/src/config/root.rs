use serde::{Deserialize, Serialize};
use std::path::Path;

use super::cache::CacheConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::events::{EventSinkKind, EventsConfig};
use super::inventory::InventoryConfig;
use super::logging::LoggingConfig;
use super::outbox::OutboxConfig;
use super::server::ServerConfig;
use super::timeouts::TimeoutsConfig;

const LOCAL_CONFIG_PATH: &str = "catalog-service.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/catalog-service/config.toml";

/// Main configuration structure for the catalog service
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Local product cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Outbox relay and retention
    #[serde(default)]
    pub outbox: OutboxConfig,

    /// Change event sink
    #[serde(default)]
    pub events: EventsConfig,

    /// Deadlines applied at each component boundary
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. catalog-service.toml in current directory
    /// 3. /etc/catalog-service/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("HTTP port cannot be 0".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be positive when the cache is enabled".to_string(),
            ));
        }

        if self.events.sink == EventSinkKind::Webhook
            && self
                .events
                .webhook_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "events.webhook_url is required for the webhook sink".to_string(),
            ));
        }

        if self.events.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "events.channel_capacity must be positive".to_string(),
            ));
        }

        let timeouts = [
            ("timeouts.store_ms", self.timeouts.store_ms),
            ("timeouts.cache_ms", self.timeouts.cache_ms),
            ("timeouts.publish_ms", self.timeouts.publish_ms),
            ("inventory.timeout_ms", self.inventory.timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{} cannot be 0", name)));
            }
        }

        if self.outbox.batch_size == 0 {
            return Err(ConfigError::Validation(
                "outbox.batch_size must be positive".to_string(),
            ));
        }

        if self.outbox.base_backoff_ms > self.outbox.max_backoff_ms {
            return Err(ConfigError::Validation(
                "outbox.base_backoff_ms cannot exceed outbox.max_backoff_ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
