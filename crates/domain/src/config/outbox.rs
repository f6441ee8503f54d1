use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutboxConfig {
    #[serde(default = "default_relay_interval_ms")]
    pub relay_interval_ms: u64,

    /// Maximum number of pending events the relay considers per tick.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Published events older than this are deleted.
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u32,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            relay_interval_ms: default_relay_interval_ms(),
            batch_size: default_batch_size(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            retention_hours: default_retention_hours(),
        }
    }
}

fn default_relay_interval_ms() -> u64 {
    1_000
}

fn default_batch_size() -> u32 {
    100
}

fn default_base_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

fn default_retention_hours() -> u32 {
    72
}
