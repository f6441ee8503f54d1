use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_store_ms")]
    pub store_ms: u64,

    #[serde(default = "default_cache_ms")]
    pub cache_ms: u64,

    #[serde(default = "default_publish_ms")]
    pub publish_ms: u64,
}

impl TimeoutsConfig {
    pub fn store(&self) -> Duration {
        Duration::from_millis(self.store_ms)
    }

    pub fn cache(&self) -> Duration {
        Duration::from_millis(self.cache_ms)
    }

    pub fn publish(&self) -> Duration {
        Duration::from_millis(self.publish_ms)
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            store_ms: default_store_ms(),
            cache_ms: default_cache_ms(),
            publish_ms: default_publish_ms(),
        }
    }
}

fn default_store_ms() -> u64 {
    5_000
}

fn default_cache_ms() -> u64 {
    50
}

fn default_publish_ms() -> u64 {
    2_000
}
