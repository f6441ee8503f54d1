use std::sync::Arc;

use crate::ports::CacheStats;
use crate::services::CacheLayer;

pub struct GetCacheStatsUseCase {
    cache: Arc<CacheLayer>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<CacheLayer>) -> Self {
        Self { cache }
    }

    /// `None` when the product cache is disabled.
    pub fn execute(&self) -> Option<CacheStats> {
        self.cache.stats()
    }
}
