use catalog_application::ports::{CategoryRepository, OutboxRepository, ProductRepository};
use catalog_infrastructure::repositories::{
    SqliteCategoryRepository, SqliteOutboxRepository, SqliteProductRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub product: Arc<dyn ProductRepository>,
    pub category: Arc<dyn CategoryRepository>,
    pub outbox: Arc<dyn OutboxRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            product: Arc::new(SqliteProductRepository::new(pool.clone())),
            category: Arc::new(SqliteCategoryRepository::new(pool.clone())),
            outbox: Arc::new(SqliteOutboxRepository::new(pool)),
        }
    }
}
