pub mod category_repository;
pub mod outbox_repository;
pub mod product_repository;
mod product_row_mapper;

pub use category_repository::SqliteCategoryRepository;
pub use outbox_repository::SqliteOutboxRepository;
pub use product_repository::SqliteProductRepository;
