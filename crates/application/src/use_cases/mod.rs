pub mod cache;
pub mod categories;
pub mod events;
pub mod products;

// Re-export use cases
pub use cache::GetCacheStatsUseCase;
pub use categories::{
    CreateCategoryUseCase, DeactivateCategoryUseCase, DeleteCategoryUseCase,
    GetCategoriesUseCase, UpdateCategoryUseCase,
};
pub use events::{GetEventBacklogUseCase, PurgePublishedEventsUseCase};
pub use products::{
    CreateProductUseCase, DeactivateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, UpdateProductUseCase,
};
