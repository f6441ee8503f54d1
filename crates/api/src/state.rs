use catalog_application::use_cases::{
    CreateCategoryUseCase, CreateProductUseCase, DeactivateCategoryUseCase,
    DeactivateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase, GetCacheStatsUseCase,
    GetCategoriesUseCase, GetEventBacklogUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateCategoryUseCase, UpdateProductUseCase,
};
use catalog_domain::ChangeEvent;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductUseCases,
    pub categories: CategoryUseCases,
    pub system: SystemState,
}

#[derive(Clone)]
pub struct ProductUseCases {
    pub get: Arc<GetProductUseCase>,
    pub list: Arc<ListProductsUseCase>,
    pub create: Arc<CreateProductUseCase>,
    pub update: Arc<UpdateProductUseCase>,
    pub deactivate: Arc<DeactivateProductUseCase>,
    pub delete: Arc<DeleteProductUseCase>,
}

#[derive(Clone)]
pub struct CategoryUseCases {
    pub get: Arc<GetCategoriesUseCase>,
    pub create: Arc<CreateCategoryUseCase>,
    pub update: Arc<UpdateCategoryUseCase>,
    pub deactivate: Arc<DeactivateCategoryUseCase>,
    pub delete: Arc<DeleteCategoryUseCase>,
}

#[derive(Clone)]
pub struct SystemState {
    pub cache_stats: Arc<GetCacheStatsUseCase>,
    pub event_backlog: Arc<GetEventBacklogUseCase>,
    /// Present when change events are fanned out in-process.
    pub event_feed: Option<broadcast::Sender<ChangeEvent>>,
    pub event_sink: &'static str,
}
