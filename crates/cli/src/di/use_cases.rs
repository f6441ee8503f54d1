use super::{Repositories, Services};
use catalog_api::{AppState, CategoryUseCases, ProductUseCases, SystemState};
use catalog_application::use_cases::{
    CreateCategoryUseCase, CreateProductUseCase, DeactivateCategoryUseCase,
    DeactivateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase, GetCacheStatsUseCase,
    GetCategoriesUseCase, GetEventBacklogUseCase, GetProductUseCase, ListProductsUseCase,
    PurgePublishedEventsUseCase, UpdateCategoryUseCase, UpdateProductUseCase,
};
use std::sync::Arc;

pub struct UseCases {
    pub get_product: Arc<GetProductUseCase>,
    pub list_products: Arc<ListProductsUseCase>,
    pub create_product: Arc<CreateProductUseCase>,
    pub update_product: Arc<UpdateProductUseCase>,
    pub deactivate_product: Arc<DeactivateProductUseCase>,
    pub delete_product: Arc<DeleteProductUseCase>,
    pub get_categories: Arc<GetCategoriesUseCase>,
    pub create_category: Arc<CreateCategoryUseCase>,
    pub update_category: Arc<UpdateCategoryUseCase>,
    pub deactivate_category: Arc<DeactivateCategoryUseCase>,
    pub delete_category: Arc<DeleteCategoryUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
    pub get_event_backlog: Arc<GetEventBacklogUseCase>,
    pub purge_published: Arc<PurgePublishedEventsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, services: &Services) -> Self {
        let store_timeout = services.timeouts.store;
        let update_product = Arc::new(UpdateProductUseCase::new(
            repos.product.clone(),
            repos.category.clone(),
            services.cache.clone(),
            services.propagator.clone(),
            store_timeout,
        ));

        Self {
            get_product: Arc::new(GetProductUseCase::new(
                services.cache.clone(),
                services.enricher.clone(),
            )),
            list_products: Arc::new(ListProductsUseCase::new(
                repos.product.clone(),
                repos.category.clone(),
                services.enricher.clone(),
                store_timeout,
            )),
            create_product: Arc::new(CreateProductUseCase::new(
                repos.product.clone(),
                repos.category.clone(),
                services.cache.clone(),
                services.propagator.clone(),
                store_timeout,
            )),
            deactivate_product: Arc::new(DeactivateProductUseCase::new(update_product.clone())),
            update_product,
            delete_product: Arc::new(DeleteProductUseCase::new(
                repos.product.clone(),
                services.cache.clone(),
                services.propagator.clone(),
                store_timeout,
            )),
            get_categories: Arc::new(GetCategoriesUseCase::new(repos.category.clone())),
            create_category: Arc::new(CreateCategoryUseCase::new(repos.category.clone())),
            update_category: Arc::new(UpdateCategoryUseCase::new(repos.category.clone())),
            deactivate_category: Arc::new(DeactivateCategoryUseCase::new(repos.category.clone())),
            delete_category: Arc::new(DeleteCategoryUseCase::new(repos.category.clone())),
            get_cache_stats: Arc::new(GetCacheStatsUseCase::new(services.cache.clone())),
            get_event_backlog: Arc::new(GetEventBacklogUseCase::new(repos.outbox.clone())),
            purge_published: Arc::new(PurgePublishedEventsUseCase::new(repos.outbox.clone())),
        }
    }

    pub fn app_state(&self, services: &Services) -> AppState {
        AppState {
            products: ProductUseCases {
                get: self.get_product.clone(),
                list: self.list_products.clone(),
                create: self.create_product.clone(),
                update: self.update_product.clone(),
                deactivate: self.deactivate_product.clone(),
                delete: self.delete_product.clone(),
            },
            categories: CategoryUseCases {
                get: self.get_categories.clone(),
                create: self.create_category.clone(),
                update: self.update_category.clone(),
                deactivate: self.deactivate_category.clone(),
                delete: self.delete_category.clone(),
            },
            system: SystemState {
                cache_stats: self.get_cache_stats.clone(),
                event_backlog: self.get_event_backlog.clone(),
                event_feed: services.event_feed.clone(),
                event_sink: services.event_sink,
            },
        }
    }
}
