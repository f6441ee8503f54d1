mod create_product;
mod deactivate_product;
mod delete_product;
mod get_product;
mod list_products;
mod update_product;

pub use create_product::CreateProductUseCase;
pub use deactivate_product::DeactivateProductUseCase;
pub use delete_product::DeleteProductUseCase;
pub use get_product::GetProductUseCase;
pub use list_products::ListProductsUseCase;
pub use update_product::UpdateProductUseCase;

use catalog_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;

use crate::ports::CategoryRepository;
use crate::services::within_store_deadline;

async fn ensure_category_exists(
    category_repo: &Arc<dyn CategoryRepository>,
    category_id: i64,
    store_timeout: Duration,
) -> Result<(), DomainError> {
    within_store_deadline(
        store_timeout,
        "get_category",
        category_repo.get_by_id(category_id),
    )
    .await?
    .map(|_| ())
    .ok_or(DomainError::CategoryNotFound(category_id))
}
