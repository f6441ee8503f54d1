use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use catalog_domain::Page;
use tracing::debug;

use crate::{
    dto::{
        CreateProductRequest, DeleteProductQuery, PageQuery, ProductResponse, SearchQuery,
        UpdateProductRequest, VersionRequest,
    },
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/search", get(search_products))
        .route("/products/category/{category_id}", get(list_by_category))
        .route(
            "/products/{sku}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{sku}/deactivate", patch(deactivate_product))
}

async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<ProductResponse>>, ApiError> {
    let request = params.to_page_request()?;
    let page = state.products.list.list_visible(request).await?;
    debug!(
        count = page.items.len(),
        total = page.total_elements,
        "Visible products retrieved"
    );
    Ok(Json(page.map(ProductResponse::from_enriched)))
}

async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Page<ProductResponse>>, ApiError> {
    let criteria = params.criteria()?;
    let request = params.to_page_request()?;
    let page = state.products.list.search(criteria, request).await?;
    Ok(Json(page.map(ProductResponse::from_enriched)))
}

async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<ProductResponse>>, ApiError> {
    let request = params.to_page_request()?;
    let page = state
        .products
        .list
        .by_category(category_id, request)
        .await?;
    Ok(Json(page.map(ProductResponse::from_enriched)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get.execute(&sku).await?;
    Ok(Json(ProductResponse::from_enriched(product)))
}

async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state
        .products
        .create
        .execute(req.into_new_product())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::from_domain(product)),
    ))
}

async fn update_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let (patch, expected_version) = req.into_patch();
    let product = state
        .products
        .update
        .execute(&sku, patch, expected_version)
        .await?;
    Ok(Json(ProductResponse::from_domain(product)))
}

async fn deactivate_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    Json(req): Json<VersionRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .deactivate
        .execute(&sku, req.expected_version)
        .await?;
    Ok(Json(ProductResponse::from_domain(product)))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    Query(params): Query<DeleteProductQuery>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .delete
        .execute(&sku, params.expected_version)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
