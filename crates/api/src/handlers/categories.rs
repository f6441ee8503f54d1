use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};

use crate::{
    dto::{
        CategoryResponse, CategoryTreeResponse, CreateCategoryRequest, UpdateCategoryRequest,
    },
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_active_categories).post(create_category))
        .route("/categories/roots", get(get_root_categories))
        .route("/categories/slug/{slug}", get(get_category_by_slug))
        .route(
            "/categories/{id}",
            get(get_category_tree)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/categories/{id}/deactivate", patch(deactivate_category))
}

async fn get_active_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.categories.get.get_active().await?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryResponse::from_domain)
            .collect(),
    ))
}

async fn get_root_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryTreeResponse>>, ApiError> {
    let roots = state.categories.get.get_roots().await?;
    Ok(Json(
        roots
            .into_iter()
            .map(CategoryTreeResponse::from_domain)
            .collect(),
    ))
}

async fn get_category_tree(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryTreeResponse>, ApiError> {
    let tree = state.categories.get.get_tree(id).await?;
    Ok(Json(CategoryTreeResponse::from_domain(tree)))
}

async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.categories.get.get_by_slug(&slug).await?;
    Ok(Json(CategoryResponse::from_domain(category)))
}

async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state
        .categories
        .create
        .execute(
            req.name,
            req.slug,
            req.description,
            req.parent_id,
            req.display_order,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse::from_domain(category)),
    ))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .categories
        .update
        .execute(
            id,
            req.name,
            req.slug,
            req.description,
            req.parent_id,
            req.display_order,
            req.is_active,
        )
        .await?;
    Ok(Json(CategoryResponse::from_domain(category)))
}

async fn deactivate_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.categories.deactivate.execute(id).await?;
    Ok(Json(CategoryResponse::from_domain(category)))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.categories.delete.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
