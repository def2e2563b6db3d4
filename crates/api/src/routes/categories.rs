//! Category registry routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use fintrack_core::registry::CategoryDraft;
use fintrack_shared::types::CategoryId;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::Tenancy};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{category_id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// GET `/categories` - List the tenant's categories.
async fn list_categories(State(state): State<AppState>, Tenancy(ctx): Tenancy) -> Response {
    match state.categories().list(&ctx).await {
        Ok(categories) => {
            (StatusCode::OK, Json(json!({ "categories": categories }))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/categories` - Create a category.
async fn create_category(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Json(draft): Json<CategoryDraft>,
) -> Response {
    match state.categories().create(&ctx, draft).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/categories/{category_id}` - Get one category.
async fn get_category(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(category_id): Path<CategoryId>,
) -> Response {
    match state.categories().get(&ctx, category_id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/categories/{category_id}` - Change a category's name, parent or presentation.
async fn update_category(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(category_id): Path<CategoryId>,
    Json(draft): Json<CategoryDraft>,
) -> Response {
    match state.categories().update(&ctx, category_id, draft).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE `/categories/{category_id}` - Soft-delete a category.
async fn delete_category(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(category_id): Path<CategoryId>,
) -> Response {
    match state.categories().delete(&ctx, category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
