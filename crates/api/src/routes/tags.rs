//! Tag registry routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use fintrack_core::registry::TagDraft;
use fintrack_shared::types::TagId;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::Tenancy};

/// Creates the tag routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/{tag_id}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
}

/// GET `/tags` - List the tenant's tags.
async fn list_tags(State(state): State<AppState>, Tenancy(ctx): Tenancy) -> Response {
    match state.tags().list(&ctx).await {
        Ok(tags) => (StatusCode::OK, Json(json!({ "tags": tags }))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/tags` - Create a tag.
async fn create_tag(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Json(draft): Json<TagDraft>,
) -> Response {
    match state.tags().create(&ctx, draft).await {
        Ok(tag) => (StatusCode::CREATED, Json(tag)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/tags/{tag_id}` - Get one tag.
async fn get_tag(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(tag_id): Path<TagId>,
) -> Response {
    match state.tags().get(&ctx, tag_id).await {
        Ok(tag) => (StatusCode::OK, Json(tag)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/tags/{tag_id}` - Rename a tag.
async fn update_tag(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(tag_id): Path<TagId>,
    Json(draft): Json<TagDraft>,
) -> Response {
    match state.tags().update(&ctx, tag_id, draft).await {
        Ok(tag) => (StatusCode::OK, Json(tag)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE `/tags/{tag_id}` - Soft-delete a tag.
async fn delete_tag(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(tag_id): Path<TagId>,
) -> Response {
    match state.tags().delete(&ctx, tag_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
