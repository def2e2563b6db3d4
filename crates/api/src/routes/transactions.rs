//! Transaction ledger routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use fintrack_core::ledger::{TransactionFilter, TransactionInput};
use fintrack_shared::types::{TagId, TransactionId};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::Tenancy};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{transaction_id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Transaction fields.
    #[serde(flatten)]
    pub transaction: TransactionInput,
    /// Tags to link after the transaction is saved.
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// Transaction fields.
    #[serde(flatten)]
    pub transaction: TransactionInput,
    /// Replacement tag set; omitted leaves the linked tags untouched.
    #[serde(default)]
    pub tag_ids: Option<Vec<TagId>>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List transactions with filters.
async fn list_transactions(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    match state.ledger().list(&ctx, &filter).await {
        Ok(transactions) => {
            (StatusCode::OK, Json(json!({ "transactions": transactions }))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST `/transactions` - Create a transaction and link its tags.
async fn create_transaction(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Json(payload): Json<CreateTransactionRequest>,
) -> Response {
    match state
        .ledger()
        .create(&ctx, payload.transaction, &payload.tag_ids)
        .await
    {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/transactions/{transaction_id}` - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.ledger().get_by_id(&ctx, transaction_id).await {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT `/transactions/{transaction_id}` - Re-validate and overwrite a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(transaction_id): Path<TransactionId>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Response {
    match state
        .ledger()
        .update(
            &ctx,
            transaction_id,
            payload.transaction,
            payload.tag_ids.as_deref(),
        )
        .await
    {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE `/transactions/{transaction_id}` - Soft-delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Tenancy(ctx): Tenancy,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.ledger().delete(&ctx, transaction_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
