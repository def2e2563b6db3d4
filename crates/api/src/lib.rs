//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for transactions, tags and categories
//! - Authentication middleware
//! - The tenancy extractor building the per-request context
//! - Mapping of domain errors onto JSON responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use fintrack_core::ledger::TransactionService;
use fintrack_core::registry::{CategoryService, TagService};
use fintrack_db::{AccountRepository, CategoryRepository, TagRepository, TransactionRepository};
use fintrack_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Ledger service wired to the database repositories.
pub type LedgerService =
    TransactionService<TransactionRepository, AccountRepository, CategoryRepository>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Transaction ledger backed by the database.
    #[must_use]
    pub fn ledger(&self) -> LedgerService {
        let db = (*self.db).clone();
        TransactionService::new(
            Arc::new(TransactionRepository::new(db.clone())),
            Arc::new(AccountRepository::new(db.clone())),
            Arc::new(CategoryRepository::new(db)),
        )
    }

    /// Tag registry backed by the database.
    #[must_use]
    pub fn tags(&self) -> TagService<TagRepository> {
        TagService::new(Arc::new(TagRepository::new((*self.db).clone())))
    }

    /// Category registry backed by the database.
    #[must_use]
    pub fn categories(&self) -> CategoryService<CategoryRepository> {
        CategoryService::new(Arc::new(CategoryRepository::new((*self.db).clone())))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
