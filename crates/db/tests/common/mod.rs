//! Shared setup for persistence tests: a migrated in-memory SQLite database.

#![allow(dead_code)]

use fintrack_db::{AccountRepository, CreateAccountInput, Migrator, connect};
use fintrack_shared::config::DatabaseConfig;
use fintrack_shared::types::{AccountId, TenantId};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

/// Opens a fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        run_migrations: true,
    };
    let db = connect(&config).await.expect("Failed to open sqlite");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Creates an account for the tenant and returns its ID.
pub async fn create_account(
    db: &DatabaseConnection,
    tenant_id: TenantId,
    currency: &str,
) -> AccountId {
    let account = AccountRepository::new(db.clone())
        .create(CreateAccountInput {
            tenant_id,
            name: format!("{currency} account"),
            currency: currency.to_string(),
        })
        .await
        .expect("Failed to create account");
    AccountId::from_uuid(account.id)
}
