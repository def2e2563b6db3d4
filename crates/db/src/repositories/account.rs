//! Account repository.
//!
//! Accounts are owned by the wider finance system; the ledger only reads them.
//! `create` and `deactivate` exist so the ledger is usable on its own.

use fintrack_core::StoreError;
use fintrack_core::ledger::{AccountInfo, AccountLookup};
use fintrack_shared::types::{AccountId, TenantId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::{db_failure, now};
use crate::entities::accounts;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Account name.
    pub name: String,
    /// Currency code.
    pub currency: String,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, DbErr> {
        accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            tenant_id: Set(input.tenant_id.into_inner()),
            name: Set(input.name),
            currency: Set(input.currency),
            created_at: Set(now()),
            deactivated_at: Set(None),
        }
        .insert(&self.db)
        .await
    }

    /// Soft-deletes an account of the tenant. Returns `false` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn deactivate(&self, tenant_id: TenantId, id: AccountId) -> Result<bool, DbErr> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::DeactivatedAt, Expr::value(now()))
            .filter(accounts::Column::Id.eq(id.into_inner()))
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::DeactivatedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

impl AccountLookup for AccountRepository {
    /// Looks the account up by ID alone and reports its real owner, so the
    /// ledger can tell a foreign account from a missing one.
    async fn find_by_id(
        &self,
        _tenant_id: TenantId,
        account_id: AccountId,
    ) -> Result<Option<AccountInfo>, StoreError> {
        let account = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::DeactivatedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(account.map(|a| AccountInfo {
            id: AccountId::from_uuid(a.id),
            tenant_id: TenantId::from_uuid(a.tenant_id),
            currency: a.currency,
        }))
    }
}
