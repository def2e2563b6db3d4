//! Transaction ledger service.
//!
//! Orchestrates validation, reference checks, currency resolution and
//! persistence. Every operation requires a tenant and an acting user and checks
//! them before touching any collaborator.

use std::sync::Arc;

use fintrack_shared::types::{AccountId, CategoryId, TagId, TenantId, TransactionId};
use tracing::{debug, info, warn};

use super::error::LedgerError;
use super::repository::{AccountLookup, TransactionStore};
use super::types::{
    AccountInfo, NewTransaction, Transaction, TransactionChanges, TransactionFilter,
    TransactionInput,
};
use super::validation::validate_transaction;
use crate::fields::FieldErrors;
use crate::registry::{CategoryStore, ClassificationStore};
use crate::tenancy::TenantContext;

/// Transaction service for CRUD operations on the ledger.
pub struct TransactionService<T, A, C> {
    transactions: Arc<T>,
    accounts: Arc<A>,
    categories: Arc<C>,
}

impl<T, A, C> TransactionService<T, A, C>
where
    T: TransactionStore,
    A: AccountLookup,
    C: CategoryStore,
{
    /// Create a new transaction service.
    #[must_use]
    pub fn new(transactions: Arc<T>, accounts: Arc<A>, categories: Arc<C>) -> Self {
        Self {
            transactions,
            accounts,
            categories,
        }
    }

    /// Fetch one active transaction of the caller's tenant.
    pub async fn get_by_id(
        &self,
        ctx: &TenantContext,
        id: TransactionId,
    ) -> Result<Transaction, LedgerError> {
        let (tenant_id, _) = ctx.require_both()?;

        let found = self
            .transactions
            .find_by_id(tenant_id, id)
            .await
            .map_err(|e| LedgerError::store("get", Some(id.to_string()), e))?;

        match found {
            Some(tx) if tx.tenant_id == tenant_id => Ok(tx),
            _ => Err(LedgerError::NotFound(id)),
        }
    }

    /// List active transactions of the caller's tenant matching `filter`.
    pub async fn list(
        &self,
        ctx: &TenantContext,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let (tenant_id, _) = ctx.require_both()?;

        let items = self
            .transactions
            .list(tenant_id, filter)
            .await
            .map_err(|e| LedgerError::store("list", None, e))?;

        Ok(items
            .into_iter()
            .filter(|tx| tx.tenant_id == tenant_id)
            .collect())
    }

    /// Validate, resolve and persist a new transaction, then link `tag_ids`.
    ///
    /// A failure while linking tags is reported as `PartialFailure`: the
    /// transaction stays persisted and its ID is carried in the error.
    pub async fn create(
        &self,
        ctx: &TenantContext,
        input: TransactionInput,
        tag_ids: &[TagId],
    ) -> Result<Transaction, LedgerError> {
        let (tenant_id, user_id) = ctx.require_both()?;
        let from_account_id = validated_source(&input)?;

        let from_account = self
            .check_references(tenant_id, from_account_id, &input)
            .await?;

        let currency = match input.requested_currency() {
            Some(code) => code.to_string(),
            None => {
                debug!(%tenant_id, account_id = %from_account_id, currency = %from_account.currency, "Defaulting currency from source account");
                from_account.currency
            }
        };

        let mut created = self
            .transactions
            .create(NewTransaction {
                tenant_id,
                from_account_id,
                to_account_id: input.counter_account(),
                amount: input.amount,
                currency,
                transaction_date: input.transaction_date,
                description: input.description,
                category_id: input.category_id,
                created_by: user_id,
                updated_by: user_id,
            })
            .await
            .map_err(|e| LedgerError::store("create", None, e))?;

        info!(%tenant_id, transaction_id = %created.id, amount = %created.amount, currency = %created.currency, created_by = %user_id, "Transaction created");

        if !tag_ids.is_empty() {
            if let Err(source) = self
                .transactions
                .add_tags(tenant_id, created.id, tag_ids)
                .await
            {
                warn!(%tenant_id, transaction_id = %created.id, error = %source, "Transaction created but failed to link tags");
                return Err(LedgerError::PartialFailure {
                    transaction_id: created.id,
                    source,
                });
            }
            created.tag_ids = tag_ids.to_vec();
        }

        Ok(created)
    }

    /// Re-validate and overwrite an existing transaction.
    ///
    /// The stored currency is kept when the payload leaves it empty. `Some`
    /// tag IDs replace the linked set after the update; `None` leaves it as is.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: TransactionId,
        input: TransactionInput,
        tag_ids: Option<&[TagId]>,
    ) -> Result<Transaction, LedgerError> {
        let (tenant_id, user_id) = ctx.require_both()?;
        let from_account_id = validated_source(&input)?;

        let existing = self.get_by_id(ctx, id).await?;

        self.check_references(tenant_id, from_account_id, &input).await?;

        let currency = input
            .requested_currency()
            .map_or(existing.currency, str::to_string);

        let updated = self
            .transactions
            .update(TransactionChanges {
                id,
                tenant_id,
                from_account_id,
                to_account_id: input.counter_account(),
                amount: input.amount,
                currency,
                transaction_date: input.transaction_date,
                description: input.description,
                category_id: input.category_id,
                updated_by: user_id,
            })
            .await
            .map_err(|e| LedgerError::store("update", Some(id.to_string()), e))?;

        let Some(mut updated) = updated else {
            return Err(LedgerError::NotFound(id));
        };

        info!(%tenant_id, transaction_id = %id, updated_by = %user_id, "Transaction updated");

        if let Some(tag_ids) = tag_ids {
            if let Err(source) = self
                .transactions
                .replace_tags(tenant_id, id, tag_ids)
                .await
            {
                warn!(%tenant_id, transaction_id = %id, error = %source, "Transaction updated but failed to replace tags");
                return Err(LedgerError::PartialFailure {
                    transaction_id: id,
                    source,
                });
            }
            updated.tag_ids = tag_ids.to_vec();
        }

        Ok(updated)
    }

    /// Soft-delete a transaction. Deleting twice reports `NotFound`.
    pub async fn delete(&self, ctx: &TenantContext, id: TransactionId) -> Result<(), LedgerError> {
        let (tenant_id, user_id) = ctx.require_both()?;

        let deleted = self
            .transactions
            .delete(tenant_id, id, user_id)
            .await
            .map_err(|e| LedgerError::store("delete", Some(id.to_string()), e))?;

        if !deleted {
            return Err(LedgerError::NotFound(id));
        }

        info!(%tenant_id, transaction_id = %id, deleted_by = %user_id, "Transaction deactivated");
        Ok(())
    }

    /// Checks every reference of `input` against the tenant and returns the
    /// source account.
    async fn check_references(
        &self,
        tenant_id: TenantId,
        from_account_id: AccountId,
        input: &TransactionInput,
    ) -> Result<AccountInfo, LedgerError> {
        let from_account = self
            .resolve_account(tenant_id, "from_account_id", from_account_id)
            .await?;

        // The counter account's currency never overrides the source's.
        if let Some(to_account_id) = input.counter_account() {
            self.resolve_account(tenant_id, "to_account_id", to_account_id)
                .await?;
        }

        if let Some(category_id) = input.category_id {
            self.check_category(tenant_id, category_id).await?;
        }

        Ok(from_account)
    }

    async fn resolve_account(
        &self,
        tenant_id: TenantId,
        field: &'static str,
        account_id: AccountId,
    ) -> Result<AccountInfo, LedgerError> {
        let account = self
            .accounts
            .find_by_id(tenant_id, account_id)
            .await
            .map_err(|e| LedgerError::reference_store("account", account_id.to_string(), e))?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        if account.tenant_id != tenant_id {
            warn!(%tenant_id, %account_id, field, "Rejected cross-tenant account reference");
            return Err(LedgerError::CrossTenantReference { field, account_id });
        }

        Ok(account)
    }

    async fn check_category(
        &self,
        tenant_id: TenantId,
        category_id: CategoryId,
    ) -> Result<(), LedgerError> {
        let category = self
            .categories
            .find_by_id(tenant_id, category_id)
            .await
            .map_err(|e| LedgerError::reference_store("category", category_id.to_string(), e))?;

        match category {
            Some(category) if category.tenant_id == tenant_id => Ok(()),
            _ => Err(LedgerError::CategoryNotFound(category_id)),
        }
    }
}

/// Runs the structural validator and returns the source account it guarantees.
fn validated_source(input: &TransactionInput) -> Result<AccountId, LedgerError> {
    validate_transaction(input)?;
    input
        .from_account_id
        .filter(|id| !id.is_nil())
        .ok_or_else(|| FieldErrors::single("from_account_id", "is required").into())
}
