//! Persistence capabilities consumed by the ledger.

use std::future::Future;

use fintrack_shared::types::{AccountId, TagId, TenantId, TransactionId, UserId};

use super::types::{AccountInfo, NewTransaction, Transaction, TransactionChanges, TransactionFilter};
use crate::store::StoreError;

/// Repository trait for transaction persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
/// Every read and write is scoped to a tenant and ignores deactivated rows.
pub trait TransactionStore: Send + Sync {
    /// Find an active transaction by ID within the tenant, with its tags.
    fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> impl Future<Output = Result<Option<Transaction>, StoreError>> + Send;

    /// List active transactions of the tenant matching the filter.
    fn list(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> impl Future<Output = Result<Vec<Transaction>, StoreError>> + Send;

    /// Persist a new transaction; the store assigns the ID and timestamps.
    fn create(
        &self,
        transaction: NewTransaction,
    ) -> impl Future<Output = Result<Transaction, StoreError>> + Send;

    /// Overwrite the mutable fields of an active transaction.
    ///
    /// Returns `None` when no active transaction matched in the tenant.
    fn update(
        &self,
        changes: TransactionChanges,
    ) -> impl Future<Output = Result<Option<Transaction>, StoreError>> + Send;

    /// Soft-delete an active transaction, recording the deleting user.
    ///
    /// Returns `false` when no active transaction matched, including one already deleted.
    fn delete(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        deleted_by: UserId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Link tags to a transaction. Every tag must be an active tag of the tenant.
    fn add_tags(
        &self,
        tenant_id: TenantId,
        transaction_id: TransactionId,
        tag_ids: &[TagId],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace the full tag set of a transaction.
    fn replace_tags(
        &self,
        tenant_id: TenantId,
        transaction_id: TransactionId,
        tag_ids: &[TagId],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Read-only account resolution.
///
/// Implementations look the account up by ID and report its real owner, which
/// may differ from `tenant_id`; the ledger turns a mismatch into
/// `CrossTenantReference`. Deactivated accounts are reported as absent.
pub trait AccountLookup: Send + Sync {
    /// Resolve an account.
    fn find_by_id(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
    ) -> impl Future<Output = Result<Option<AccountInfo>, StoreError>> + Send;
}
