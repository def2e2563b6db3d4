//! Persistence capabilities for classification entities.

use std::future::Future;

use fintrack_shared::types::{TenantId, UserId};

use super::types::{Category, Classification, Stamped, Tag};
use crate::store::StoreError;

/// Tenant-scoped persistence for one classification kind.
///
/// This trait is implemented by the db crate to provide actual database operations.
/// Implementations must never return deactivated rows or rows of another tenant.
pub trait ClassificationStore<L: Classification>: Send + Sync {
    /// Find an active entity by ID within the tenant.
    fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: L::Id,
    ) -> impl Future<Output = Result<Option<L>, StoreError>> + Send;

    /// List active entities of the tenant.
    fn list(&self, tenant_id: TenantId) -> impl Future<Output = Result<Vec<L>, StoreError>> + Send;

    /// Persist a new entity; the store assigns the ID and timestamps.
    fn create(&self, record: Stamped<L::Draft>) -> impl Future<Output = Result<L, StoreError>> + Send;

    /// Overwrite the editable fields of an active entity within the tenant.
    ///
    /// Returns `None` when no active entity matched.
    fn update(
        &self,
        id: L::Id,
        record: Stamped<L::Draft>,
    ) -> impl Future<Output = Result<Option<L>, StoreError>> + Send;

    /// Soft-delete an active entity within the tenant.
    ///
    /// Returns `false` when no active entity matched, including one already deleted.
    fn delete(
        &self,
        tenant_id: TenantId,
        id: L::Id,
        deleted_by: UserId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Persistence capability for tags.
pub trait TagStore: ClassificationStore<Tag> {}

impl<S: ClassificationStore<Tag>> TagStore for S {}

/// Persistence capability for categories.
pub trait CategoryStore: ClassificationStore<Category> {}

impl<S: ClassificationStore<Category>> CategoryStore for S {}
