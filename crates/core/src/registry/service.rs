//! Tenant-scoped CRUD for tags and categories.

use std::marker::PhantomData;
use std::sync::Arc;

use fintrack_shared::types::{CategoryId, TenantId, UserId};
use tracing::info;

use super::error::RegistryError;
use super::hierarchy::ensure_valid_parent;
use super::repository::{CategoryStore, ClassificationStore};
use super::types::{Category, CategoryDraft, Classification, Stamped, Tag};
use crate::store::StoreError;
use crate::tenancy::TenantContext;

/// Tag service.
pub type TagService<S> = RegistryService<Tag, S>;

fn store_failure<L: Classification>(
    operation: &'static str,
    id: Option<L::Id>,
) -> impl FnOnce(StoreError) -> RegistryError {
    move |source| RegistryError::Store {
        operation,
        kind: L::KIND,
        entity_id: id.map(|id| id.to_string()),
        source,
    }
}

fn not_found<L: Classification>(id: L::Id) -> RegistryError {
    RegistryError::NotFound {
        kind: L::KIND,
        id: id.to_string(),
    }
}

fn check_draft<L: Classification>(draft: &L::Draft) -> Result<(), RegistryError> {
    L::validate(draft)
        .into_result()
        .map_err(|field_errors| RegistryError::ValidationFailed { field_errors })
}

/// Shared lifecycle for classification entities.
///
/// Reads need a tenant; mutations need a tenant and an acting user. Both are
/// taken from the context, never from the draft.
pub struct RegistryService<L, S> {
    store: Arc<S>,
    _kind: PhantomData<fn() -> L>,
}

impl<L, S> RegistryService<L, S>
where
    L: Classification,
    S: ClassificationStore<L>,
{
    /// Create a new registry service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// Fetch one active entity of the caller's tenant.
    pub async fn get(&self, ctx: &TenantContext, id: L::Id) -> Result<L, RegistryError> {
        let tenant_id = ctx.require_tenant()?;

        let found = self
            .store
            .find_by_id(tenant_id, id)
            .await
            .map_err(store_failure::<L>("get", Some(id)))?;

        match found {
            Some(entity) if entity.tenant_id() == tenant_id => Ok(entity),
            _ => Err(not_found::<L>(id)),
        }
    }

    /// List active entities of the caller's tenant. Never absent: an empty
    /// tenant yields an empty `Vec`.
    pub async fn list(&self, ctx: &TenantContext) -> Result<Vec<L>, RegistryError> {
        let tenant_id = ctx.require_tenant()?;

        let items = self
            .store
            .list(tenant_id)
            .await
            .map_err(store_failure::<L>("list", None))?;

        Ok(items
            .into_iter()
            .filter(|entity| entity.tenant_id() == tenant_id)
            .collect())
    }

    /// Validate and persist a new entity.
    pub async fn create(&self, ctx: &TenantContext, draft: L::Draft) -> Result<L, RegistryError> {
        let (tenant_id, user_id) = ctx.require_both()?;
        check_draft::<L>(&draft)?;
        self.insert(tenant_id, user_id, draft).await
    }

    /// Validate and overwrite an existing entity.
    ///
    /// The returned value reflects what the store reported; callers needing
    /// canonical server-side fields should re-fetch.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: L::Id,
        draft: L::Draft,
    ) -> Result<L, RegistryError> {
        let (tenant_id, user_id) = ctx.require_both()?;
        check_draft::<L>(&draft)?;
        self.overwrite(tenant_id, user_id, id, draft).await
    }

    /// Soft-delete an entity. Deleting twice reports `NotFound`.
    pub async fn delete(&self, ctx: &TenantContext, id: L::Id) -> Result<(), RegistryError> {
        let (tenant_id, user_id) = ctx.require_both()?;

        let deleted = self
            .store
            .delete(tenant_id, id, user_id)
            .await
            .map_err(store_failure::<L>("delete", Some(id)))?;

        if !deleted {
            return Err(not_found::<L>(id));
        }

        info!(%tenant_id, kind = L::KIND, %id, deleted_by = %user_id, "Classification deactivated");
        Ok(())
    }

    async fn insert(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        draft: L::Draft,
    ) -> Result<L, RegistryError> {
        let created = self
            .store
            .create(Stamped {
                tenant_id,
                acting_user: user_id,
                draft,
            })
            .await
            .map_err(store_failure::<L>("create", None))?;

        info!(%tenant_id, kind = L::KIND, id = %created.id(), "Classification created");
        Ok(created)
    }

    async fn overwrite(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: L::Id,
        draft: L::Draft,
    ) -> Result<L, RegistryError> {
        let updated = self
            .store
            .update(
                id,
                Stamped {
                    tenant_id,
                    acting_user: user_id,
                    draft,
                },
            )
            .await
            .map_err(store_failure::<L>("update", Some(id)))?
            .ok_or_else(|| not_found::<L>(id))?;

        info!(%tenant_id, kind = L::KIND, %id, "Classification updated");
        Ok(updated)
    }
}

/// Category service.
///
/// Adds parent checks on top of the shared lifecycle: a parent must be an
/// active category of the same tenant, and the tree must stay acyclic.
pub struct CategoryService<S> {
    inner: RegistryService<Category, S>,
    store: Arc<S>,
}

impl<S: CategoryStore> CategoryService<S> {
    /// Create a new category service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            inner: RegistryService::new(Arc::clone(&store)),
            store,
        }
    }

    /// Fetch one active category of the caller's tenant.
    pub async fn get(
        &self,
        ctx: &TenantContext,
        id: CategoryId,
    ) -> Result<Category, RegistryError> {
        self.inner.get(ctx, id).await
    }

    /// List active categories of the caller's tenant.
    pub async fn list(&self, ctx: &TenantContext) -> Result<Vec<Category>, RegistryError> {
        self.inner.list(ctx).await
    }

    /// Validate and persist a new category.
    pub async fn create(
        &self,
        ctx: &TenantContext,
        draft: CategoryDraft,
    ) -> Result<Category, RegistryError> {
        let (tenant_id, user_id) = ctx.require_both()?;
        check_draft::<Category>(&draft)?;

        if let Some(parent) = draft.parent_category_id {
            ensure_valid_parent(self.store.as_ref(), tenant_id, None, parent).await?;
        }

        self.inner.insert(tenant_id, user_id, draft).await
    }

    /// Validate and overwrite an existing category.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, RegistryError> {
        let (tenant_id, user_id) = ctx.require_both()?;
        check_draft::<Category>(&draft)?;

        if let Some(parent) = draft.parent_category_id {
            ensure_valid_parent(self.store.as_ref(), tenant_id, Some(id), parent).await?;
        }

        self.inner.overwrite(tenant_id, user_id, id, draft).await
    }

    /// Soft-delete a category. Children keep their parent reference.
    pub async fn delete(&self, ctx: &TenantContext, id: CategoryId) -> Result<(), RegistryError> {
        self.inner.delete(ctx, id).await
    }
}
