//! Category tree checks.

use std::collections::HashSet;

use fintrack_shared::types::{CategoryId, TenantId};
use tracing::debug;

use super::error::RegistryError;
use super::repository::CategoryStore;

/// Ensures `parent` is an active category of the tenant and that nesting
/// `category` under it keeps the tree acyclic.
///
/// `category` is `None` when the category does not exist yet; a new category
/// cannot be anyone's ancestor, so only the parent's existence matters then.
///
/// The walk stops at a missing ancestor or at a loop that does not involve
/// `category`.
pub(crate) async fn ensure_valid_parent<S: CategoryStore>(
    store: &S,
    tenant_id: TenantId,
    category: Option<CategoryId>,
    parent: CategoryId,
) -> Result<(), RegistryError> {
    let mut visited = HashSet::new();
    let mut cursor = Some(parent);

    while let Some(current) = cursor {
        if category == Some(current) {
            debug!(%tenant_id, %current, %parent, "Rejected cyclic category parent");
            return Err(RegistryError::CategoryCycle(current));
        }
        if !visited.insert(current) {
            break;
        }

        let node = store
            .find_by_id(tenant_id, current)
            .await
            .map_err(|source| RegistryError::Store {
                operation: "resolve",
                kind: "category",
                entity_id: Some(current.to_string()),
                source,
            })?;

        match node {
            Some(node) if node.tenant_id == tenant_id => cursor = node.parent_category_id,
            _ if current == parent => {
                debug!(%tenant_id, %parent, "Rejected unknown parent category");
                return Err(RegistryError::ParentNotFound(parent));
            }
            _ => break,
        }
    }

    Ok(())
}
