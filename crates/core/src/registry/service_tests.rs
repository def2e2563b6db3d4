//! Behavioural tests for the tag and category services.

use std::sync::Arc;

use fintrack_shared::types::{CategoryId, TagId, TenantId, UserId};

use super::error::RegistryError;
use super::service::{CategoryService, TagService};
use super::types::{CategoryDraft, TagDraft};
use crate::tenancy::TenantContext;
use crate::testing::{MockCategoryStore, MockTagStore};

fn ctx() -> TenantContext {
    TenantContext::for_user(TenantId::new(), UserId::new())
}

fn tag(name: &str) -> TagDraft {
    TagDraft {
        name: name.to_string(),
    }
}

fn category(name: &str, parent: Option<CategoryId>) -> CategoryDraft {
    CategoryDraft {
        name: name.to_string(),
        parent_category_id: parent,
        color: "#00aa55".to_string(),
        icon: "cart".to_string(),
    }
}

// ============================================================================
// Tags
// ============================================================================

#[tokio::test]
async fn test_tag_create_stamps_context() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let ctx = ctx();

    let created = service.create(&ctx, tag("travel")).await.unwrap();

    assert_eq!(Some(created.tenant_id), ctx.current_tenant_id());
    assert_eq!(Some(created.created_by), ctx.current_user_id());
    assert_eq!(created.updated_by, created.created_by);
    assert_eq!(created.name, "travel");
}

#[tokio::test]
async fn test_tag_blank_name_rejected() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let ctx = ctx();

    let result = service.create(&ctx, tag("  ")).await;
    match result {
        Err(RegistryError::ValidationFailed { field_errors }) => {
            assert_eq!(field_errors.get("name"), Some("is required"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    let listed = service.list(&ctx).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_tag_update_reapplies_name_check() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let ctx = ctx();
    let created = service.create(&ctx, tag("travel")).await.unwrap();

    let result = service.update(&ctx, created.id, tag("")).await;
    assert!(matches!(result, Err(RegistryError::ValidationFailed { .. })));

    let editor = UserId::new();
    let edit_ctx = TenantContext::new(ctx.current_tenant_id(), Some(editor));
    let updated = service
        .update(&edit_ctx, created.id, tag("holidays"))
        .await
        .unwrap();
    assert_eq!(updated.name, "holidays");
    assert_eq!(updated.updated_by, editor);
    assert_eq!(updated.created_by, created.created_by);
}

#[tokio::test]
async fn test_tag_reads_need_tenant_only() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let ctx = ctx();
    let created = service.create(&ctx, tag("travel")).await.unwrap();

    let reader = TenantContext::new(ctx.current_tenant_id(), None);
    assert_eq!(service.get(&reader, created.id).await.unwrap().id, created.id);
    assert_eq!(service.list(&reader).await.unwrap().len(), 1);

    let result = service.create(&reader, tag("food")).await;
    assert!(matches!(result, Err(RegistryError::MissingUserContext)));

    let result = service.list(&TenantContext::default()).await;
    assert!(matches!(result, Err(RegistryError::MissingTenantContext)));
}

#[tokio::test]
async fn test_tag_isolation_between_tenants() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let owner = ctx();
    let other = ctx();
    let created = service.create(&owner, tag("travel")).await.unwrap();

    let result = service.get(&other, created.id).await;
    assert!(matches!(result, Err(RegistryError::NotFound { kind: "tag", .. })));
    assert!(service.list(&other).await.unwrap().is_empty());

    let result = service.delete(&other, created.id).await;
    assert!(matches!(result, Err(RegistryError::NotFound { .. })));
}

#[tokio::test]
async fn test_tag_soft_delete() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let ctx = ctx();
    let created = service.create(&ctx, tag("travel")).await.unwrap();

    service.delete(&ctx, created.id).await.unwrap();

    let row = store.raw(created.id).unwrap();
    assert!(row.deactivated_at.is_some());
    assert_eq!(Some(row.updated_by), ctx.current_user_id());

    let result = service.get(&ctx, created.id).await;
    assert!(matches!(result, Err(RegistryError::NotFound { .. })));

    let result = service.delete(&ctx, created.id).await;
    assert!(matches!(result, Err(RegistryError::NotFound { .. })));
}

#[tokio::test]
async fn test_tag_delete_failure_names_the_tag() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store.clone());
    let ctx = ctx();
    let created = service.create(&ctx, tag("travel")).await.unwrap();
    store.fail_deletes();

    let err = service.delete(&ctx, created.id).await.unwrap_err();

    match err {
        RegistryError::Store {
            operation,
            kind,
            entity_id,
            ..
        } => {
            assert_eq!(operation, "delete");
            assert_eq!(kind, "tag");
            assert_eq!(entity_id, Some(created.id.to_string()));
        }
        other => panic!("expected store error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tag_update_unknown_id() {
    let store = Arc::new(MockTagStore::new());
    let service = TagService::new(store);

    let result = service.update(&ctx(), TagId::new(), tag("travel")).await;
    assert!(matches!(result, Err(RegistryError::NotFound { kind: "tag", .. })));
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_category_keeps_presentation_fields() {
    let service = CategoryService::new(Arc::new(MockCategoryStore::new()));
    let ctx = ctx();

    let created = service.create(&ctx, category("Food", None)).await.unwrap();
    assert_eq!(created.color, "#00aa55");
    assert_eq!(created.icon, "cart");
    assert_eq!(created.parent_category_id, None);
}

#[tokio::test]
async fn test_category_nesting() {
    let service = CategoryService::new(Arc::new(MockCategoryStore::new()));
    let ctx = ctx();

    let food = service.create(&ctx, category("Food", None)).await.unwrap();
    let groceries = service
        .create(&ctx, category("Groceries", Some(food.id)))
        .await
        .unwrap();
    assert_eq!(groceries.parent_category_id, Some(food.id));

    let listed = service.list(&ctx).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_category_parent_must_exist_in_tenant() {
    let service = CategoryService::new(Arc::new(MockCategoryStore::new()));
    let owner = ctx();
    let other = ctx();

    let missing = CategoryId::new();
    let result = service.create(&owner, category("Food", Some(missing))).await;
    assert!(matches!(result, Err(RegistryError::ParentNotFound(id)) if id == missing));

    let foreign = service.create(&other, category("Food", None)).await.unwrap();
    let result = service
        .create(&owner, category("Groceries", Some(foreign.id)))
        .await;
    assert!(matches!(result, Err(RegistryError::ParentNotFound(_))));
    assert!(service.list(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_category_cycle_rejected() {
    let service = CategoryService::new(Arc::new(MockCategoryStore::new()));
    let ctx = ctx();

    let root = service.create(&ctx, category("Root", None)).await.unwrap();
    let child = service
        .create(&ctx, category("Child", Some(root.id)))
        .await
        .unwrap();
    let grandchild = service
        .create(&ctx, category("Grandchild", Some(child.id)))
        .await
        .unwrap();

    let result = service
        .update(&ctx, root.id, category("Root", Some(grandchild.id)))
        .await;
    assert!(matches!(result, Err(RegistryError::CategoryCycle(_))));

    let result = service
        .update(&ctx, child.id, category("Child", Some(child.id)))
        .await;
    assert!(matches!(result, Err(RegistryError::CategoryCycle(id)) if id == child.id));

    let unchanged = service.get(&ctx, root.id).await.unwrap();
    assert_eq!(unchanged.parent_category_id, None);
}

#[tokio::test]
async fn test_category_reparent_within_tree() {
    let service = CategoryService::new(Arc::new(MockCategoryStore::new()));
    let ctx = ctx();

    let food = service.create(&ctx, category("Food", None)).await.unwrap();
    let travel = service.create(&ctx, category("Travel", None)).await.unwrap();
    let snacks = service
        .create(&ctx, category("Snacks", Some(food.id)))
        .await
        .unwrap();

    let moved = service
        .update(&ctx, snacks.id, category("Snacks", Some(travel.id)))
        .await
        .unwrap();
    assert_eq!(moved.parent_category_id, Some(travel.id));
}

#[tokio::test]
async fn test_category_delete() {
    let service = CategoryService::new(Arc::new(MockCategoryStore::new()));
    let ctx = ctx();
    let created = service.create(&ctx, category("Food", None)).await.unwrap();

    service.delete(&ctx, created.id).await.unwrap();
    assert!(service.list(&ctx).await.unwrap().is_empty());

    let result = service.delete(&ctx, created.id).await;
    assert!(matches!(result, Err(RegistryError::NotFound { kind: "category", .. })));
}
