//! Category repository.

use fintrack_core::StoreError;
use fintrack_core::registry::{Category, CategoryDraft, ClassificationStore, Stamped};
use fintrack_shared::types::{CategoryId, TenantId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_failure, now};
use crate::entities::categories;

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: CategoryId::from_uuid(model.id),
            tenant_id: TenantId::from_uuid(model.tenant_id),
            parent_category_id: model.parent_category_id.map(CategoryId::from_uuid),
            name: model.name,
            color: model.color,
            icon: model.icon,
            created_by: UserId::from_uuid(model.created_by),
            created_at: model.created_at.to_utc(),
            updated_by: UserId::from_uuid(model.updated_by),
            updated_at: model.updated_at.to_utc(),
            deactivated_at: model.deactivated_at.map(|at| at.to_utc()),
        }
    }
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active(
        &self,
        tenant_id: TenantId,
        id: CategoryId,
    ) -> Result<Option<categories::Model>, StoreError> {
        categories::Entity::find_by_id(id.into_inner())
            .filter(categories::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(categories::Column::DeactivatedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_failure)
    }
}

impl ClassificationStore<Category> for CategoryRepository {
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        Ok(self.find_active(tenant_id, id).await?.map(Category::from))
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Category>, StoreError> {
        let models = categories::Entity::find()
            .filter(categories::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(categories::Column::DeactivatedAt.is_null())
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn create(&self, record: Stamped<CategoryDraft>) -> Result<Category, StoreError> {
        let now = now();
        let model = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            tenant_id: Set(record.tenant_id.into_inner()),
            parent_category_id: Set(record.draft.parent_category_id.map(CategoryId::into_inner)),
            name: Set(record.draft.name.trim().to_owned()),
            color: Set(record.draft.color),
            icon: Set(record.draft.icon),
            created_by: Set(record.acting_user.into_inner()),
            created_at: Set(now),
            updated_by: Set(record.acting_user.into_inner()),
            updated_at: Set(now),
            deactivated_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(db_failure)?;

        Ok(model.into())
    }

    async fn update(
        &self,
        id: CategoryId,
        record: Stamped<CategoryDraft>,
    ) -> Result<Option<Category>, StoreError> {
        let Some(existing) = self.find_active(record.tenant_id, id).await? else {
            return Ok(None);
        };

        let draft = record.draft;
        let mut active: categories::ActiveModel = existing.into();
        active.parent_category_id = Set(draft.parent_category_id.map(CategoryId::into_inner));
        active.name = Set(draft.name.trim().to_owned());
        active.color = Set(draft.color);
        active.icon = Set(draft.icon);
        active.updated_by = Set(record.acting_user.into_inner());
        active.updated_at = Set(now());

        let model = active.update(&self.db).await.map_err(db_failure)?;
        Ok(Some(model.into()))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: CategoryId,
        deleted_by: UserId,
    ) -> Result<bool, StoreError> {
        let now = now();
        let result = categories::Entity::update_many()
            .col_expr(categories::Column::DeactivatedAt, Expr::value(now))
            .col_expr(
                categories::Column::UpdatedBy,
                Expr::value(deleted_by.into_inner()),
            )
            .col_expr(categories::Column::UpdatedAt, Expr::value(now))
            .filter(categories::Column::Id.eq(id.into_inner()))
            .filter(categories::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(categories::Column::DeactivatedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(result.rows_affected > 0)
    }
}
