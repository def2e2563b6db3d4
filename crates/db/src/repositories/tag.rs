//! Tag repository.

use fintrack_core::StoreError;
use fintrack_core::registry::{ClassificationStore, Stamped, Tag, TagDraft};
use fintrack_shared::types::{TagId, TenantId, UserId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_failure, now};
use crate::entities::tags;

impl From<tags::Model> for Tag {
    fn from(model: tags::Model) -> Self {
        Self {
            id: TagId::from_uuid(model.id),
            tenant_id: TenantId::from_uuid(model.tenant_id),
            name: model.name,
            created_by: UserId::from_uuid(model.created_by),
            created_at: model.created_at.to_utc(),
            updated_by: UserId::from_uuid(model.updated_by),
            updated_at: model.updated_at.to_utc(),
            deactivated_at: model.deactivated_at.map(|at| at.to_utc()),
        }
    }
}

/// Tag repository.
#[derive(Debug, Clone)]
pub struct TagRepository {
    db: DatabaseConnection,
}

impl TagRepository {
    /// Creates a new tag repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active(
        &self,
        tenant_id: TenantId,
        id: TagId,
    ) -> Result<Option<tags::Model>, StoreError> {
        tags::Entity::find_by_id(id.into_inner())
            .filter(tags::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(tags::Column::DeactivatedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_failure)
    }
}

impl ClassificationStore<Tag> for TagRepository {
    async fn find_by_id(&self, tenant_id: TenantId, id: TagId) -> Result<Option<Tag>, StoreError> {
        Ok(self.find_active(tenant_id, id).await?.map(Tag::from))
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Tag>, StoreError> {
        let models = tags::Entity::find()
            .filter(tags::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(tags::Column::DeactivatedAt.is_null())
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn create(&self, record: Stamped<TagDraft>) -> Result<Tag, StoreError> {
        let now = now();
        let model = tags::ActiveModel {
            id: Set(TagId::new().into_inner()),
            tenant_id: Set(record.tenant_id.into_inner()),
            name: Set(record.draft.name.trim().to_owned()),
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

    async fn update(&self, id: TagId, record: Stamped<TagDraft>) -> Result<Option<Tag>, StoreError> {
        let Some(existing) = self.find_active(record.tenant_id, id).await? else {
            return Ok(None);
        };

        let mut active: tags::ActiveModel = existing.into();
        active.name = Set(record.draft.name.trim().to_owned());
        active.updated_by = Set(record.acting_user.into_inner());
        active.updated_at = Set(now());

        let model = active.update(&self.db).await.map_err(db_failure)?;
        Ok(Some(model.into()))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: TagId,
        deleted_by: UserId,
    ) -> Result<bool, StoreError> {
        let now = now();
        let result = tags::Entity::update_many()
            .col_expr(tags::Column::DeactivatedAt, Expr::value(now))
            .col_expr(tags::Column::UpdatedBy, Expr::value(deleted_by.into_inner()))
            .col_expr(tags::Column::UpdatedAt, Expr::value(now))
            .filter(tags::Column::Id.eq(id.into_inner()))
            .filter(tags::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(tags::Column::DeactivatedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(result.rows_affected > 0)
    }
}
