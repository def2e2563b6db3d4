//! Transaction repository for ledger transaction database operations.
//!
//! Tag links live in `transaction_tags`; every read attaches the IDs of the
//! active tags linked to each transaction.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use fintrack_core::StoreError;
use fintrack_core::ledger::{
    NewTransaction, Transaction, TransactionChanges, TransactionFilter, TransactionStore,
};
use fintrack_shared::types::{AccountId, CategoryId, TagId, TenantId, TransactionId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{db_failure, now};
use crate::entities::{tags, transaction_tags, transactions};

fn into_transaction(
    model: transactions::Model,
    tag_ids: Vec<TagId>,
) -> Result<Transaction, StoreError> {
    let amount = Decimal::from_str(&model.amount).map_err(|e| {
        StoreError::backend(format!(
            "transaction {} has an unreadable amount {:?}: {e}",
            model.id, model.amount
        ))
    })?;

    Ok(Transaction {
        id: TransactionId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        from_account_id: AccountId::from_uuid(model.from_account_id),
        to_account_id: model.to_account_id.map(AccountId::from_uuid),
        amount,
        currency: model.currency,
        transaction_date: model.transaction_date,
        description: model.description,
        category_id: model.category_id.map(CategoryId::from_uuid),
        tag_ids,
        created_by: UserId::from_uuid(model.created_by),
        created_at: model.created_at.to_utc(),
        updated_by: UserId::from_uuid(model.updated_by),
        updated_at: model.updated_at.to_utc(),
        deactivated_at: model.deactivated_at.map(|at| at.to_utc()),
    })
}

/// Loads the active tags linked to each of `transaction_ids`.
async fn linked_tags<C: ConnectionTrait>(
    conn: &C,
    transaction_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<TagId>>, DbErr> {
    if transaction_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = transaction_tags::Entity::find()
        .inner_join(tags::Entity)
        .filter(transaction_tags::Column::TransactionId.is_in(transaction_ids.iter().copied()))
        .filter(tags::Column::DeactivatedAt.is_null())
        .order_by_asc(transaction_tags::Column::CreatedAt)
        .order_by_asc(transaction_tags::Column::TagId)
        .all(conn)
        .await?;

    let mut by_transaction: HashMap<Uuid, Vec<TagId>> = HashMap::new();
    for link in links {
        by_transaction
            .entry(link.transaction_id)
            .or_default()
            .push(TagId::from_uuid(link.tag_id));
    }
    Ok(by_transaction)
}

/// Fails unless the transaction is an active transaction of the tenant.
async fn ensure_transaction<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    transaction_id: TransactionId,
) -> Result<(), StoreError> {
    let found = transactions::Entity::find_by_id(transaction_id.into_inner())
        .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
        .filter(transactions::Column::DeactivatedAt.is_null())
        .one(conn)
        .await
        .map_err(db_failure)?;

    match found {
        Some(_) => Ok(()),
        None => Err(StoreError::missing_reference(format!(
            "transaction {transaction_id}"
        ))),
    }
}

/// Fails unless every tag is an active tag of the tenant. Returns the distinct
/// tag IDs in request order.
async fn usable_tags<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    tag_ids: &[TagId],
) -> Result<Vec<Uuid>, StoreError> {
    let mut seen = HashSet::new();
    let wanted: Vec<Uuid> = tag_ids
        .iter()
        .copied()
        .map(TagId::into_inner)
        .filter(|id| seen.insert(*id))
        .collect();

    if wanted.is_empty() {
        return Ok(wanted);
    }

    let found: HashSet<Uuid> = tags::Entity::find()
        .select_only()
        .column(tags::Column::Id)
        .filter(tags::Column::Id.is_in(wanted.iter().copied()))
        .filter(tags::Column::TenantId.eq(tenant_id.into_inner()))
        .filter(tags::Column::DeactivatedAt.is_null())
        .into_tuple::<Uuid>()
        .all(conn)
        .await
        .map_err(db_failure)?
        .into_iter()
        .collect();

    if let Some(missing) = wanted.iter().find(|id| !found.contains(id)) {
        return Err(StoreError::missing_reference(format!("tag {missing}")));
    }

    Ok(wanted)
}

async fn insert_links<C: ConnectionTrait>(
    conn: &C,
    transaction_id: TransactionId,
    tag_ids: impl IntoIterator<Item = Uuid>,
) -> Result<(), StoreError> {
    let created_at = now();
    let rows: Vec<_> = tag_ids
        .into_iter()
        .map(|tag_id| transaction_tags::ActiveModel {
            transaction_id: Set(transaction_id.into_inner()),
            tag_id: Set(tag_id),
            created_at: Set(created_at),
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    transaction_tags::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await
        .map_err(db_failure)?;
    Ok(())
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<transactions::Model>, StoreError> {
        transactions::Entity::find_by_id(id.into_inner())
            .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(transactions::Column::DeactivatedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_failure)
    }

    async fn with_tags(&self, model: transactions::Model) -> Result<Transaction, StoreError> {
        let mut tags = linked_tags(&self.db, &[model.id])
            .await
            .map_err(db_failure)?;
        let tag_ids = tags.remove(&model.id).unwrap_or_default();
        into_transaction(model, tag_ids)
    }
}

impl TransactionStore for TransactionRepository {
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError> {
        match self.find_active(tenant_id, id).await? {
            Some(model) => Ok(Some(self.with_tags(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(transactions::Column::DeactivatedAt.is_null())
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt);

        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::TransactionDate.gte(date_from));
        }

        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::TransactionDate.lte(date_to));
        }

        if let Some(account_id) = filter.account_id {
            let account_id = account_id.into_inner();
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::FromAccountId.eq(account_id))
                    .add(transactions::Column::ToAccountId.eq(account_id)),
            );
        }

        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id.into_inner()));
        }

        if let Some(tag_id) = filter.tag_id {
            let tagged = Query::select()
                .column((transaction_tags::Entity, transaction_tags::Column::TransactionId))
                .from(transaction_tags::Entity)
                .inner_join(
                    tags::Entity,
                    Expr::col((tags::Entity, tags::Column::Id))
                        .equals((transaction_tags::Entity, transaction_tags::Column::TagId)),
                )
                .and_where(
                    Expr::col((transaction_tags::Entity, transaction_tags::Column::TagId))
                        .eq(tag_id.into_inner()),
                )
                .and_where(Expr::col((tags::Entity, tags::Column::DeactivatedAt)).is_null())
                .to_owned();
            query = query.filter(transactions::Column::Id.in_subquery(tagged));
        }

        let models = query.all(&self.db).await.map_err(db_failure)?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut tags = linked_tags(&self.db, &ids).await.map_err(db_failure)?;

        models
            .into_iter()
            .map(|model| {
                let tag_ids = tags.remove(&model.id).unwrap_or_default();
                into_transaction(model, tag_ids)
            })
            .collect()
    }

    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let now = now();
        let model = transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            tenant_id: Set(new.tenant_id.into_inner()),
            from_account_id: Set(new.from_account_id.into_inner()),
            to_account_id: Set(new.to_account_id.map(AccountId::into_inner)),
            amount: Set(new.amount.to_string()),
            currency: Set(new.currency),
            transaction_date: Set(new.transaction_date),
            description: Set(new.description),
            category_id: Set(new.category_id.map(CategoryId::into_inner)),
            created_by: Set(new.created_by.into_inner()),
            created_at: Set(now),
            updated_by: Set(new.updated_by.into_inner()),
            updated_at: Set(now),
            deactivated_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(db_failure)?;

        into_transaction(model, Vec::new())
    }

    async fn update(&self, changes: TransactionChanges) -> Result<Option<Transaction>, StoreError> {
        let Some(existing) = self.find_active(changes.tenant_id, changes.id).await? else {
            return Ok(None);
        };

        let mut active: transactions::ActiveModel = existing.into();
        active.from_account_id = Set(changes.from_account_id.into_inner());
        active.to_account_id = Set(changes.to_account_id.map(AccountId::into_inner));
        active.amount = Set(changes.amount.to_string());
        active.currency = Set(changes.currency);
        active.transaction_date = Set(changes.transaction_date);
        active.description = Set(changes.description);
        active.category_id = Set(changes.category_id.map(CategoryId::into_inner));
        active.updated_by = Set(changes.updated_by.into_inner());
        active.updated_at = Set(now());

        let model = active.update(&self.db).await.map_err(db_failure)?;
        Ok(Some(self.with_tags(model).await?))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        deleted_by: UserId,
    ) -> Result<bool, StoreError> {
        let now = now();
        let result = transactions::Entity::update_many()
            .col_expr(transactions::Column::DeactivatedAt, Expr::value(now))
            .col_expr(
                transactions::Column::UpdatedBy,
                Expr::value(deleted_by.into_inner()),
            )
            .col_expr(transactions::Column::UpdatedAt, Expr::value(now))
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(transactions::Column::DeactivatedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_failure)?;

        Ok(result.rows_affected > 0)
    }

    async fn add_tags(
        &self,
        tenant_id: TenantId,
        transaction_id: TransactionId,
        tag_ids: &[TagId],
    ) -> Result<(), StoreError> {
        let txn = self.db.begin().await.map_err(db_failure)?;

        ensure_transaction(&txn, tenant_id, transaction_id).await?;
        let wanted = usable_tags(&txn, tenant_id, tag_ids).await?;

        let existing: HashSet<Uuid> = transaction_tags::Entity::find()
            .filter(transaction_tags::Column::TransactionId.eq(transaction_id.into_inner()))
            .all(&txn)
            .await
            .map_err(db_failure)?
            .into_iter()
            .map(|link| link.tag_id)
            .collect();

        insert_links(
            &txn,
            transaction_id,
            wanted.into_iter().filter(|id| !existing.contains(id)),
        )
        .await?;

        txn.commit().await.map_err(db_failure)
    }

    async fn replace_tags(
        &self,
        tenant_id: TenantId,
        transaction_id: TransactionId,
        tag_ids: &[TagId],
    ) -> Result<(), StoreError> {
        let txn = self.db.begin().await.map_err(db_failure)?;

        ensure_transaction(&txn, tenant_id, transaction_id).await?;
        let wanted = usable_tags(&txn, tenant_id, tag_ids).await?;

        transaction_tags::Entity::delete_many()
            .filter(transaction_tags::Column::TransactionId.eq(transaction_id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_failure)?;

        insert_links(&txn, transaction_id, wanted).await?;

        txn.commit().await.map_err(db_failure)
    }
}
