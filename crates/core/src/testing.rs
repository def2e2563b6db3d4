//! In-memory collaborators for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use fintrack_shared::types::{AccountId, CategoryId, TagId, TenantId, TransactionId, UserId};

use crate::ledger::{
    AccountInfo, AccountLookup, NewTransaction, Transaction, TransactionChanges,
    TransactionFilter, TransactionStore,
};
use crate::registry::{Category, CategoryDraft, ClassificationStore, Stamped, Tag, TagDraft};
use crate::store::StoreError;

/// Mock transaction store. Tags must be registered before they can be linked.
#[derive(Default)]
pub struct MockTransactionStore {
    transactions: Mutex<HashMap<TransactionId, Transaction>>,
    known_tags: Mutex<HashSet<(TenantId, TagId)>>,
    fail_writes: AtomicBool,
}

impl MockTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tag(&self, tenant_id: TenantId, tag_id: TagId) {
        self.known_tags.lock().unwrap().insert((tenant_id, tag_id));
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Every stored row, including deactivated ones.
    pub fn all(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().values().cloned().collect()
    }

    pub fn raw(&self, id: TransactionId) -> Option<Transaction> {
        self.transactions.lock().unwrap().get(&id).cloned()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        Ok(())
    }

    fn check_tags(&self, tenant_id: TenantId, tag_ids: &[TagId]) -> Result<(), StoreError> {
        let known = self.known_tags.lock().unwrap();
        match tag_ids.iter().find(|id| !known.contains(&(tenant_id, **id))) {
            Some(missing) => Err(StoreError::missing_reference(format!("tag {missing}"))),
            None => Ok(()),
        }
    }

    fn active(&self, tenant_id: TenantId, id: TransactionId) -> Option<Transaction> {
        self.transactions
            .lock()
            .unwrap()
            .get(&id)
            .filter(|tx| tx.tenant_id == tenant_id && tx.deactivated_at.is_none())
            .cloned()
    }
}

impl TransactionStore for MockTransactionStore {
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self.active(tenant_id, id))
    }

    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut items: Vec<_> = self
            .transactions
            .lock()
            .unwrap()
            .values()
            .filter(|tx| tx.tenant_id == tenant_id && tx.deactivated_at.is_none())
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect();
        items.sort_by_key(|tx| (tx.transaction_date, tx.id));
        Ok(items)
    }

    async fn create(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        self.check_writable()?;
        let now = Utc::now();
        let tx = Transaction {
            id: TransactionId::new(),
            tenant_id: new.tenant_id,
            from_account_id: new.from_account_id,
            to_account_id: new.to_account_id,
            amount: new.amount,
            currency: new.currency,
            transaction_date: new.transaction_date,
            description: new.description,
            category_id: new.category_id,
            tag_ids: Vec::new(),
            created_by: new.created_by,
            created_at: now,
            updated_by: new.updated_by,
            updated_at: now,
            deactivated_at: None,
        };
        self.transactions.lock().unwrap().insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn update(&self, changes: TransactionChanges) -> Result<Option<Transaction>, StoreError> {
        self.check_writable()?;
        let mut transactions = self.transactions.lock().unwrap();
        let Some(tx) = transactions
            .get_mut(&changes.id)
            .filter(|tx| tx.tenant_id == changes.tenant_id && tx.deactivated_at.is_none())
        else {
            return Ok(None);
        };
        tx.from_account_id = changes.from_account_id;
        tx.to_account_id = changes.to_account_id;
        tx.amount = changes.amount;
        tx.currency = changes.currency;
        tx.transaction_date = changes.transaction_date;
        tx.description = changes.description;
        tx.category_id = changes.category_id;
        tx.updated_by = changes.updated_by;
        tx.updated_at = Utc::now();
        Ok(Some(tx.clone()))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        deleted_by: UserId,
    ) -> Result<bool, StoreError> {
        self.check_writable()?;
        let mut transactions = self.transactions.lock().unwrap();
        match transactions
            .get_mut(&id)
            .filter(|tx| tx.tenant_id == tenant_id && tx.deactivated_at.is_none())
        {
            Some(tx) => {
                let now = Utc::now();
                tx.deactivated_at = Some(now);
                tx.updated_by = deleted_by;
                tx.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_tags(
        &self,
        tenant_id: TenantId,
        transaction_id: TransactionId,
        tag_ids: &[TagId],
    ) -> Result<(), StoreError> {
        self.check_tags(tenant_id, tag_ids)?;
        let mut transactions = self.transactions.lock().unwrap();
        let tx = transactions
            .get_mut(&transaction_id)
            .ok_or_else(|| StoreError::missing_reference("transaction"))?;
        for tag in tag_ids {
            if !tx.tag_ids.contains(tag) {
                tx.tag_ids.push(*tag);
            }
        }
        Ok(())
    }

    async fn replace_tags(
        &self,
        tenant_id: TenantId,
        transaction_id: TransactionId,
        tag_ids: &[TagId],
    ) -> Result<(), StoreError> {
        self.check_tags(tenant_id, tag_ids)?;
        let mut transactions = self.transactions.lock().unwrap();
        let tx = transactions
            .get_mut(&transaction_id)
            .ok_or_else(|| StoreError::missing_reference("transaction"))?;
        tx.tag_ids = tag_ids.to_vec();
        Ok(())
    }
}

/// Mock account lookup. Reports accounts of every tenant, like the real one.
#[derive(Default)]
pub struct MockAccounts {
    accounts: Mutex<HashMap<AccountId, AccountInfo>>,
    offline: AtomicBool,
}

impl MockAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, tenant_id: TenantId, currency: &str) -> AccountId {
        let id = AccountId::new();
        self.accounts.lock().unwrap().insert(
            id,
            AccountInfo {
                id,
                tenant_id,
                currency: currency.to_string(),
            },
        );
        id
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

impl AccountLookup for MockAccounts {
    async fn find_by_id(
        &self,
        _tenant_id: TenantId,
        account_id: AccountId,
    ) -> Result<Option<AccountInfo>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        Ok(self.accounts.lock().unwrap().get(&account_id).cloned())
    }
}

/// Mock tag store.
#[derive(Default)]
pub struct MockTagStore {
    tags: Mutex<HashMap<TagId, Tag>>,
    fail_deletes: AtomicBool,
}

impl MockTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn raw(&self, id: TagId) -> Option<Tag> {
        self.tags.lock().unwrap().get(&id).cloned()
    }
}

impl ClassificationStore<Tag> for MockTagStore {
    async fn find_by_id(&self, tenant_id: TenantId, id: TagId) -> Result<Option<Tag>, StoreError> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .get(&id)
            .filter(|t| t.tenant_id == tenant_id && t.deactivated_at.is_none())
            .cloned())
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Tag>, StoreError> {
        let mut items: Vec<_> = self
            .tags
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.tenant_id == tenant_id && t.deactivated_at.is_none())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn create(&self, record: Stamped<TagDraft>) -> Result<Tag, StoreError> {
        let now = Utc::now();
        let tag = Tag {
            id: TagId::new(),
            tenant_id: record.tenant_id,
            name: record.draft.name,
            created_by: record.acting_user,
            created_at: now,
            updated_by: record.acting_user,
            updated_at: now,
            deactivated_at: None,
        };
        self.tags.lock().unwrap().insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update(&self, id: TagId, record: Stamped<TagDraft>) -> Result<Option<Tag>, StoreError> {
        let mut tags = self.tags.lock().unwrap();
        let Some(tag) = tags
            .get_mut(&id)
            .filter(|t| t.tenant_id == record.tenant_id && t.deactivated_at.is_none())
        else {
            return Ok(None);
        };
        tag.name = record.draft.name;
        tag.updated_by = record.acting_user;
        tag.updated_at = Utc::now();
        Ok(Some(tag.clone()))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: TagId,
        deleted_by: UserId,
    ) -> Result<bool, StoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        let mut tags = self.tags.lock().unwrap();
        match tags
            .get_mut(&id)
            .filter(|t| t.tenant_id == tenant_id && t.deactivated_at.is_none())
        {
            Some(tag) => {
                let now = Utc::now();
                tag.deactivated_at = Some(now);
                tag.updated_by = deleted_by;
                tag.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Mock category store.
#[derive(Default)]
pub struct MockCategoryStore {
    categories: Mutex<HashMap<CategoryId, Category>>,
}

impl MockCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a category directly, bypassing service checks.
    pub fn seed(&self, tenant_id: TenantId, name: &str) -> CategoryId {
        let now = Utc::now();
        let user = UserId::new();
        let category = Category {
            id: CategoryId::new(),
            tenant_id,
            parent_category_id: None,
            name: name.to_string(),
            color: String::new(),
            icon: String::new(),
            created_by: user,
            created_at: now,
            updated_by: user,
            updated_at: now,
            deactivated_at: None,
        };
        let id = category.id;
        self.categories.lock().unwrap().insert(id, category);
        id
    }
}

impl ClassificationStore<Category> for MockCategoryStore {
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .get(&id)
            .filter(|c| c.tenant_id == tenant_id && c.deactivated_at.is_none())
            .cloned())
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<Category>, StoreError> {
        let mut items: Vec<_> = self
            .categories
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.tenant_id == tenant_id && c.deactivated_at.is_none())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn create(&self, record: Stamped<CategoryDraft>) -> Result<Category, StoreError> {
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            tenant_id: record.tenant_id,
            parent_category_id: record.draft.parent_category_id,
            name: record.draft.name,
            color: record.draft.color,
            icon: record.draft.icon,
            created_by: record.acting_user,
            created_at: now,
            updated_by: record.acting_user,
            updated_at: now,
            deactivated_at: None,
        };
        self.categories
            .lock()
            .unwrap()
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        record: Stamped<CategoryDraft>,
    ) -> Result<Option<Category>, StoreError> {
        let mut categories = self.categories.lock().unwrap();
        let Some(category) = categories
            .get_mut(&id)
            .filter(|c| c.tenant_id == record.tenant_id && c.deactivated_at.is_none())
        else {
            return Ok(None);
        };
        category.parent_category_id = record.draft.parent_category_id;
        category.name = record.draft.name;
        category.color = record.draft.color;
        category.icon = record.draft.icon;
        category.updated_by = record.acting_user;
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: CategoryId,
        deleted_by: UserId,
    ) -> Result<bool, StoreError> {
        let mut categories = self.categories.lock().unwrap();
        match categories
            .get_mut(&id)
            .filter(|c| c.tenant_id == tenant_id && c.deactivated_at.is_none())
        {
            Some(category) => {
                let now = Utc::now();
                category.deactivated_at = Some(now);
                category.updated_by = deleted_by;
                category.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
