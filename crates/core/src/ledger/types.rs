//! Ledger domain types.
//!
//! Caller payloads (`TransactionInput`) carry no tenant or audit fields; the
//! service builds `NewTransaction` / `TransactionChanges` from the context, so a
//! payload can never choose its tenant or its author.

use chrono::{DateTime, NaiveDate, Utc};
use fintrack_shared::types::{AccountId, CategoryId, TagId, TenantId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning tenant (immutable).
    pub tenant_id: TenantId,
    /// Source account.
    pub from_account_id: AccountId,
    /// Counter account; `None` for one-sided movements (income, expense).
    pub to_account_id: Option<AccountId>,
    /// Amount moved (positive).
    pub amount: Decimal,
    /// ISO-style currency code, never empty once persisted.
    pub currency: String,
    /// Date the movement happened.
    pub transaction_date: NaiveDate,
    /// Free-form description.
    pub description: Option<String>,
    /// Category, if classified.
    pub category_id: Option<CategoryId>,
    /// Linked tags.
    pub tag_ids: Vec<TagId>,
    /// User who created the transaction.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// User who last changed the transaction.
    pub updated_by: UserId,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Set when soft-deleted.
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied transaction fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionInput {
    /// Source account (required).
    pub from_account_id: Option<AccountId>,
    /// Counter account.
    #[serde(default)]
    pub to_account_id: Option<AccountId>,
    /// Amount (must be positive). Accepted only as a decimal string so no
    /// digit passes through binary floating point.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Currency; `None` or blank defaults to the source account's currency on create.
    #[serde(default)]
    pub currency: Option<String>,
    /// Date the movement happened.
    pub transaction_date: NaiveDate,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl TransactionInput {
    /// The explicitly requested currency, if any (trimmed, blank treated as absent).
    #[must_use]
    pub fn requested_currency(&self) -> Option<&str> {
        self.currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// The counter account, ignoring nil IDs.
    #[must_use]
    pub fn counter_account(&self) -> Option<AccountId> {
        self.to_account_id.filter(|id| !id.is_nil())
    }
}

/// A validated, stamped, currency-resolved transaction ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Source account.
    pub from_account_id: AccountId,
    /// Counter account.
    pub to_account_id: Option<AccountId>,
    /// Amount.
    pub amount: Decimal,
    /// Resolved currency.
    pub currency: String,
    /// Date the movement happened.
    pub transaction_date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category_id: Option<CategoryId>,
    /// Acting user (creator).
    pub created_by: UserId,
    /// Acting user (last editor).
    pub updated_by: UserId,
}

/// New values for the mutable fields of an existing transaction.
///
/// `created_by`, `created_at` and `tenant_id` are not part of it and are never
/// changed by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionChanges {
    /// Transaction to change.
    pub id: TransactionId,
    /// Tenant the change is scoped to.
    pub tenant_id: TenantId,
    /// Source account.
    pub from_account_id: AccountId,
    /// Counter account.
    pub to_account_id: Option<AccountId>,
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Date the movement happened.
    pub transaction_date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category_id: Option<CategoryId>,
    /// Acting user.
    pub updated_by: UserId,
}

/// Filter options for listing transactions. All criteria are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    /// Earliest transaction date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Latest transaction date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Account on either side of the transaction.
    pub account_id: Option<AccountId>,
    /// Linked tag.
    pub tag_id: Option<TagId>,
    /// Category.
    pub category_id: Option<CategoryId>,
}

impl TransactionFilter {
    /// Returns true if `tx` satisfies every criterion.
    ///
    /// Used by in-memory stores; relational stores translate the filter to SQL.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.date_from.is_none_or(|from| tx.transaction_date >= from)
            && self.date_to.is_none_or(|to| tx.transaction_date <= to)
            && self.account_id.is_none_or(|account| {
                tx.from_account_id == account || tx.to_account_id == Some(account)
            })
            && self.tag_id.is_none_or(|tag| tx.tag_ids.contains(&tag))
            && self.category_id.is_none_or(|cat| tx.category_id == Some(cat))
    }
}

/// The account fields the ledger needs for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The account's currency code.
    pub currency: String,
}
