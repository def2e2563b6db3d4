//! Tenant-scoped transaction ledger.
//!
//! This module implements the transaction lifecycle:
//! - Domain types and caller payloads
//! - Structural validation
//! - Persistence capabilities (`TransactionStore`, `AccountLookup`)
//! - The ledger service (create, read, list, update, soft delete)
//! - Error types for ledger operations

pub mod error;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use repository::{AccountLookup, TransactionStore};
pub use service::TransactionService;
pub use types::{
    AccountInfo, NewTransaction, Transaction, TransactionChanges, TransactionFilter,
    TransactionInput,
};
pub use validation::{MAX_DESCRIPTION_LEN, is_currency_code, validate_transaction};
