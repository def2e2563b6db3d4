//! Repository implementations of the core persistence traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query filters by tenant and skips deactivated rows.

pub mod account;
pub mod category;
pub mod tag;
pub mod transaction;

pub use account::{AccountRepository, CreateAccountInput};
pub use category::CategoryRepository;
pub use tag::TagRepository;
pub use transaction::TransactionRepository;

use chrono::Utc;
use fintrack_core::StoreError;
use sea_orm::DbErr;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Maps a driver failure onto the core's store error.
pub(crate) fn db_failure(err: DbErr) -> StoreError {
    StoreError::backend(err.to_string())
}

/// Current time in the column representation.
pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}
