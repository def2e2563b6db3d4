//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod categories;
pub mod tags;
pub mod transaction_tags;
pub mod transactions;
