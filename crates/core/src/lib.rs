//! Core business logic for Fintrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the capability traits defined here and
//! implemented by the db crate.
//!
//! # Modules
//!
//! - `tenancy` - Per-request tenant and acting-user context
//! - `ledger` - Transaction validation and lifecycle
//! - `registry` - Tag and category lifecycle
//! - `fields` - Field-keyed validation errors
//! - `store` - Persistence failures reported by collaborators

pub mod fields;
pub mod ledger;
pub mod registry;
pub mod store;
pub mod tenancy;

#[cfg(test)]
mod testing;

pub use fields::FieldErrors;
pub use store::StoreError;
pub use tenancy::{TenancyError, TenantContext};
