//! Tag and category registry.
//!
//! Tags and categories are tenant-scoped classification labels sharing one
//! lifecycle (audit stamps on create/update, soft delete). Categories may be
//! nested; the registry keeps the category tree acyclic.

pub mod error;
mod hierarchy;
pub mod repository;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_tests;

pub use error::RegistryError;
pub use repository::{CategoryStore, ClassificationStore, TagStore};
pub use service::{CategoryService, RegistryService, TagService};
pub use types::{Category, CategoryDraft, Classification, MAX_NAME_LEN, Stamped, Tag, TagDraft};
