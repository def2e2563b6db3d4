//! Errors reported by persistence collaborators.
//!
//! Every capability trait in the core (`TransactionStore`, `AccountLookup`,
//! `ClassificationStore`) reports failures with `StoreError`. Absence is not an
//! error at this level: lookups return `Option` and deletes return `bool`.

use thiserror::Error;

/// Persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A referenced record does not exist or is not visible to the tenant.
    #[error("referenced record is missing: {0}")]
    MissingReference(String),

    /// Driver, connection, or query failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a missing reference error.
    #[must_use]
    pub fn missing_reference(what: impl Into<String>) -> Self {
        Self::MissingReference(what.into())
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
