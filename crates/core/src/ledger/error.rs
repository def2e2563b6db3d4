//! Ledger error types.
//!
//! Every failure is an ordinary returned outcome. `PartialFailure` is the only
//! variant raised after something was persisted; all others guarantee nothing
//! was written.

use fintrack_shared::types::{AccountId, CategoryId, TransactionId};
use thiserror::Error;

use crate::fields::FieldErrors;
use crate::store::StoreError;
use crate::tenancy::TenancyError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Context Errors ==========
    /// No tenant in the call context.
    #[error("tenant context is required")]
    MissingTenantContext,

    /// No acting user in the call context.
    #[error("user context is required")]
    MissingUserContext,

    // ========== Validation Errors ==========
    /// Payload failed structural validation.
    #[error("validation failed: {field_errors}")]
    ValidationFailed {
        /// Field name to reason.
        field_errors: FieldErrors,
    },

    // ========== Reference Errors ==========
    /// Referenced account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced account belongs to a different tenant.
    #[error("{field} {account_id} does not belong to this tenant")]
    CrossTenantReference {
        /// Payload field holding the reference.
        field: &'static str,
        /// The foreign account.
        account_id: AccountId,
    },

    /// Referenced category is absent or not visible to the tenant.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    // ========== Lookup Errors ==========
    /// Transaction absent, deactivated, or owned by another tenant.
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    // ========== Post-persistence Errors ==========
    /// The transaction was saved but linking its tags failed.
    #[error("transaction {transaction_id} saved but failed to link tags: {source}")]
    PartialFailure {
        /// The persisted transaction.
        transaction_id: TransactionId,
        /// Why tag linking failed.
        #[source]
        source: StoreError,
    },

    // ========== Storage Errors ==========
    /// Persistence failure before anything was written.
    #[error("failed to {operation} {kind}{}: {source}", .entity_id.as_ref().map(|id| format!(" {id}")).unwrap_or_default())]
    Store {
        /// Operation name.
        operation: &'static str,
        /// Kind of record the operation targeted.
        kind: &'static str,
        /// Entity the operation targeted, when known.
        entity_id: Option<String>,
        /// Underlying failure.
        #[source]
        source: StoreError,
    },
}

impl From<TenancyError> for LedgerError {
    fn from(err: TenancyError) -> Self {
        match err {
            TenancyError::MissingTenant => Self::MissingTenantContext,
            TenancyError::MissingUser => Self::MissingUserContext,
        }
    }
}

impl From<FieldErrors> for LedgerError {
    fn from(field_errors: FieldErrors) -> Self {
        Self::ValidationFailed { field_errors }
    }
}

impl LedgerError {
    /// Wraps a store failure with the transaction operation and ID it concerned.
    #[must_use]
    pub fn store(operation: &'static str, entity_id: Option<String>, source: StoreError) -> Self {
        Self::Store {
            operation,
            kind: "transaction",
            entity_id,
            source,
        }
    }

    /// Wraps a store failure raised while resolving a referenced record.
    #[must_use]
    pub fn reference_store(kind: &'static str, entity_id: String, source: StoreError) -> Self {
        Self::Store {
            operation: "resolve",
            kind,
            entity_id: Some(entity_id),
            source,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTenantContext => "MISSING_TENANT_CONTEXT",
            Self::MissingUserContext => "MISSING_USER_CONTEXT",
            Self::ValidationFailed { .. } => "VALIDATION_FAILED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CrossTenantReference { .. } => "CROSS_TENANT_REFERENCE",
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::NotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::PartialFailure { .. } => "PARTIAL_FAILURE",
            Self::Store { .. } => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - context and validation errors
            Self::MissingTenantContext | Self::ValidationFailed { .. } => 400,

            // 401 Unauthorized - no acting user
            Self::MissingUserContext => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 422 Unprocessable - references the caller cannot use
            Self::AccountNotFound(_)
            | Self::CrossTenantReference { .. }
            | Self::CategoryNotFound(_) => 422,

            // 500 Internal Server Error
            Self::PartialFailure { .. } | Self::Store { .. } => 500,
        }
    }

    /// Returns true if something was persisted before the failure.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartialFailure { .. })
    }
}
