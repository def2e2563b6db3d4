//! Registry error types.

use thiserror::Error;

use crate::fields::FieldErrors;
use crate::store::StoreError;
use crate::tenancy::TenancyError;
use fintrack_shared::types::CategoryId;

/// Errors that can occur during tag and category operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No tenant in the call context.
    #[error("tenant context is required")]
    MissingTenantContext,

    /// No acting user in the call context.
    #[error("user context is required")]
    MissingUserContext,

    /// Draft failed structural validation.
    #[error("validation failed: {field_errors}")]
    ValidationFailed {
        /// Field name to reason.
        field_errors: FieldErrors,
    },

    /// Entity absent, deactivated, or owned by another tenant.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind.
        kind: &'static str,
        /// Requested ID.
        id: String,
    },

    /// Parent category absent or owned by another tenant.
    #[error("parent category not found: {0}")]
    ParentNotFound(CategoryId),

    /// Parent assignment would make a category its own ancestor.
    #[error("category {0} cannot be nested under its own descendant")]
    CategoryCycle(CategoryId),

    /// Persistence failure.
    #[error("failed to {operation} {kind}{}: {source}", .entity_id.as_ref().map(|id| format!(" {id}")).unwrap_or_default())]
    Store {
        /// Operation name.
        operation: &'static str,
        /// Entity kind.
        kind: &'static str,
        /// Entity the operation targeted, when known.
        entity_id: Option<String>,
        /// Underlying failure.
        #[source]
        source: StoreError,
    },
}

impl From<TenancyError> for RegistryError {
    fn from(err: TenancyError) -> Self {
        match err {
            TenancyError::MissingTenant => Self::MissingTenantContext,
            TenancyError::MissingUser => Self::MissingUserContext,
        }
    }
}

impl RegistryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTenantContext => "MISSING_TENANT_CONTEXT",
            Self::MissingUserContext => "MISSING_USER_CONTEXT",
            Self::ValidationFailed { .. } => "VALIDATION_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::CategoryCycle(_) => "CATEGORY_CYCLE",
            Self::Store { .. } => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingTenantContext | Self::ValidationFailed { .. } => 400,
            Self::MissingUserContext => 401,
            Self::NotFound { .. } => 404,
            Self::ParentNotFound(_) | Self::CategoryCycle(_) => 422,
            Self::Store { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tenancy_error() {
        assert!(matches!(
            RegistryError::from(TenancyError::MissingTenant),
            RegistryError::MissingTenantContext
        ));
        assert!(matches!(
            RegistryError::from(TenancyError::MissingUser),
            RegistryError::MissingUserContext
        ));
    }

    #[test]
    fn test_codes_and_statuses() {
        let err = RegistryError::NotFound {
            kind: "tag",
            id: "abc".to_string(),
        };
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.to_string(), "tag not found: abc");

        let err = RegistryError::Store {
            operation: "create",
            kind: "category",
            entity_id: None,
            source: StoreError::backend("connection reset"),
        };
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(
            err.to_string(),
            "failed to create category: storage backend error: connection reset"
        );

        let err = RegistryError::Store {
            operation: "delete",
            kind: "tag",
            entity_id: Some("abc".to_string()),
            source: StoreError::backend("connection reset"),
        };
        assert_eq!(
            err.to_string(),
            "failed to delete tag abc: storage backend error: connection reset"
        );
    }
}
