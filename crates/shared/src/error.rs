//! Application-wide error types.
//!
//! Domain errors from the core are mapped onto `AppError` at the transport
//! boundary, so status codes and error codes are decided in one place.

use std::collections::BTreeMap;

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or acting user missing.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Request is missing a required precondition (e.g. tenant header).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (or not visible to the caller's tenant).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error with per-field reasons.
    #[error("Validation error: {message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Field name to reason.
        fields: BTreeMap<String, String>,
    },

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Primary effect persisted, secondary effect failed.
    #[error("Partially completed: {message}")]
    PartialFailure {
        /// What failed.
        message: String,
        /// ID of the resource that was persisted.
        resource_id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::BadRequest(_) | Self::Validation { .. } => 400,
            Self::NotFound(_) => 404,
            Self::BusinessRule(_) => 422,
            Self::PartialFailure { .. } | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::PartialFailure { .. } => "PARTIAL_FAILURE",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true when the message is safe to show to end users.
    ///
    /// Storage messages may carry driver details and are replaced by a generic
    /// message at the edge.
    #[must_use]
    pub const fn is_client_safe(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}
