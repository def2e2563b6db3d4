//! Mapping of domain errors onto HTTP responses.
//!
//! Domain errors become an `AppError` (which decides the status) plus the
//! domain's own error code. Storage failures are logged here and replaced by a
//! generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fintrack_core::ledger::LedgerError;
use fintrack_core::registry::RegistryError;
use fintrack_shared::AppError;
use serde_json::json;
use tracing::error;

/// A domain failure ready to be rendered.
#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    inner: AppError,
}

impl ApiError {
    /// The stable error code sent to clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// The underlying application error.
    #[must_use]
    pub const fn app_error(&self) -> &AppError {
        &self.inner
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let code = err.error_code();
        let inner = match err {
            LedgerError::MissingTenantContext => AppError::BadRequest(err.to_string()),
            LedgerError::MissingUserContext => AppError::Unauthorized(err.to_string()),
            LedgerError::ValidationFailed { field_errors } => AppError::Validation {
                message: "transaction is invalid".to_string(),
                fields: field_errors.into_inner(),
            },
            LedgerError::AccountNotFound(_)
            | LedgerError::CrossTenantReference { .. }
            | LedgerError::CategoryNotFound(_) => AppError::BusinessRule(err.to_string()),
            LedgerError::NotFound(_) => AppError::NotFound(err.to_string()),
            LedgerError::PartialFailure { transaction_id, .. } => AppError::PartialFailure {
                message: "transaction saved but failed to link tags".to_string(),
                resource_id: transaction_id.to_string(),
            },
            LedgerError::Store { .. } => {
                error!(error = %err, "Ledger store failure");
                AppError::Database(err.to_string())
            }
        };
        Self { code, inner }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let code = err.error_code();
        let inner = match err {
            RegistryError::MissingTenantContext => AppError::BadRequest(err.to_string()),
            RegistryError::MissingUserContext => AppError::Unauthorized(err.to_string()),
            RegistryError::ValidationFailed { field_errors } => AppError::Validation {
                message: "request is invalid".to_string(),
                fields: field_errors.into_inner(),
            },
            RegistryError::NotFound { .. } => AppError::NotFound(err.to_string()),
            RegistryError::ParentNotFound(_) | RegistryError::CategoryCycle(_) => {
                AppError::BusinessRule(err.to_string())
            }
            RegistryError::Store { .. } => {
                error!(error = %err, "Registry store failure");
                AppError::Database(err.to_string())
            }
        };
        Self { code, inner }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self.inner {
            AppError::Validation { message, fields } => json!({
                "error": self.code,
                "message": message,
                "fields": fields,
            }),
            AppError::PartialFailure {
                message,
                resource_id,
            } => json!({
                "error": self.code,
                "message": message,
                "resource_id": resource_id,
            }),
            ref other if !other.is_client_safe() => json!({
                "error": "internal_error",
                "message": "An error occurred",
            }),
            ref other => json!({
                "error": self.code,
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::FieldErrors;
    use fintrack_core::StoreError;
    use fintrack_shared::types::{AccountId, TransactionId};

    #[test]
    fn test_ledger_statuses() {
        let cases = [
            (LedgerError::MissingTenantContext, StatusCode::BAD_REQUEST),
            (LedgerError::MissingUserContext, StatusCode::UNAUTHORIZED),
            (
                LedgerError::from(FieldErrors::single("amount", "must be greater than zero")),
                StatusCode::BAD_REQUEST,
            ),
            (
                LedgerError::CrossTenantReference {
                    field: "from_account_id",
                    account_id: AccountId::new(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LedgerError::NotFound(TransactionId::new()),
                StatusCode::NOT_FOUND,
            ),
            (
                LedgerError::PartialFailure {
                    transaction_id: TransactionId::new(),
                    source: StoreError::backend("x"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let domain_status = err.http_status_code();
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
            assert_eq!(response.status().as_u16(), domain_status);
        }
    }

    #[test]
    fn test_registry_statuses_match_domain() {
        let cases = [
            RegistryError::MissingTenantContext,
            RegistryError::MissingUserContext,
            RegistryError::CategoryCycle(fintrack_shared::types::CategoryId::new()),
            RegistryError::NotFound {
                kind: "tag",
                id: "x".to_string(),
            },
        ];

        for err in cases {
            let domain_status = err.http_status_code();
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status().as_u16(), domain_status);
        }
    }

    #[test]
    fn test_store_failure_is_masked() {
        let err = ApiError::from(LedgerError::store(
            "create",
            None,
            StoreError::backend("password authentication failed"),
        ));
        assert_eq!(err.code(), "STORE_ERROR");
        assert!(!err.app_error().is_client_safe());
    }
}
