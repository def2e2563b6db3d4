//! Tenancy extractor.
//!
//! Builds the per-request `TenantContext` from the `X-Tenant-ID` header and the
//! authenticated subject. Absent values are left empty so the core services
//! can reject them with their own errors.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use fintrack_core::TenantContext;
use fintrack_shared::Claims;
use fintrack_shared::types::TenantId;
use serde_json::json;

/// Header carrying the caller's tenant.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Extractor for the request's tenancy context.
///
/// Use this in handlers to pass the context to core services:
///
/// ```ignore
/// async fn handler(Tenancy(ctx): Tenancy) -> impl IntoResponse {
///     service.list(&ctx).await
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tenancy(pub TenantContext);

impl<S> FromRequestParts<S> for Tenancy
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = match parts.headers.get(TENANT_HEADER) {
            None => None,
            Some(value) => {
                let parsed = value
                    .to_str()
                    .ok()
                    .map(str::trim)
                    .filter(|raw| !raw.is_empty())
                    .map(str::parse::<TenantId>);

                match parsed {
                    None => None,
                    Some(Ok(id)) => Some(id),
                    Some(Err(_)) => {
                        return Err((
                            StatusCode::BAD_REQUEST,
                            Json(json!({
                                "error": "invalid_tenant_id",
                                "message": "X-Tenant-ID must be a UUID"
                            })),
                        ));
                    }
                }
            }
        };

        let user_id = parts.extensions.get::<Claims>().map(Claims::user_id);

        Ok(Self(TenantContext::new(tenant_id, user_id)))
    }
}
