//! Per-request tenancy context.
//!
//! Every core operation receives a `TenantContext` explicitly. It is built once
//! per request by the transport layer and never mutated afterwards.

use fintrack_shared::types::{TenantId, UserId};
use thiserror::Error;

/// Context precondition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TenancyError {
    /// No tenant was supplied for the call.
    #[error("tenant context is required")]
    MissingTenant,

    /// No acting user was supplied for the call.
    #[error("user context is required")]
    MissingUser,
}

/// The tenant and acting user a call runs on behalf of.
///
/// Nil UUIDs are normalized to absent so that an "empty" identifier can never
/// pass as a real tenant or user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TenantContext {
    tenant_id: Option<TenantId>,
    user_id: Option<UserId>,
}

impl TenantContext {
    /// Creates a context from optional tenant and user identifiers.
    #[must_use]
    pub fn new(tenant_id: Option<TenantId>, user_id: Option<UserId>) -> Self {
        Self {
            tenant_id: tenant_id.filter(|id| !id.is_nil()),
            user_id: user_id.filter(|id| !id.is_nil()),
        }
    }

    /// Creates a fully populated context.
    #[must_use]
    pub fn for_user(tenant_id: TenantId, user_id: UserId) -> Self {
        Self::new(Some(tenant_id), Some(user_id))
    }

    /// Returns the current tenant, if any.
    #[must_use]
    pub const fn current_tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    /// Returns the acting user, if any.
    #[must_use]
    pub const fn current_user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the tenant or fails closed.
    pub fn require_tenant(&self) -> Result<TenantId, TenancyError> {
        self.tenant_id.ok_or(TenancyError::MissingTenant)
    }

    /// Returns the acting user or fails closed.
    pub fn require_user(&self) -> Result<UserId, TenancyError> {
        self.user_id.ok_or(TenancyError::MissingUser)
    }

    /// Returns both tenant and user. The tenant is checked first.
    pub fn require_both(&self) -> Result<(TenantId, UserId), TenancyError> {
        Ok((self.require_tenant()?, self.require_user()?))
    }
}
