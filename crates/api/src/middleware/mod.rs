//! Request middleware and extractors.

pub mod auth;
pub mod tenant;

pub use auth::auth_middleware;
pub use tenant::{TENANT_HEADER, Tenancy};
