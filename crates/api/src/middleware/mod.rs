//! Request authorization.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT Bearer token and
//!   rejects the request before the handler runs if that fails.

pub mod auth;
