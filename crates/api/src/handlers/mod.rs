//! Request handlers.
//!
//! Handlers validate input at the boundary, delegate to `auth` or to the
//! repositories in `ekono_db`, and map failures via [`crate::error::AppError`].

pub mod auth;
pub mod pipelines;
