//! Route definitions for registration and authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes, mounted at the root.
///
/// ```text
/// POST /register      -> register
/// POST /auth          -> login
/// POST /auth/refresh  -> refresh
/// GET  /auth/me       -> me (requires auth)
/// GET  /auth/verify   -> verify (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/auth", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        .route("/auth/verify", get(auth::verify))
}
