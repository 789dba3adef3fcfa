pub mod auth;
pub mod health;
pub mod pipelines;

use axum::http::Method;
use axum::Router;

use crate::state::AppState;

/// Every HTTP method mounted below. CORS preflight allows exactly these.
pub const MOUNTED_METHODS: [Method; 2] = [Method::GET, Method::POST];

/// Build the full route tree.
///
/// ```text
/// /health                     readiness (public)
///
/// /register                   register (public)
/// /auth                       login (public)
/// /auth/refresh               refresh (public)
/// /auth/me                    current user (auth required)
/// /auth/verify                token check (auth required)
///
/// /pipelines                  list, create (auth required)
/// /pipelines/{id}             get (auth required, owner only)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(pipelines::router())
}
