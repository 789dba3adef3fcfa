//! Route definitions for the `/pipelines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pipelines;
use crate::state::AppState;

/// Pipeline routes. Every route requires a valid access token.
///
/// ```text
/// GET  /pipelines        -> list
/// POST /pipelines        -> create
/// GET  /pipelines/{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pipelines", get(pipelines::list).post(pipelines::create))
        .route("/pipelines/{id}", get(pipelines::get_by_id))
}
