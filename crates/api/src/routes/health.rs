//! `GET /health`: readiness of this instance for a load balancer.
//!
//! The service is only useful with its credential and pipeline store, so an
//! unreachable database makes the instance unready (503) rather than merely
//! "degraded".

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"unavailable"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn from_db_state(db_healthy: bool) -> (StatusCode, Self) {
        let (code, status) = if db_healthy {
            (StatusCode::OK, "ok")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        };
        (
            code,
            Self {
                status,
                version: env!("CARGO_PKG_VERSION"),
                db_healthy,
            },
        )
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match ekono_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable, reporting unready");
            false
        }
    };
    let (code, body) = HealthResponse::from_db_state(db_healthy);
    (code, Json(body))
}

/// Public route; no bearer token required.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
