//! Handlers for the `/pipelines` resource.
//!
//! The owner is always the authenticated caller. Detail lookups for a
//! pipeline owned by someone else return the same 404 as a missing id.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ekono_core::error::CoreError;
use ekono_core::types::DbId;
use ekono_db::models::pipeline::{empty_document, CreatePipeline, Pipeline, PipelineSummary};
use ekono_db::repositories::PipelineRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /pipelines`.
///
/// Omitted or `null` documents default to `{}`. Unknown fields (including any
/// attempt to pass an `owner_id`) are rejected.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePipelineRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub configuration: Option<serde_json::Value>,
    pub permissions: Option<serde_json::Value>,
    pub limitations: Option<serde_json::Value>,
    pub billing_info: Option<serde_json::Value>,
}

impl From<CreatePipelineRequest> for CreatePipeline {
    fn from(input: CreatePipelineRequest) -> Self {
        Self {
            name: input.name,
            configuration: input.configuration.unwrap_or_else(empty_document),
            permissions: input.permissions.unwrap_or_else(empty_document),
            limitations: input.limitations.unwrap_or_else(empty_document),
            billing_info: input.billing_info.unwrap_or_else(empty_document),
        }
    }
}

/// Response for `POST /pipelines`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: DbId,
}

/// POST /pipelines
pub async fn create(
    auth_user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePipelineRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let pipeline = PipelineRepo::create(&state.pool, auth_user.user_id, &input.into()).await?;
    tracing::info!(
        pipeline_id = pipeline.id,
        owner_id = auth_user.user_id,
        "Pipeline created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Pipeline created",
            id: pipeline.id,
        }),
    ))
}

/// GET /pipelines
pub async fn list(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PipelineSummary>>> {
    let pipelines = PipelineRepo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(pipelines))
}

/// GET /pipelines/{id}
pub async fn get_by_id(
    auth_user: AuthUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<Pipeline>> {
    let pipeline = PipelineRepo::find_by_id_for_owner(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pipeline",
            id,
        }))?;
    Ok(Json(pipeline))
}
