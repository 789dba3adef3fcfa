//! Handlers for registration, login, token refresh, and token introspection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ekono_core::types::DbId;
use ekono_db::models::user::UserResponse;
use ekono_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::credentials;
use crate::auth::jwt::{self, issue_access_token, issue_refresh_token};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,
    /// Stored as given; only the length is checked.
    #[validate(length(min = 1, max = 100, message = "Email must be 1-100 characters"))]
    pub email: String,
    #[validate(length(min = 1, max = 1024, message = "Password must be 1-1024 characters"))]
    pub password: String,
}

/// Request body for `POST /auth`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Simple `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Successful refresh response.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Response for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub me: UserResponse,
}

/// Response for `GET /auth/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create an account. Returns 201, or 400 if the username or email is taken.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    credentials::register(
        &state.pool,
        &state.config.password,
        input.username,
        input.email,
        input.password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully",
        }),
    ))
}

/// POST /auth
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenPairResponse>> {
    let user = credentials::authenticate(
        &state.pool,
        &state.config.password,
        &input.username,
        &input.password,
    )
    .await?;

    let jwt_config = &state.config.jwt;
    let access_token = issue_access_token(user.id, jwt_config)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = issue_refresh_token(user.id, jwt_config)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
        expires_in: jwt_config.access_ttl_secs(),
    }))
}

/// POST /auth/refresh
///
/// Exchange a valid refresh token for a new access token. The refresh token
/// is not rotated.
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let (user_id, access_token) = jwt::refresh(&input.refresh_token, &state.config.jwt)
        .map_err(|e| match e {
            jwt::TokenError::Encoding(err) => {
                AppError::InternalError(format!("Token generation error: {err}"))
            }
            rejected => AppError::unauthenticated(format!("Refresh token rejected: {rejected}")),
        })?;

    ensure_user_exists(&state, user_id).await?;

    Ok(Json(AccessTokenResponse {
        access_token,
        expires_in: state.config.jwt.access_ttl_secs(),
    }))
}

/// GET /auth/me
///
/// Return the authenticated caller's public profile.
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        me: UserResponse {
            id: auth_user.user_id,
            username: auth_user.username,
            email: auth_user.email,
            created_at: auth_user.created_at,
        },
    })
}

/// GET /auth/verify
///
/// Reaching the handler means the bearer token was accepted.
pub async fn verify(_auth_user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_user_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::unauthenticated(format!("Refresh token subject {user_id} no longer exists"))
        })
}
