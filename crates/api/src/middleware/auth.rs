//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use ekono_core::types::{DbId, Timestamp};
use ekono_db::repositories::UserRepo;

use crate::auth::jwt::validate_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a JWT Bearer token in the `Authorization` header.
///
/// Use this as the first extractor parameter in any handler that requires
/// authentication; it runs before the body is read or the store is queried:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Every failure (missing header, bad scheme, bad signature, expired token,
/// refresh token presented, user no longer exists) produces the same 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// Unique login name.
    pub username: String,
    /// Unique contact address, as registered.
    pub email: String,
    /// When the account was registered.
    pub created_at: Timestamp,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::unauthenticated("Missing or malformed Authorization header")
        })?;

        let claims = validate_access_token(token, &state.config.jwt)
            .map_err(|e| AppError::unauthenticated(format!("Access token rejected: {e}")))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::unauthenticated(format!(
                    "Token subject {} does not resolve to a user",
                    claims.sub
                ))
            })?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}
