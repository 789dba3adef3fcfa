//! JWT access- and refresh-token issuance, validation, and exchange.
//!
//! Both token kinds are HS256-signed JWTs sharing one secret and one
//! [`Claims`] shape; they differ only in lifetime and in the `kind` claim.
//! Validation checks the kind, so a refresh token is never accepted where an
//! access token is expected and vice versa.

use chrono::Utc;
use ekono_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEV_JWT_SECRET: &str = "ekono-dev-secret-do-not-use-in-production";

/// Default access token expiry in minutes (24 hours).
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 24 * 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Which of the two token classes a JWT belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4), useful for audit trails.
    pub jti: String,
}

/// Why a token could not be issued or was rejected.
///
/// `Invalid` and `Expired` are kept apart for diagnostics only; the HTTP
/// layer reports both as the same 401.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is invalid: {0}")]
    Invalid(String),

    #[error("token has expired")]
    Expired,

    #[error("token encoding failed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 1440).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Default            |
    /// |----------------------------|--------------------|
    /// | `JWT_SECRET`               | [`DEV_JWT_SECRET`] |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | `1440`             |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | `7`                |
    ///
    /// The secret is read once at startup and never rotated while the process
    /// runs. Falling back to the development secret logs a warning.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is set but empty, or if an expiry is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => {
                assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
                secret
            }
            Err(_) => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the built-in development secret. \
                     Set JWT_SECRET for any real deployment."
                );
                DEV_JWT_SECRET.to_string()
            }
        };

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");
        assert!(
            access_token_expiry_mins > 0,
            "JWT_ACCESS_EXPIRY_MINS must be positive"
        );

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");
        assert!(
            refresh_token_expiry_days > 0,
            "JWT_REFRESH_EXPIRY_DAYS must be positive"
        );

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }

    /// Access token lifetime in seconds.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Refresh token lifetime in seconds.
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_token_expiry_days * 24 * 60 * 60
    }

    fn ttl_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_secs(),
            TokenKind::Refresh => self.refresh_ttl_secs(),
        }
    }
}

/// Issue a short-lived access token for the given user.
pub fn issue_access_token(user_id: DbId, config: &JwtConfig) -> Result<String, TokenError> {
    issue_token(user_id, TokenKind::Access, config)
}

/// Issue a long-lived refresh token for the given user.
pub fn issue_refresh_token(user_id: DbId, config: &JwtConfig) -> Result<String, TokenError> {
    issue_token(user_id, TokenKind::Refresh, config)
}

fn issue_token(user_id: DbId, kind: TokenKind, config: &JwtConfig) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        kind,
        exp: now + config.ttl_secs(kind),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Validate a token's signature, expiry, and kind, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    expected: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256), // validates exp
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })?;

    let claims = token_data.claims;
    if claims.kind != expected {
        return Err(TokenError::Invalid(format!(
            "expected {expected:?} token, got {:?}",
            claims.kind
        )));
    }
    Ok(claims)
}

/// Validate an access token, returning its [`Claims`].
pub fn validate_access_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_token(token, TokenKind::Access, config)
}

/// Validate a refresh token, returning its [`Claims`].
pub fn validate_refresh_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_token(token, TokenKind::Refresh, config)
}

/// Exchange a valid refresh token for a fresh access token.
///
/// Returns the embedded user id together with the new access token. The
/// refresh token itself is neither rotated nor recorded.
pub fn refresh(refresh_token: &str, config: &JwtConfig) -> Result<(DbId, String), TokenError> {
    let claims = validate_refresh_token(refresh_token, config)?;
    let access_token = issue_access_token(claims.sub, config)?;
    Ok((claims.sub, access_token))
}
