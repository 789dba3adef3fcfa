//! Registration and login against the credential store.
//!
//! Password hashing is CPU-bound, so both operations run Argon2 on the
//! blocking thread pool rather than on the async workers.

use std::sync::OnceLock;

use ekono_core::error::CoreError;
use ekono_db::models::user::{CreateUser, User};
use ekono_db::repositories::UserRepo;
use ekono_db::DbPool;

use crate::auth::password::{hash_password, verify_password, PasswordConfig};
use crate::error::{AppError, AppResult};

/// Client-facing message for a username or email collision.
pub const DUPLICATE_CREDENTIAL_MESSAGE: &str = "Username or email already exists";

/// Register a new user, returning the created row.
///
/// The unique indexes on `users` decide conflicts; there is no lookup before
/// the insert. A conflict maps to [`CoreError::DuplicateCredential`] and
/// leaves the table untouched.
pub async fn register(
    pool: &DbPool,
    config: &PasswordConfig,
    username: String,
    email: String,
    password: String,
) -> AppResult<User> {
    let config = config.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        username,
        email,
        password_hash,
    };

    match UserRepo::create(pool, &input).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "User registered");
            Ok(user)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::info!(username = %input.username, "Registration rejected: duplicate credential");
            Err(AppError::Core(CoreError::DuplicateCredential(
                DUPLICATE_CREDENTIAL_MESSAGE.into(),
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Check a username/password pair, returning the matching user.
///
/// An unknown username and a wrong password both yield
/// [`CoreError::InvalidCredentials`]. On an unknown username a throwaway hash
/// is still verified so the two cases take comparable time.
pub async fn authenticate(
    pool: &DbPool,
    config: &PasswordConfig,
    username: &str,
    password: &str,
) -> AppResult<User> {
    let user = UserRepo::find_by_username(pool, username).await?;

    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let password = password.to_owned();
    let config = config.clone();
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_password(&password, dummy_hash(&config));
            false
        }
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?;

    match user {
        Some(user) if verified => {
            tracing::info!(user_id = user.id, "User authenticated");
            Ok(user)
        }
        _ => {
            tracing::info!(username = %username, "Login rejected");
            Err(AppError::Core(CoreError::InvalidCredentials))
        }
    }
}

/// A valid hash of a fixed string, computed once on first use.
fn dummy_hash(config: &PasswordConfig) -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("ekono-timing-equalizer", config).unwrap_or_default())
}
