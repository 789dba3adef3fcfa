use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A username or email collided with an existing account.
    #[error("Duplicate credential: {0}")]
    DuplicateCredential(String),

    /// Login failed. Deliberately carries no detail about which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired, or unresolvable bearer token. The message
    /// is for logs only; clients always see the same generic text.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
