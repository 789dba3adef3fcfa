//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed access/refresh token issuance and validation.
//! - [`credentials`] -- registration and username/password authentication.

pub mod credentials;
pub mod jwt;
pub mod password;
