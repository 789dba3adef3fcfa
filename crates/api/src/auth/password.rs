//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2 cost parameters applied to newly created hashes.
#[derive(Debug, Clone, Default)]
pub struct PasswordConfig {
    pub params: Params,
}

impl PasswordConfig {
    /// Load Argon2 cost parameters from environment variables.
    ///
    /// | Env Var              | Default                         |
    /// |----------------------|---------------------------------|
    /// | `ARGON2_MEMORY_KIB`  | `Params::DEFAULT_M_COST` (19 MiB) |
    /// | `ARGON2_ITERATIONS`  | `Params::DEFAULT_T_COST` (2)    |
    /// | `ARGON2_PARALLELISM` | `Params::DEFAULT_P_COST` (1)    |
    ///
    /// # Panics
    ///
    /// Panics if a variable is not a valid `u32` or the combination is
    /// rejected by argon2 (e.g. memory below `8 * parallelism`).
    pub fn from_env() -> Self {
        let memory_kib = env_u32("ARGON2_MEMORY_KIB", Params::DEFAULT_M_COST);
        let iterations = env_u32("ARGON2_ITERATIONS", Params::DEFAULT_T_COST);
        let parallelism = env_u32("ARGON2_PARALLELISM", Params::DEFAULT_P_COST);

        let params = Params::new(memory_kib, iterations, parallelism, None)
            .expect("ARGON2_* variables must form valid Argon2 parameters");

        Self { params }
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .map(|v| {
            v.parse()
                .unwrap_or_else(|_| panic!("{key} must be a valid u32"))
        })
        .unwrap_or(default)
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(
    password: &str,
    config: &PasswordConfig,
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = config.hasher().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// The comparison is constant-time. Fails closed: a stored hash that cannot
/// be parsed or verified yields `false`, never an error the caller might
/// mishandle as success.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    // Params are read from the PHC string, not from the default instance.
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => true,
        Err(argon2::password_hash::Error::Password) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Password verification failed unexpectedly");
            false
        }
    }
}
