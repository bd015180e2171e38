//! Account password hashing for guest, staff, and admin logins.
//!
//! Passwords are stored as Argon2id PHC strings. The salt and the
//! parameters travel inside the encoded hash, so verification needs no
//! state beyond the stored string and old hashes keep verifying after a
//! parameter change.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use roomhub_core::error::AppError;

/// Hashes and verifies account passwords with Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher with the recommended Argon2id parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// A wrong password is `Ok(false)`; only a malformed stored hash or
    /// an operational failure is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Stored password hash is malformed: {e}")))?;

        match self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
