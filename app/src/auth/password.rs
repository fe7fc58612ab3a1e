//! Argon2 password hashing.
//!
//! Hashing is CPU-bound, so the async entry points run it on the blocking pool.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use eventease_core::{BookingError, Result};

/// Argon2id hasher with configurable cost.
#[derive(Clone, Debug)]
pub struct PasswordHashing {
    params: Params,
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHashing {
    /// Hasher with the given memory cost (KiB) and iteration count.
    ///
    /// Invalid costs fall back to the Argon2 defaults.
    #[must_use]
    pub fn new(memory_kib: u32, iterations: u32) -> Self {
        match Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None) {
            Ok(params) => Self { params },
            Err(error) => {
                tracing::warn!(%error, memory_kib, iterations, "Invalid Argon2 cost, using defaults");
                Self::default()
            }
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a password into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] if hashing fails.
    pub async fn hash(&self, password: &str) -> Result<String> {
        let hashing = self.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hashing.hash_blocking(&password))
            .await
            .map_err(|e| BookingError::Storage(format!("password hashing task failed: {e}")))?
    }

    /// Checks a password against a PHC string. Malformed hashes never verify.
    pub async fn verify(&self, password: &str, phc: &str) -> bool {
        let hashing = self.clone();
        let password = password.to_owned();
        let phc = phc.to_owned();
        tokio::task::spawn_blocking(move || hashing.verify_blocking(&password, &phc))
            .await
            .unwrap_or_else(|error| {
                tracing::error!(%error, "Password verification task failed");
                false
            })
    }

    fn hash_blocking(&self, password: &str) -> Result<String> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| BookingError::Storage(format!("salt generation failed: {e}")))?;

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| BookingError::Storage(format!("password hashing failed: {e}")))
    }

    fn verify_blocking(&self, password: &str, phc: &str) -> bool {
        PasswordHash::new(phc)
            .is_ok_and(|hash| self.argon2().verify_password(password.as_bytes(), &hash).is_ok())
    }
}
