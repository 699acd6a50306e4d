//! bcrypt hashing for password resources.
//!
//! bcrypt is CPU-bound, so both hashing and verification run on the blocking
//! thread pool.

use crate::error::{AppError, Result};

/// Hashes and verifies password results.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password.
    ///
    /// # Errors
    ///
    /// Returns `HashFailed` if bcrypt rejects the input or the cost.
    pub async fn hash(&self, password: String) -> Result<String> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {e}")))?
            .map_err(|e| AppError::HashFailed(e.to_string()))
    }

    /// Check a password against a stored hash.
    ///
    /// A malformed hash counts as a mismatch.
    pub async fn verify(&self, password: String, hash: String) -> bool {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}
