//! Secure byte source.
//!
//! [`EntropySource`] is the injectable capability the generators draw from.
//! Production code binds it to the operating system CSPRNG through
//! [`OsEntropy`]; tests substitute replaying or failing doubles.
//!
//! [`SecureRandom`] layers the two primitives the generators need on top of a
//! source: exact-length byte reads and unbiased bounded indices.

use std::fmt;
use std::sync::Arc;

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::random::error::{GeneratorError, GeneratorResult};

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe for concurrent use.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with random bytes and return how many were written.
    ///
    /// Returning fewer bytes than `dest.len()` signals under-delivery and is
    /// treated as a failure by [`SecureRandom`].
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::EntropyUnavailable` if the source fails.
    fn fill(&self, dest: &mut [u8]) -> GeneratorResult<usize>;

    /// Name of the source for diagnostics.
    fn name(&self) -> &'static str;
}

/// Operating system CSPRNG (`getrandom` under the hood).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> GeneratorResult<usize> {
        let mut rng = OsRng;
        rng.try_fill_bytes(dest)
            .map_err(|e| GeneratorError::EntropyUnavailable(e.to_string()))?;
        Ok(dest.len())
    }

    fn name(&self) -> &'static str {
        "os"
    }
}

/// Exact-length bytes and unbiased indices over an [`EntropySource`].
#[derive(Clone)]
pub struct SecureRandom {
    source: Arc<dyn EntropySource>,
}

impl SecureRandom {
    /// Wrap an entropy source.
    #[must_use]
    pub fn new(source: Arc<dyn EntropySource>) -> Self {
        Self { source }
    }

    /// Bind to the operating system CSPRNG.
    #[must_use]
    pub fn os() -> Self {
        Self::new(Arc::new(OsEntropy))
    }

    /// Name of the underlying source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Read exactly `n` random bytes.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::EntropyUnavailable` if the source fails or
    /// returns fewer than `n` bytes.
    pub fn random_bytes(&self, n: usize) -> GeneratorResult<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        self.fill_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Draw a uniformly distributed index in `[0, bound)`.
    ///
    /// Uses rejection sampling over 64-bit words: draws below
    /// `2^64 mod bound` are discarded so every residue is equally likely.
    /// A bound of one returns zero without touching the source.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::InvalidConstraint` for a zero bound and
    /// `GeneratorError::EntropyUnavailable` if the source fails.
    pub fn random_index(&self, bound: usize) -> GeneratorResult<usize> {
        if bound == 0 {
            return Err(GeneratorError::InvalidConstraint(
                "cannot sample an index from an empty range".to_string(),
            ));
        }
        if bound == 1 {
            return Ok(0);
        }

        let range = u64::try_from(bound)
            .map_err(|_| GeneratorError::InvalidConstraint(format!("bound {bound} too large")))?;
        let threshold = range.wrapping_neg() % range;

        loop {
            let value = self.next_u64()?;
            if value >= threshold {
                return Ok(index_from(value % range));
            }
        }
    }

    /// Shuffle `items` in place with a Fisher–Yates exchange.
    ///
    /// Every permutation is equally likely given an unbiased source.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::EntropyUnavailable` if the source fails.
    pub fn shuffle<T>(&self, items: &mut [T]) -> GeneratorResult<()> {
        for i in (1..items.len()).rev() {
            let j = self.random_index(i + 1)?;
            items.swap(i, j);
        }
        Ok(())
    }

    fn next_u64(&self) -> GeneratorResult<u64> {
        let mut buf = [0u8; 8];
        self.fill_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn fill_exact(&self, dest: &mut [u8]) -> GeneratorResult<()> {
        if dest.is_empty() {
            return Ok(());
        }

        let written = self.source.fill(dest)?;
        if written < dest.len() {
            return Err(GeneratorError::EntropyUnavailable(format!(
                "{} source returned {written} of {} requested bytes",
                self.source.name(),
                dest.len()
            )));
        }
        Ok(())
    }
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::os()
    }
}

impl fmt::Debug for SecureRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureRandom")
            .field("source", &self.source.name())
            .finish()
    }
}

// `value` is already reduced below a bound that came from a `usize`.
#[allow(clippy::cast_possible_truncation)]
const fn index_from(value: u64) -> usize {
    value as usize
}
