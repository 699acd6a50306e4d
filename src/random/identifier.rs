//! Identifier byte generator.

use crate::random::encoding::Presentations;
use crate::random::error::GeneratorResult;
use crate::random::source::SecureRandom;

/// Raw random bytes backing an opaque identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierBytes(Vec<u8>);

impl IdentifierBytes {
    /// Wrap existing bytes (used when re-deriving an imported identifier).
    #[must_use]
    pub const fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode in every presentation format.
    #[must_use]
    pub fn presentations(&self) -> Presentations {
        Presentations::from_bytes(&self.0)
    }
}

/// Generates identifier bytes. No category logic applies.
#[derive(Debug, Clone, Default)]
pub struct IdentifierGenerator {
    random: SecureRandom,
}

impl IdentifierGenerator {
    /// Create a generator over the given random source.
    #[must_use]
    pub const fn new(random: SecureRandom) -> Self {
        Self { random }
    }

    /// Generate `byte_length` random bytes.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::EntropyUnavailable` if the source fails or
    /// under-delivers.
    pub fn generate(&self, byte_length: usize) -> GeneratorResult<IdentifierBytes> {
        self.random.random_bytes(byte_length).map(IdentifierBytes)
    }
}
