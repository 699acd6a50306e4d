//! Generation core.
//!
//! Stateless engines that turn a declarative request into random output:
//!
//! - [`SecureRandom`]: exact-length bytes and unbiased indices over an
//!   injectable [`EntropySource`]
//! - [`StringGenerator`]: strings that satisfy per-category minimums
//! - [`IdentifierGenerator`]: raw identifier bytes and their encodings

pub mod charset;
pub mod encoding;
pub mod error;
pub mod generator;
pub mod identifier;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use charset::{Category, CategoryKind, DEFAULT_SPECIAL_CHARS};
pub use encoding::Presentations;
pub use error::{EncodingError, GeneratorError, GeneratorResult};
pub use generator::{GenerationRequest, GenerationResult, StringGenerator};
pub use identifier::{IdentifierBytes, IdentifierGenerator};
pub use source::{EntropySource, OsEntropy, SecureRandom};
