//! Error types for the generation core.

/// Errors produced by the generation engine.
///
/// The engine has exactly two failure modes. Neither is ever retried
/// internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// The request is internally inconsistent.
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// The secure random source failed or under-delivered.
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),
}

impl GeneratorError {
    /// Short machine-readable reason, used as a metrics label.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidConstraint(_) => "invalid_constraint",
            Self::EntropyUnavailable(_) => "entropy_unavailable",
        }
    }
}

/// Errors produced when decoding a presentation string back into bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// Hex input had an odd length or a non-hex character.
    #[error("invalid hex: {0}")]
    Hex(String),

    /// Base64 input could not be decoded.
    #[error("invalid base64: {0}")]
    Base64(String),
}

impl From<hex::FromHexError> for EncodingError {
    fn from(err: hex::FromHexError) -> Self {
        Self::Hex(err.to_string())
    }
}

impl From<base64::DecodeError> for EncodingError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err.to_string())
    }
}

/// Result type alias using `GeneratorError`.
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_labels() {
        assert_eq!(
            GeneratorError::InvalidConstraint("x".to_string()).reason(),
            "invalid_constraint"
        );
        assert_eq!(
            GeneratorError::EntropyUnavailable("x".to_string()).reason(),
            "entropy_unavailable"
        );
    }

    #[test]
    fn test_display_keeps_cause() {
        let err = GeneratorError::EntropyUnavailable("getrandom failed".to_string());
        assert_eq!(err.to_string(), "Entropy unavailable: getrandom failed");
    }
}
