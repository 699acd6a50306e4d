//! Error code constants.
//!
//! Error codes are organized by category:
//! - 1xxx: Resource errors
//! - 2xxx: Authentication errors
//! - 3xxx: Validation errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Resource Errors (1xxx) =====

    /// Resource not found.
    pub const RESOURCE_NOT_FOUND: Self = Self(1001);

    /// Resource already exists.
    pub const RESOURCE_EXISTS: Self = Self(1002);

    // ===== Authentication Errors (2xxx) =====

    /// Authentication required.
    pub const UNAUTHORIZED: Self = Self(2001);

    // ===== Validation Errors (3xxx) =====

    /// Bad request / invalid parameters.
    pub const BAD_REQUEST: Self = Self(3001);

    /// Generation constraints are inconsistent.
    pub const INVALID_CONSTRAINT: Self = Self(3002);

    /// Imported value could not be decoded.
    pub const IMPORT_FAILED: Self = Self(3003);

    // ===== Internal/System Errors (5xxx) =====

    /// Storage backend error.
    pub const STORAGE_ERROR: Self = Self(5001);

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5002);

    /// Service unavailable.
    pub const SERVICE_UNAVAILABLE: Self = Self(5003);

    /// Secure random source failed.
    pub const ENTROPY_UNAVAILABLE: Self = Self(5004);

    /// Password hashing failed.
    pub const HASH_FAILED: Self = Self(5005);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            1000..=1999 => ErrorCategory::Resource,
            2000..=2999 => ErrorCategory::Authentication,
            3000..=3999 => ErrorCategory::Validation,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// Error category based on error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Resource errors (1xxx).
    Resource,
    /// Authentication errors (2xxx).
    Authentication,
    /// Validation errors (3xxx).
    Validation,
    /// Internal/system errors (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Authentication => write!(f, "authentication"),
            Self::Validation => write!(f, "validation"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
