//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

use super::resource::{ResourceKind, StringParams, validate_name};

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response with no data.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: None,
        }
    }
}

/// Request to generate a string or password.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStringRequest {
    /// Resource name.
    pub name: String,

    /// Generation parameters.
    #[serde(flatten)]
    pub params: StringParams,
}

impl CreateStringRequest {
    /// Validate the request.
    pub fn validate(&self, max_length: u32) -> Result<(), String> {
        validate_name(&self.name)?;
        self.params.validate(max_length)
    }
}

/// Request to generate an identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdRequest {
    /// Resource name.
    pub name: String,

    /// Number of random bytes.
    pub byte_length: u32,

    /// Prefix for the encoded presentations.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl CreateIdRequest {
    /// Validate the request.
    pub fn validate(&self, max_byte_length: u32) -> Result<(), String> {
        validate_name(&self.name)?;
        if self.byte_length == 0 {
            return Err("byte_length must be at least 1".to_string());
        }
        if self.byte_length > max_byte_length {
            return Err(format!(
                "byte_length cannot exceed {max_byte_length}, got {}",
                self.byte_length
            ));
        }
        Ok(())
    }
}

/// Request to adopt an existing value as a resource.
///
/// For strings and passwords `value` is the literal result. For ids it is
/// `<prefix>,<b64url>` or just `<b64url>`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    /// Resource name.
    pub name: String,

    /// Value to import.
    pub value: String,
}

impl ImportRequest {
    /// Validate the request.
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        if self.value.is_empty() {
            return Err("value is required".to_string());
        }
        Ok(())
    }
}

/// Query selecting a resource by name.
#[derive(Debug, Clone, Deserialize)]
pub struct NameQuery {
    /// Resource name.
    pub name: String,
}

/// Query filtering the resource list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Restrict to one kind.
    #[serde(default)]
    pub kind: Option<ResourceKind>,
}

/// One entry in a resource listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Resource kind.
    pub kind: ResourceKind,

    /// Resource name.
    pub name: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status.
    pub ready: bool,

    /// Individual component statuses.
    pub components: ReadyComponents,
}

/// Component readiness statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// Storage backend status.
    pub storage: bool,

    /// Entropy source status.
    pub entropy: bool,
}
