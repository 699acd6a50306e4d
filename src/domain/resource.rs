//! Resource types.
//!
//! A resource is a named, persisted generation result: a random string, a
//! random password, or a random identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::random::{Category, CategoryKind, GenerationRequest, IdentifierBytes};

/// Schema version written for new string records.
pub const STRING_SCHEMA_VERSION: u32 = 2;

/// Schema version written for new password records.
pub const PASSWORD_SCHEMA_VERSION: u32 = 3;

/// Schema version written for new id records.
pub const ID_SCHEMA_VERSION: u32 = 0;

/// Id reported for passwords so the secret never doubles as an identifier.
pub const SENSITIVE_ID: &str = "none";

/// Longest accepted resource name.
const MAX_NAME_LEN: usize = 255;

/// Kind of managed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Random string; the result doubles as the id.
    String,
    /// Random password; stored with a bcrypt hash.
    Password,
    /// Random identifier bytes in several encodings.
    Id,
}

impl ResourceKind {
    /// All kinds.
    pub const ALL: [Self; 3] = [Self::String, Self::Password, Self::Id];

    /// Lowercase name, also used as the storage namespace.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Password => "password",
            Self::Id => "id",
        }
    }

    /// Schema version for newly written records of this kind.
    #[must_use]
    pub const fn schema_version(self) -> u32 {
        match self {
            Self::String => STRING_SCHEMA_VERSION,
            Self::Password => PASSWORD_SCHEMA_VERSION,
            Self::Id => ID_SCHEMA_VERSION,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a resource name.
///
/// Names are 1-255 characters of ASCII letters, digits, `-`, `_` and `.`,
/// and may not start with `.`.
///
/// # Errors
///
/// Returns a description of the first rule the name breaks.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is required".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("name cannot exceed {MAX_NAME_LEN} characters"));
    }
    if name.starts_with('.') {
        return Err("name cannot start with '.'".to_string());
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(format!("name contains invalid character {c:?}"));
    }
    Ok(())
}

const fn default_true() -> bool {
    true
}

/// User-facing knobs for string and password generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StringParamsWire")]
pub struct StringParams {
    /// Length in characters.
    pub length: u32,

    /// Include uppercase letters.
    #[serde(default = "default_true")]
    pub upper: bool,

    /// Include lowercase letters.
    #[serde(default = "default_true")]
    pub lower: bool,

    /// Include digits. Bodies may use the legacy name `number` instead.
    pub numeric: bool,

    /// Include special characters.
    #[serde(default = "default_true")]
    pub special: bool,

    /// Minimum uppercase letters.
    #[serde(default)]
    pub min_upper: u32,

    /// Minimum lowercase letters.
    #[serde(default)]
    pub min_lower: u32,

    /// Minimum digits.
    #[serde(default)]
    pub min_numeric: u32,

    /// Minimum special characters.
    #[serde(default)]
    pub min_special: u32,

    /// Replacement for the default special character set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_special: Option<String>,
}

/// Accepted shape of [`StringParams`].
///
/// `numeric` wins when both it and the legacy `number` are present.
#[derive(Deserialize)]
struct StringParamsWire {
    length: u32,
    #[serde(default = "default_true")]
    upper: bool,
    #[serde(default = "default_true")]
    lower: bool,
    #[serde(default)]
    numeric: Option<bool>,
    #[serde(default)]
    number: Option<bool>,
    #[serde(default = "default_true")]
    special: bool,
    #[serde(default)]
    min_upper: u32,
    #[serde(default)]
    min_lower: u32,
    #[serde(default)]
    min_numeric: u32,
    #[serde(default)]
    min_special: u32,
    #[serde(default)]
    override_special: Option<String>,
}

impl From<StringParamsWire> for StringParams {
    fn from(wire: StringParamsWire) -> Self {
        Self {
            length: wire.length,
            upper: wire.upper,
            lower: wire.lower,
            numeric: wire.numeric.or(wire.number).unwrap_or(true),
            special: wire.special,
            min_upper: wire.min_upper,
            min_lower: wire.min_lower,
            min_numeric: wire.min_numeric,
            min_special: wire.min_special,
            override_special: wire.override_special,
        }
    }
}

impl StringParams {
    /// Parameters with every class enabled and no minimums.
    #[must_use]
    pub const fn with_length(length: u32) -> Self {
        Self {
            length,
            upper: true,
            lower: true,
            numeric: true,
            special: true,
            min_upper: 0,
            min_lower: 0,
            min_numeric: 0,
            min_special: 0,
            override_special: None,
        }
    }

    /// Parameters describing an imported value.
    ///
    /// The length is taken from the value; everything else is the default.
    #[must_use]
    pub fn imported(value: &str) -> Self {
        Self::with_length(u32::try_from(value.chars().count()).unwrap_or(u32::MAX))
    }

    /// Check the knobs a generator request cannot express.
    ///
    /// Minimum-sum consistency is left to the generator.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem.
    pub fn validate(&self, max_length: u32) -> Result<(), String> {
        if self.length == 0 {
            return Err("length must be at least 1".to_string());
        }
        if self.length > max_length {
            return Err(format!(
                "length cannot exceed {max_length}, got {}",
                self.length
            ));
        }
        Ok(())
    }

    /// Translate into a generation request.
    #[must_use]
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest::new(widen(self.length))
            .with_category(
                Category::builtin(CategoryKind::Numeric)
                    .with_minimum(widen(self.min_numeric))
                    .with_enabled(self.numeric),
            )
            .with_category(
                Category::builtin(CategoryKind::Lower)
                    .with_minimum(widen(self.min_lower))
                    .with_enabled(self.lower),
            )
            .with_category(
                Category::builtin(CategoryKind::Upper)
                    .with_minimum(widen(self.min_upper))
                    .with_enabled(self.upper),
            )
            .with_category(
                Category::special(self.override_special.as_deref())
                    .with_minimum(widen(self.min_special))
                    .with_enabled(self.special),
            )
    }
}

fn widen(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Persisted string or password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Resource name.
    pub name: String,

    /// Generation parameters.
    #[serde(flatten)]
    pub params: StringParams,

    /// The generated value.
    pub result: String,

    /// Resource id: the result for strings, `"none"` for passwords.
    pub id: String,

    /// bcrypt hash of the result (passwords only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcrypt_hash: Option<String>,

    /// When the value was generated or imported.
    pub created_at: DateTime<Utc>,

    /// Record schema version.
    pub schema_version: u32,
}

impl StringRecord {
    /// Build a record for `kind` around a result.
    #[must_use]
    pub fn new(kind: ResourceKind, name: String, params: StringParams, result: String) -> Self {
        let id = if kind == ResourceKind::Password {
            SENSITIVE_ID.to_string()
        } else {
            result.clone()
        };

        Self {
            name,
            params,
            result,
            id,
            bcrypt_hash: None,
            created_at: Utc::now(),
            schema_version: kind.schema_version(),
        }
    }
}

/// Persisted identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRecord {
    /// Resource name.
    pub name: String,

    /// Number of random bytes.
    pub byte_length: u32,

    /// Prefix applied to every presentation except `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// URL-safe base64 without prefix.
    pub id: String,

    /// URL-safe base64 with prefix.
    pub b64_url: String,

    /// Standard base64 with prefix.
    pub b64_std: String,

    /// Hex with prefix.
    pub hex: String,

    /// Decimal with prefix.
    pub dec: String,

    /// When the id was generated or imported.
    pub created_at: DateTime<Utc>,

    /// Record schema version.
    #[serde(default)]
    pub schema_version: u32,
}

impl IdRecord {
    /// Derive every presentation from raw bytes.
    #[must_use]
    pub fn from_bytes(name: String, bytes: &IdentifierBytes, prefix: Option<String>) -> Self {
        let bare = bytes.presentations();
        let id = bare.b64_url.clone();
        let prefixed = bare.with_prefix(prefix.as_deref().unwrap_or_default());

        Self {
            name,
            byte_length: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
            prefix,
            id,
            b64_url: prefixed.b64_url,
            b64_std: prefixed.b64_std,
            hex: prefixed.hex,
            dec: prefixed.dec,
            created_at: Utc::now(),
            schema_version: ID_SCHEMA_VERSION,
        }
    }
}
