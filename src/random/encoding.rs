//! Presentation encodings for identifier bytes.
//!
//! Pure transforms. Hex and both base64 variants decode back to the exact
//! input bytes; decimal is one-way because it drops leading zero bytes.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use crate::random::error::EncodingError;

/// Decimal limb base used by [`encode_decimal`].
const DECIMAL_LIMB: u64 = 1_000_000_000;

/// Lowercase hex, two digits per byte.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex (either case).
///
/// # Errors
///
/// Returns an error for odd-length input or non-hex characters.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(hex::decode(input)?)
}

/// Standard base64 with padding.
#[must_use]
pub fn encode_base64_std(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64.
///
/// # Errors
///
/// Returns an error if the input is not valid standard base64.
pub fn decode_base64_std(input: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(STANDARD.decode(input)?)
}

/// URL-safe base64 without padding.
#[must_use]
pub fn encode_base64_url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe unpadded base64.
///
/// # Errors
///
/// Returns an error if the input is not valid URL-safe unpadded base64.
pub fn decode_base64_url(input: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(URL_SAFE_NO_PAD.decode(input)?)
}

/// Unsigned big-endian integer in non-padded decimal. Empty input is `"0"`.
#[must_use]
pub fn encode_decimal(bytes: &[u8]) -> String {
    // Little-endian limbs, each holding nine decimal digits.
    let mut limbs: Vec<u64> = Vec::new();

    for &byte in bytes {
        let mut carry = u64::from(byte);
        for limb in &mut limbs {
            let value = *limb * 256 + carry;
            *limb = value % DECIMAL_LIMB;
            carry = value / DECIMAL_LIMB;
        }
        while carry > 0 {
            limbs.push(carry % DECIMAL_LIMB);
            carry /= DECIMAL_LIMB;
        }
    }

    let Some((most, rest)) = limbs.split_last() else {
        return "0".to_string();
    };

    let mut out = most.to_string();
    for limb in rest.iter().rev() {
        out.push_str(&format!("{limb:09}"));
    }
    out
}

/// Every presentation of one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentations {
    /// URL-safe unpadded base64.
    pub b64_url: String,
    /// Standard padded base64.
    pub b64_std: String,
    /// Lowercase hex.
    pub hex: String,
    /// Unsigned decimal.
    pub dec: String,
}

impl Presentations {
    /// Encode `bytes` in every format.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            b64_url: encode_base64_url(bytes),
            b64_std: encode_base64_std(bytes),
            hex: encode_hex(bytes),
            dec: encode_decimal(bytes),
        }
    }

    /// Prepend `prefix` to every presentation.
    #[must_use]
    pub fn with_prefix(self, prefix: &str) -> Self {
        Self {
            b64_url: format!("{prefix}{}", self.b64_url),
            b64_std: format!("{prefix}{}", self.b64_std),
            hex: format!("{prefix}{}", self.hex),
            dec: format!("{prefix}{}", self.dec),
        }
    }
}
