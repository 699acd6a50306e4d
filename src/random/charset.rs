//! Character categories.
//!
//! A category is a named character class with a minimum count and a flag
//! saying whether it feeds the optional pool. Categories are expected not to
//! overlap; the generator does not deduplicate.

use serde::{Deserialize, Serialize};

/// Decimal digits.
pub const NUMERIC_CHARS: &str = "0123456789";

/// Lowercase ASCII letters.
pub const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters.
pub const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Special characters used when no override is supplied.
pub const DEFAULT_SPECIAL_CHARS: &str = "!@#$%&*()-_=+[]{}<>:?";

/// Built-in character class.
///
/// The declaration order is the order the generator draws minimums in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Decimal digits.
    Numeric,
    /// Lowercase letters.
    Lower,
    /// Uppercase letters.
    Upper,
    /// Special characters.
    Special,
}

impl CategoryKind {
    /// All kinds in declared order.
    pub const ALL: [Self; 4] = [Self::Numeric, Self::Lower, Self::Upper, Self::Special];

    /// Built-in charset for this kind.
    #[must_use]
    pub const fn default_charset(self) -> &'static str {
        match self {
            Self::Numeric => NUMERIC_CHARS,
            Self::Lower => LOWER_CHARS,
            Self::Upper => UPPER_CHARS,
            Self::Special => DEFAULT_SPECIAL_CHARS,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Special => "special",
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A character class with a minimum count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    kind: CategoryKind,
    charset: Vec<char>,
    minimum: usize,
    enabled: bool,
}

impl Category {
    /// Create an enabled category with no minimum.
    #[must_use]
    pub fn new(kind: CategoryKind, charset: &str) -> Self {
        Self {
            kind,
            charset: charset.chars().collect(),
            minimum: 0,
            enabled: true,
        }
    }

    /// Create a category using the built-in charset for `kind`.
    #[must_use]
    pub fn builtin(kind: CategoryKind) -> Self {
        Self::new(kind, kind.default_charset())
    }

    /// Create the special category, honoring a non-empty override.
    #[must_use]
    pub fn special(override_chars: Option<&str>) -> Self {
        match override_chars {
            Some(chars) if !chars.is_empty() => Self::new(CategoryKind::Special, chars),
            _ => Self::builtin(CategoryKind::Special),
        }
    }

    /// Set the minimum count.
    #[must_use]
    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = minimum;
        self
    }

    /// Set whether the charset feeds the optional pool.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Category kind.
    #[must_use]
    pub const fn kind(&self) -> CategoryKind {
        self.kind
    }

    /// Characters in this category.
    #[must_use]
    pub fn charset(&self) -> &[char] {
        &self.charset
    }

    /// Minimum count.
    #[must_use]
    pub const fn minimum(&self) -> usize {
        self.minimum
    }

    /// Whether the charset feeds the optional pool.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether `c` belongs to this category.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.charset.contains(&c)
    }
}
