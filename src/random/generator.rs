//! Constrained string generator.
//!
//! Generation runs as four explicit stages:
//!
//! 1. [`GenerationRequest::validate`] checks the request without drawing
//!    any entropy.
//! 2. [`draw_minimums`] draws each category's minimum from its own charset.
//! 3. [`draw_from_pool`] fills the remaining length from the optional pool.
//! 4. [`SecureRandom::shuffle`] permutes the accumulated characters so the
//!    required ones do not sit at the front.

use std::fmt;

use crate::random::charset::Category;
use crate::random::error::{GeneratorError, GeneratorResult};
use crate::random::source::SecureRandom;

/// A declarative request for a constrained random string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    length: usize,
    categories: Vec<Category>,
}

/// Outcome of validation: what is left to draw after the minimums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Characters to draw from the optional pool.
    pub optional_count: usize,
    /// Concatenated charsets of every enabled category.
    pub pool: Vec<char>,
}

impl GenerationRequest {
    /// Create a request with no categories.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self {
            length,
            categories: Vec::new(),
        }
    }

    /// Add a category. Categories are kept in declared kind order.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self.categories.sort_by_key(Category::kind);
        self
    }

    /// Requested length in characters.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Categories in declared order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Sum of all category minimums.
    #[must_use]
    pub fn required_total(&self) -> usize {
        self.categories
            .iter()
            .fold(0usize, |total, c| total.saturating_add(c.minimum()))
    }

    /// Concatenated charsets of every enabled category.
    #[must_use]
    pub fn optional_pool(&self) -> Vec<char> {
        self.categories
            .iter()
            .filter(|c| c.is_enabled())
            .flat_map(|c| c.charset().iter().copied())
            .collect()
    }

    /// Check the request for internal consistency.
    ///
    /// Draws no entropy.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::InvalidConstraint` if the length is zero,
    /// smaller than the sum of minimums, a category with a minimum is empty
    /// or disabled, or the optional pool is empty while characters remain.
    pub fn validate(&self) -> GeneratorResult<GenerationPlan> {
        if self.length == 0 {
            return Err(GeneratorError::InvalidConstraint(
                "length must be at least 1".to_string(),
            ));
        }

        let required = self.required_total();
        if self.length < required {
            return Err(GeneratorError::InvalidConstraint(format!(
                "length ({}) must be >= the sum of minimums ({required}), short by {}",
                self.length,
                required - self.length
            )));
        }

        for category in self.categories.iter().filter(|c| c.minimum() > 0) {
            if category.charset().is_empty() {
                return Err(GeneratorError::InvalidConstraint(format!(
                    "category {} requires {} characters but its charset is empty",
                    category.kind(),
                    category.minimum()
                )));
            }
            if !category.is_enabled() {
                return Err(GeneratorError::InvalidConstraint(format!(
                    "category {} requires {} characters but is disabled",
                    category.kind(),
                    category.minimum()
                )));
            }
        }

        let optional_count = self.length - required;
        let pool = self.optional_pool();
        if optional_count > 0 && pool.is_empty() {
            return Err(GeneratorError::InvalidConstraint(format!(
                "{optional_count} characters remain after minimums but no category is enabled"
            )));
        }

        Ok(GenerationPlan {
            optional_count,
            pool,
        })
    }
}

/// Draw each category's minimum from its own charset, in declared order.
///
/// # Errors
///
/// Returns `GeneratorError::EntropyUnavailable` if the source fails.
pub fn draw_minimums(
    random: &SecureRandom,
    request: &GenerationRequest,
    out: &mut Vec<char>,
) -> GeneratorResult<()> {
    for category in request.categories() {
        draw_from_pool(random, category.charset(), category.minimum(), out)?;
    }
    Ok(())
}

/// Draw `count` characters uniformly from `pool`.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidConstraint` if `pool` is empty while
/// `count > 0`, and `GeneratorError::EntropyUnavailable` if the source fails.
pub fn draw_from_pool(
    random: &SecureRandom,
    pool: &[char],
    count: usize,
    out: &mut Vec<char>,
) -> GeneratorResult<()> {
    for _ in 0..count {
        let idx = random.random_index(pool.len())?;
        out.push(pool[idx]);
    }
    Ok(())
}

/// A generated string of exactly the requested length.
///
/// `Debug` reports only the length so results do not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationResult {
    value: String,
    length: usize,
}

impl GenerationResult {
    fn from_chars(chars: Vec<char>) -> Self {
        let length = chars.len();
        Self {
            value: chars.into_iter().collect(),
            length,
        }
    }

    /// The generated string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Whether the result is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Consume the result into its string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationResult")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Generates strings that satisfy per-category minimums.
#[derive(Debug, Clone, Default)]
pub struct StringGenerator {
    random: SecureRandom,
}

impl StringGenerator {
    /// Create a generator over the given random source.
    #[must_use]
    pub const fn new(random: SecureRandom) -> Self {
        Self { random }
    }

    /// Generate a string satisfying `request`.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::InvalidConstraint` for inconsistent requests
    /// (before any entropy is drawn) and `GeneratorError::EntropyUnavailable`
    /// if the source fails at any stage.
    pub fn generate(&self, request: &GenerationRequest) -> GeneratorResult<GenerationResult> {
        let plan = request.validate()?;

        let mut accumulated = Vec::with_capacity(request.length());
        draw_minimums(&self.random, request, &mut accumulated)?;
        draw_from_pool(&self.random, &plan.pool, plan.optional_count, &mut accumulated)?;
        self.random.shuffle(&mut accumulated)?;

        Ok(GenerationResult::from_chars(accumulated))
    }
}
