//! Input validation strategies for fields.
//!
//! A [`FieldStrategy`] is the rule set behind one kind of field. It filters
//! keystrokes before they reach the field text, parses the accumulated text
//! into a typed value, checks the value against domain constraints, and
//! renders it back in canonical form.
//!
//! # Validation Results
//!
//! Validating a parsed value yields one of:
//!
//! - [`ValidationResult::Valid`]: The value satisfies every constraint
//! - [`ValidationResult::TooLow`]: The value is below the configured minimum
//! - [`ValidationResult::TooHigh`]: The value is above the configured maximum
//! - [`ValidationResult::Invalid`]: Any other rule was violated
//!
//! # Built-in Strategies
//!
//! - [`IntegerRangeStrategy`]: Whole numbers within an inclusive range
//! - [`FloatingPointRangeStrategy`]: Decimal numbers rounded to a fixed precision
//! - [`CharacterSetStrategy`]: Free text restricted to a set of characters
//! - [`TimeStrategy`](crate::time::TimeStrategy): `HH:MM` clock times
//!
//! # Example
//!
//! ```
//! use fieldwork::validation::{FieldStrategy, IntegerRangeStrategy, ValidationResult};
//!
//! let strategy = IntegerRangeStrategy::new(0, 100);
//!
//! assert!(strategy.allows_character('7'));
//! assert!(!strategy.allows_character('x'));
//!
//! let value = strategy.parse("42").unwrap();
//! assert_eq!(strategy.validate(&value), ValidationResult::Valid);
//! assert_eq!(strategy.format(&value), "42");
//! ```

mod charset;
mod floating;
mod integer;

pub use charset::{CharacterClass, CharacterSet, CharacterSetStrategy};
pub use floating::FloatingPointRangeStrategy;
pub use integer::IntegerRangeStrategy;

use std::fmt;
use std::sync::Arc;

/// The outcome of validating a parsed value.
///
/// Every failure carries a human-readable message; only [`Valid`](Self::Valid)
/// has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ValidationResult {
    /// The value satisfies every constraint.
    #[default]
    Valid,
    /// The value is below the minimum.
    TooLow(String),
    /// The value is above the maximum.
    TooHigh(String),
    /// The text or value breaks some other rule.
    Invalid(String),
}

impl ValidationResult {
    /// Returns `true` only for [`ValidationResult::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure message, or `None` for a valid result.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::TooLow(message) | Self::TooHigh(message) | Self::Invalid(message) => {
                Some(message)
            }
        }
    }

    /// Classify the failure.
    ///
    /// Strategies report parse failures through the field controller, which
    /// produces an [`Invalid`](Self::Invalid) result ending in
    /// `"is not a valid value"`; those map to
    /// [`ValidationErrorKind::ParseFailure`].
    pub fn kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::Valid => None,
            Self::TooLow(_) | Self::TooHigh(_) => Some(ValidationErrorKind::RangeViolation),
            Self::Invalid(message) if message.ends_with(NOT_A_VALID_VALUE) => {
                Some(ValidationErrorKind::ParseFailure)
            }
            Self::Invalid(_) => Some(ValidationErrorKind::ConstraintViolation),
        }
    }

    /// Replace the message of a failed result, keeping its tag.
    pub(crate) fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::Valid => Self::Valid,
            Self::TooLow(_) => Self::TooLow(message.into()),
            Self::TooHigh(_) => Self::TooHigh(message.into()),
            Self::Invalid(_) => Self::Invalid(message.into()),
        }
    }

    /// The result reported when the field text cannot be parsed at all.
    pub(crate) fn unparseable(text: &str) -> Self {
        Self::Invalid(format!("\"{text}\" {NOT_A_VALID_VALUE}"))
    }
}

const NOT_A_VALID_VALUE: &str = "is not a valid value";

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(message),
            None => f.write_str("valid"),
        }
    }
}

/// Broad categories of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The text could not be converted to a value.
    ParseFailure,
    /// The value fell outside the configured range.
    RangeViolation,
    /// A length or character rule was violated.
    ConstraintViolation,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::ParseFailure => write!(f, "ParseFailure"),
            ValidationErrorKind::RangeViolation => write!(f, "RangeViolation"),
            ValidationErrorKind::ConstraintViolation => write!(f, "ConstraintViolation"),
        }
    }
}

/// The keyboard a host should present for a field.
///
/// Informational only: strategies still filter every character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    /// Digits and a sign.
    Numeric,
    /// Digits, a sign, and a decimal point.
    Decimal,
    /// Free text.
    #[default]
    Text,
    /// Digits and a colon.
    Time,
}

/// The rule set behind one kind of field.
///
/// Strategies are immutable once constructed and may be shared between any
/// number of fields.
///
/// # Thread Safety
///
/// Strategies must be `Send + Sync` so fields holding them can be shared.
pub trait FieldStrategy: Send + Sync {
    /// The typed value this strategy produces.
    type Value: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Whether a typed or pasted character may enter the field text.
    ///
    /// Must be total and free of side effects.
    fn allows_character(&self, c: char) -> bool;

    /// Convert the whole field text into a value.
    ///
    /// Returns `None` both for empty text and for text that cannot be parsed;
    /// callers that need to tell the two apart check for empty text first.
    fn parse(&self, text: &str) -> Option<Self::Value>;

    /// Check a parsed value against the domain constraints.
    fn validate(&self, value: &Self::Value) -> ValidationResult;

    /// Render a value in canonical display form.
    ///
    /// For every value that validates, `parse(format(v))` returns `Some(v)`.
    fn format(&self, value: &Self::Value) -> String;

    /// The keyboard the host should present.
    fn input_mode(&self) -> InputMode;

    /// The maximum number of characters the user may type, if the strategy
    /// imposes one.
    ///
    /// The default implementation imposes no limit.
    fn max_input_length(&self) -> Option<usize> {
        None
    }

    /// Rewrite the field text after an accepted edit.
    ///
    /// Returns `Some(text)` to replace the field text, or `None` to keep it.
    /// The default implementation never rewrites.
    fn fixup(&self, _text: &str) -> Option<String> {
        None
    }
}

// Allow sharing one strategy between fields through Arc
impl<S: FieldStrategy + ?Sized> FieldStrategy for Arc<S> {
    type Value = S::Value;

    fn allows_character(&self, c: char) -> bool {
        (**self).allows_character(c)
    }

    fn parse(&self, text: &str) -> Option<Self::Value> {
        (**self).parse(text)
    }

    fn validate(&self, value: &Self::Value) -> ValidationResult {
        (**self).validate(value)
    }

    fn format(&self, value: &Self::Value) -> String {
        (**self).format(value)
    }

    fn input_mode(&self) -> InputMode {
        (**self).input_mode()
    }

    fn max_input_length(&self) -> Option<usize> {
        (**self).max_input_length()
    }

    fn fixup(&self, text: &str) -> Option<String> {
        (**self).fixup(text)
    }
}

// Allow using Box<dyn FieldStrategy<Value = V>> as a strategy
impl<S: FieldStrategy + ?Sized> FieldStrategy for Box<S> {
    type Value = S::Value;

    fn allows_character(&self, c: char) -> bool {
        (**self).allows_character(c)
    }

    fn parse(&self, text: &str) -> Option<Self::Value> {
        (**self).parse(text)
    }

    fn validate(&self, value: &Self::Value) -> ValidationResult {
        (**self).validate(value)
    }

    fn format(&self, value: &Self::Value) -> String {
        (**self).format(value)
    }

    fn input_mode(&self) -> InputMode {
        (**self).input_mode()
    }

    fn max_input_length(&self) -> Option<usize> {
        (**self).max_input_length()
    }

    fn fixup(&self, text: &str) -> Option<String> {
        (**self).fixup(text)
    }
}

static_assertions::assert_impl_all!(ValidationResult: Send, Sync);
