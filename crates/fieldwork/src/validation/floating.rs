use super::{FieldStrategy, InputMode, ValidationResult};
use crate::error::{StrategyError, StrategyResult};
use crate::logging::targets;

/// Strategy for decimal numbers within an inclusive range.
///
/// Parsed values are rounded half away from zero to `decimals` places, so
/// `"3.14159"` becomes `3.14` with the default precision. Formatting drops
/// trailing zeros and a dangling decimal point.
///
/// # Example
///
/// ```
/// use fieldwork::validation::{FieldStrategy, FloatingPointRangeStrategy};
///
/// let strategy = FloatingPointRangeStrategy::with_default_precision(0.0, 100.0);
///
/// assert_eq!(strategy.parse("3.14159"), Some(3.14));
/// assert_eq!(strategy.format(&42.0), "42");
/// assert_eq!(strategy.format(&42.10), "42.1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingPointRangeStrategy {
    min: f64,
    max: f64,
    decimals: u32,
}

impl FloatingPointRangeStrategy {
    /// Decimal places used by [`with_default_precision`](Self::with_default_precision).
    pub const DEFAULT_DECIMALS: u32 = 2;

    /// Create a strategy for `[min, max]` rounding to `decimals` places.
    ///
    /// # Panics
    ///
    /// Panics if either bound is not finite or if `min > max`. Use
    /// [`try_new`](Self::try_new) to handle the error instead.
    pub fn new(min: f64, max: f64, decimals: u32) -> Self {
        match Self::try_new(min, max, decimals) {
            Ok(strategy) => strategy,
            Err(err) => panic!("invalid floating-point range: {err}"),
        }
    }

    /// Create a strategy for `[min, max]` with two decimal places.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`new`](Self::new).
    pub fn with_default_precision(min: f64, max: f64) -> Self {
        Self::new(min, max, Self::DEFAULT_DECIMALS)
    }

    /// Create a strategy, rejecting non-finite or inverted bounds.
    pub fn try_new(min: f64, max: f64, decimals: u32) -> StrategyResult<Self> {
        for bound in [min, max] {
            if !bound.is_finite() {
                tracing::warn!(target: targets::STRATEGY, bound, "non-finite range bound");
                return Err(StrategyError::NonFiniteBound(bound));
            }
        }
        if min > max {
            tracing::warn!(target: targets::STRATEGY, min, max, "inverted floating-point range");
            return Err(StrategyError::inverted_range(min, max));
        }
        Ok(Self { min, max, decimals })
    }

    /// Get the minimum value.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Get the maximum value.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Get the number of decimal places values are rounded to.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    fn round(&self, raw: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        (raw * scale).round() / scale
    }

    fn fixed(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals as usize)
    }
}

impl FieldStrategy for FloatingPointRangeStrategy {
    type Value = f64;

    fn allows_character(&self, c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    fn parse(&self, text: &str) -> Option<f64> {
        let raw: f64 = text.parse().ok()?;
        if !raw.is_finite() {
            return None;
        }
        let rounded = self.round(raw);
        rounded.is_finite().then_some(rounded)
    }

    fn validate(&self, value: &f64) -> ValidationResult {
        if *value < self.min {
            ValidationResult::TooLow(format!(
                "{} is below minimum value of {}",
                self.fixed(*value),
                self.fixed(self.min)
            ))
        } else if *value > self.max {
            ValidationResult::TooHigh(format!(
                "{} is above maximum value of {}",
                self.fixed(*value),
                self.fixed(self.max)
            ))
        } else {
            ValidationResult::Valid
        }
    }

    fn format(&self, value: &f64) -> String {
        let mut text = self.fixed(*value);
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text.remove(0);
        }
        text
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Decimal
    }
}
