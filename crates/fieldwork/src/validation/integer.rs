use super::{FieldStrategy, InputMode, ValidationResult};
use crate::error::{StrategyError, StrategyResult};
use crate::logging::targets;

/// Strategy for whole numbers within an inclusive range.
///
/// Accepts ASCII digits and `-` while typing. Values outside `[min, max]`
/// are reported as [`ValidationResult::TooLow`] or
/// [`ValidationResult::TooHigh`] with both the offending value and the
/// violated bound in the message.
///
/// # Example
///
/// ```
/// use fieldwork::validation::{FieldStrategy, IntegerRangeStrategy, ValidationResult};
///
/// let strategy = IntegerRangeStrategy::new(0, 100);
///
/// assert_eq!(strategy.validate(&50), ValidationResult::Valid);
/// assert_eq!(
///     strategy.validate(&101),
///     ValidationResult::TooHigh("101 is above maximum value of 100".into())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerRangeStrategy {
    min: i64,
    max: i64,
}

impl IntegerRangeStrategy {
    /// Create a strategy for the range `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`. Use [`try_new`](Self::try_new) to handle the
    /// error instead.
    pub fn new(min: i64, max: i64) -> Self {
        match Self::try_new(min, max) {
            Ok(strategy) => strategy,
            Err(err) => panic!("invalid integer range: {err}"),
        }
    }

    /// Create a strategy for the range `[min, max]`, rejecting inverted ranges.
    pub fn try_new(min: i64, max: i64) -> StrategyResult<Self> {
        if min > max {
            tracing::warn!(target: targets::STRATEGY, min, max, "inverted integer range");
            return Err(StrategyError::inverted_range(min, max));
        }
        Ok(Self { min, max })
    }

    /// Get the minimum value.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Get the maximum value.
    pub fn max(&self) -> i64 {
        self.max
    }
}

impl FieldStrategy for IntegerRangeStrategy {
    type Value = i64;

    fn allows_character(&self, c: char) -> bool {
        c.is_ascii_digit() || c == '-'
    }

    fn parse(&self, text: &str) -> Option<i64> {
        text.parse().ok()
    }

    fn validate(&self, value: &i64) -> ValidationResult {
        if *value < self.min {
            ValidationResult::TooLow(format!("{value} is below minimum value of {}", self.min))
        } else if *value > self.max {
            ValidationResult::TooHigh(format!("{value} is above maximum value of {}", self.max))
        } else {
            ValidationResult::Valid
        }
    }

    fn format(&self, value: &i64) -> String {
        value.to_string()
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Numeric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_digits_and_minus() {
        let strategy = IntegerRangeStrategy::new(0, 100);
        for c in "0123456789-".chars() {
            assert!(strategy.allows_character(c), "{c} should be allowed");
        }
        for c in ['.', 'a', ' ', '+', ':'] {
            assert!(!strategy.allows_character(c), "{c} should be rejected");
        }
    }

    #[test]
    fn test_parse() {
        let strategy = IntegerRangeStrategy::new(-10, 10);
        assert_eq!(strategy.parse("7"), Some(7));
        assert_eq!(strategy.parse("-3"), Some(-3));
        assert_eq!(strategy.parse(""), None);
        assert_eq!(strategy.parse("-"), None);
        assert_eq!(strategy.parse("1-2"), None);
        assert_eq!(strategy.parse("99999999999999999999"), None);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let strategy = IntegerRangeStrategy::new(0, 100);
        assert_eq!(strategy.validate(&0), ValidationResult::Valid);
        assert_eq!(strategy.validate(&100), ValidationResult::Valid);
    }

    #[test]
    fn test_too_low_mentions_value_and_bound() {
        let strategy = IntegerRangeStrategy::new(0, 100);
        let result = strategy.validate(&-1);
        assert!(matches!(result, ValidationResult::TooLow(_)));
        let message = result.message().unwrap();
        assert!(message.contains("-1"));
        assert!(message.contains('0'));
        assert_eq!(message, "-1 is below minimum value of 0");
    }

    #[test]
    fn test_too_high_mentions_value_and_bound() {
        let strategy = IntegerRangeStrategy::new(0, 100);
        let result = strategy.validate(&101);
        assert!(matches!(result, ValidationResult::TooHigh(_)));
        let message = result.message().unwrap();
        assert!(message.contains("101"));
        assert!(message.contains("100"));
    }

    #[test]
    fn test_format_round_trip() {
        let strategy = IntegerRangeStrategy::new(-50, 50);
        for value in [-50, -1, 0, 7, 50] {
            let text = strategy.format(&value);
            assert_eq!(strategy.parse(&text), Some(value));
        }
        assert_eq!(strategy.format(&5), "5");
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(
            IntegerRangeStrategy::try_new(10, 5),
            Err(StrategyError::inverted_range(10, 5))
        );
        let single = IntegerRangeStrategy::try_new(3, 3).unwrap();
        assert_eq!((single.min(), single.max()), (3, 3));
    }

    #[test]
    #[should_panic(expected = "invalid integer range")]
    fn test_new_panics_on_inverted_range() {
        let _ = IntegerRangeStrategy::new(1, 0);
    }
}
