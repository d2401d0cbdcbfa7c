use serde::{Deserialize, Serialize};

use super::{FieldStrategy, InputMode, ValidationResult};

/// A named class of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    /// Alphabetic characters in any script.
    Letters,
    /// Numeric characters in any script.
    DecimalDigits,
    /// Letters and digits.
    Alphanumerics,
    /// Spaces, tabs, and line breaks.
    Whitespace,
    /// ASCII punctuation and symbols.
    Punctuation,
}

impl CharacterClass {
    /// Check whether the class contains a character.
    pub fn contains(self, c: char) -> bool {
        match self {
            CharacterClass::Letters => c.is_alphabetic(),
            CharacterClass::DecimalDigits => c.is_numeric(),
            CharacterClass::Alphanumerics => c.is_alphanumeric(),
            CharacterClass::Whitespace => c.is_whitespace(),
            CharacterClass::Punctuation => c.is_ascii_punctuation(),
        }
    }
}

/// A set of allowed characters built from classes and explicit extras.
///
/// Deserializes from a table such as
/// `{ classes = ["letters"], extra = " -'" }`.
///
/// # Example
///
/// ```
/// use fieldwork::validation::CharacterSet;
///
/// let name = CharacterSet::letters().with_chars(" -");
/// assert!(name.contains('É'));
/// assert!(name.contains('-'));
/// assert!(!name.contains('3'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSet {
    classes: Vec<CharacterClass>,
    extra: String,
}

impl CharacterSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set containing one class.
    pub fn from_class(class: CharacterClass) -> Self {
        Self::new().with_class(class)
    }

    /// A set containing exactly the given characters.
    pub fn from_chars(chars: &str) -> Self {
        Self::new().with_chars(chars)
    }

    /// Alphabetic characters.
    pub fn letters() -> Self {
        Self::from_class(CharacterClass::Letters)
    }

    /// Numeric characters.
    pub fn decimal_digits() -> Self {
        Self::from_class(CharacterClass::DecimalDigits)
    }

    /// Letters and digits.
    pub fn alphanumerics() -> Self {
        Self::from_class(CharacterClass::Alphanumerics)
    }

    /// Whitespace characters.
    pub fn whitespace() -> Self {
        Self::from_class(CharacterClass::Whitespace)
    }

    /// ASCII punctuation.
    pub fn punctuation() -> Self {
        Self::from_class(CharacterClass::Punctuation)
    }

    /// Add a class to the set.
    pub fn with_class(mut self, class: CharacterClass) -> Self {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add individual characters to the set.
    pub fn with_chars(mut self, chars: &str) -> Self {
        for c in chars.chars() {
            if !self.extra.contains(c) {
                self.extra.push(c);
            }
        }
        self
    }

    /// Combine two sets.
    pub fn union(self, other: &CharacterSet) -> Self {
        let merged = other
            .classes
            .iter()
            .fold(self, |set, class| set.with_class(*class));
        merged.with_chars(&other.extra)
    }

    /// Check whether the set contains a character.
    pub fn contains(&self, c: char) -> bool {
        self.extra.contains(c) || self.classes.iter().any(|class| class.contains(c))
    }

    /// Returns `true` if the set contains no characters at all.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.extra.is_empty()
    }
}

/// Strategy for free text restricted to a character set.
///
/// The value is the text itself. Validation reports an overlong text before
/// it reports disallowed characters.
///
/// # Example
///
/// ```
/// use fieldwork::validation::{CharacterSet, CharacterSetStrategy, FieldStrategy};
///
/// let strategy = CharacterSetStrategy::new(CharacterSet::letters()).with_max_length(10);
///
/// let result = strategy.validate(&"ElevenChars".to_string());
/// assert_eq!(result.message(), Some("Max length is 10 characters"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSetStrategy {
    allowed: CharacterSet,
    max_length: Option<usize>,
}

impl CharacterSetStrategy {
    /// Create a strategy with no length limit.
    pub fn new(allowed: CharacterSet) -> Self {
        Self {
            allowed,
            max_length: None,
        }
    }

    /// Limit the number of characters a value may contain.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Get the allowed characters.
    pub fn allowed(&self) -> &CharacterSet {
        &self.allowed
    }

    /// Get the length limit, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl FieldStrategy for CharacterSetStrategy {
    type Value = String;

    fn allows_character(&self, c: char) -> bool {
        self.allowed.contains(c)
    }

    fn parse(&self, text: &str) -> Option<String> {
        (!text.is_empty()).then(|| text.to_string())
    }

    fn validate(&self, value: &String) -> ValidationResult {
        if let Some(max) = self.max_length
            && value.chars().count() > max
        {
            return ValidationResult::Invalid(format!("Max length is {max} characters"));
        }
        if !value.chars().all(|c| self.allowed.contains(c)) {
            return ValidationResult::Invalid("Contains characters that are not allowed".into());
        }
        ValidationResult::Valid
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // CharacterSet Tests
    // =========================================================================

    #[test]
    fn test_classes() {
        assert!(CharacterClass::Letters.contains('a'));
        assert!(!CharacterClass::Letters.contains('1'));
        assert!(CharacterClass::DecimalDigits.contains('7'));
        assert!(CharacterClass::Alphanumerics.contains('Z'));
        assert!(CharacterClass::Alphanumerics.contains('0'));
        assert!(CharacterClass::Whitespace.contains('\t'));
        assert!(CharacterClass::Punctuation.contains('!'));
        assert!(!CharacterClass::Punctuation.contains('a'));
    }

    #[test]
    fn test_union() {
        let set = CharacterSet::letters().union(&CharacterSet::from_chars("_"));
        assert!(set.contains('q'));
        assert!(set.contains('_'));
        assert!(!set.contains(' '));
        assert!(CharacterSet::new().is_empty());
    }

    #[test]
    fn test_with_chars_dedups() {
        let set = CharacterSet::from_chars("aab");
        assert_eq!(set, CharacterSet::from_chars("ab"));
    }

    #[test]
    fn test_deserialize() {
        let set: CharacterSet =
            toml::from_str("classes = [\"decimal_digits\"]\nextra = \"+ \"").unwrap();
        assert!(set.contains('5'));
        assert!(set.contains('+'));
        assert!(!set.contains('x'));

        let empty: CharacterSet = toml::from_str("").unwrap();
        assert!(empty.is_empty());
    }

    // =========================================================================
    // CharacterSetStrategy Tests
    // =========================================================================

    #[test]
    fn test_max_length_message() {
        let strategy = CharacterSetStrategy::new(CharacterSet::letters()).with_max_length(10);
        let result = strategy.validate(&"ElevenChars".to_string());
        assert!(matches!(result, ValidationResult::Invalid(_)));
        assert!(result.message().unwrap().contains("10"));
    }

    #[test]
    fn test_disallowed_characters() {
        let strategy = CharacterSetStrategy::new(CharacterSet::letters()).with_max_length(10);
        assert_eq!(
            strategy.validate(&"abc 123".to_string()),
            ValidationResult::Invalid("Contains characters that are not allowed".into())
        );
        assert_eq!(strategy.validate(&"abc".to_string()), ValidationResult::Valid);
    }

    #[test]
    fn test_length_counts_characters() {
        let strategy = CharacterSetStrategy::new(CharacterSet::letters()).with_max_length(3);
        assert_eq!(strategy.validate(&"äöü".to_string()), ValidationResult::Valid);
    }

    #[test]
    fn test_unlimited_by_default() {
        let strategy = CharacterSetStrategy::new(CharacterSet::letters());
        assert_eq!(strategy.max_length(), None);
        assert_eq!(strategy.validate(&"a".repeat(10_000)), ValidationResult::Valid);
    }

    #[test]
    fn test_parse_is_identity() {
        let strategy = CharacterSetStrategy::new(CharacterSet::alphanumerics());
        assert_eq!(strategy.parse(""), None);
        assert_eq!(strategy.parse("abc1"), Some("abc1".to_string()));
        assert_eq!(strategy.format(&"abc1".to_string()), "abc1");
        assert_eq!(strategy.input_mode(), InputMode::Text);
    }
}
