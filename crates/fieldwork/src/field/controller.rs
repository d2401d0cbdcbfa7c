use fieldwork_core::{EditSpan, Property, Signal};

use super::{
    CommitOutcome, ErrorPolicy, ErrorPresentation, ErrorResolution, FieldConfig, FieldPhase,
    FieldState,
};
use crate::logging::targets;
use crate::validation::{FieldStrategy, ValidationResult};

/// Drives one field through typing, committing, and error resolution.
///
/// # Signals
///
/// - `committed`: every commit that succeeds, with `None` for empty text
/// - `value_changed`: the committed value actually changed, from any path
/// - `error_presented`: a commit failed and the message should be shown
/// - `editing_started`: the field gained focus or re-entered editing
///
/// # Example
///
/// ```
/// use fieldwork::field::{FieldController, FieldPhase};
/// use fieldwork::validation::IntegerRangeStrategy;
///
/// let mut field = FieldController::new(IntegerRangeStrategy::new(0, 150));
/// field.committed.connect(|value| println!("committed {value:?}"));
///
/// field.focus_gained();
/// for c in "42".chars() {
///     field.handle_keystroke(c);
/// }
/// let outcome = field.commit();
///
/// assert_eq!(outcome.value, Some(42));
/// assert_eq!(field.phase(), FieldPhase::Valid);
/// ```
pub struct FieldController<S: FieldStrategy> {
    strategy: S,
    config: FieldConfig,
    label: String,

    raw_text: String,
    value: Property<Option<S::Value>>,
    last_error: Option<ValidationResult>,
    focused: bool,
    text_selected: bool,
    alert_pending: bool,
    phase: FieldPhase,

    // Signals

    /// Signal emitted after each successful commit.
    pub committed: Signal<Option<S::Value>>,

    /// Signal emitted when the committed value changes.
    pub value_changed: Signal<Option<S::Value>>,

    /// Signal emitted when a failed commit needs presenting.
    pub error_presented: Signal<ErrorPresentation>,

    /// Signal emitted when the field enters editing.
    pub editing_started: Signal<()>,
}

impl<S: FieldStrategy> FieldController<S> {
    /// Create a field with the default configuration.
    pub fn new(strategy: S) -> Self {
        Self::with_config(strategy, FieldConfig::default())
    }

    /// Create a field with the given configuration.
    pub fn with_config(strategy: S, config: FieldConfig) -> Self {
        Self {
            strategy,
            config,
            label: String::from("field"),
            raw_text: String::new(),
            value: Property::new(None),
            last_error: None,
            focused: false,
            text_selected: false,
            alert_pending: false,
            phase: FieldPhase::Empty,
            committed: Signal::new(),
            value_changed: Signal::new(),
            error_presented: Signal::new(),
            editing_started: Signal::new(),
        }
    }

    /// Set the name used for this field in log output.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The name used in log output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// The text as displayed.
    pub fn text(&self) -> &str {
        &self.raw_text
    }

    /// The last successfully committed value.
    pub fn committed_value(&self) -> Option<S::Value> {
        self.value.get()
    }

    /// The result of the last failed commit, if not yet cleared.
    pub fn last_error(&self) -> Option<&ValidationResult> {
        self.last_error.as_ref()
    }

    /// The editing phase.
    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    /// Whether the field has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the whole text is selected, so the next keystroke replaces it.
    pub fn is_text_selected(&self) -> bool {
        self.text_selected
    }

    /// Snapshot the field state.
    pub fn state(&self) -> FieldState<S::Value> {
        FieldState {
            raw_text: self.raw_text.clone(),
            committed_value: self.committed_value(),
            last_error: self.last_error.clone(),
            is_focused: self.focused,
            text_selected: self.text_selected,
            phase: self.phase,
        }
    }

    /// The typing cap: the smaller of the configured and strategy limits.
    pub fn input_limit(&self) -> Option<usize> {
        match (self.config.max_input_length, self.strategy.max_input_length()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // =========================================================================
    // Error Presentation
    // =========================================================================

    /// The message to render next to the field.
    ///
    /// Only the inline policy shows one, and only while the field is unfocused.
    pub fn inline_error(&self) -> Option<&str> {
        if self.config.error_policy != ErrorPolicy::Inline || self.focused {
            return None;
        }
        self.last_error.as_ref().and_then(ValidationResult::message)
    }

    /// The message of an unresolved modal alert.
    pub fn pending_alert(&self) -> Option<&str> {
        if !self.alert_pending {
            return None;
        }
        self.last_error.as_ref().and_then(ValidationResult::message)
    }

    /// Whether focus must stay on this field until an alert is resolved.
    pub fn blocks_focus_change(&self) -> bool {
        self.alert_pending
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Offer a typed character.
    ///
    /// Characters the strategy disallows, or that would push the text past
    /// the typing cap, are dropped. Returns the text to display.
    pub fn handle_keystroke(&mut self, c: char) -> &str {
        self.accept_char(c);
        &self.raw_text
    }

    /// Offer pasted text.
    ///
    /// Each character is filtered as if typed; anything past the cap is
    /// dropped. Returns the text to display.
    pub fn insert_text(&mut self, text: &str) -> &str {
        let accepted = text.chars().filter(|c| self.accept_char(*c)).count();
        tracing::trace!(
            target: targets::FIELD,
            field = %self.label,
            offered = text.chars().count(),
            accepted,
            "pasted text"
        );
        &self.raw_text
    }

    /// Delete the last character, or the whole text when it is selected.
    pub fn handle_backspace(&mut self) -> &str {
        if self.text_selected {
            self.raw_text.clear();
            self.text_selected = false;
        } else {
            self.raw_text.pop();
        }
        self.phase = FieldPhase::Editing;
        &self.raw_text
    }

    fn accept_char(&mut self, c: char) -> bool {
        if !self.strategy.allows_character(c) {
            tracing::trace!(target: targets::FIELD, field = %self.label, ?c, "character rejected");
            return false;
        }

        let base_len = if self.text_selected {
            0
        } else {
            self.raw_text.chars().count()
        };
        if let Some(limit) = self.input_limit()
            && base_len + 1 > limit
        {
            tracing::trace!(target: targets::FIELD, field = %self.label, limit, "input limit reached");
            return false;
        }

        if self.text_selected {
            self.raw_text.clear();
            self.text_selected = false;
        }
        self.raw_text.push(c);
        if let Some(fixed) = self.strategy.fixup(&self.raw_text) {
            self.raw_text = fixed;
        }
        self.phase = FieldPhase::Editing;
        true
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The field received focus.
    ///
    /// Clears any presented error but keeps the text.
    pub fn focus_gained(&mut self) {
        self.focused = true;
        self.alert_pending = false;
        self.last_error = None;
        self.phase = FieldPhase::Editing;
        self.editing_started.emit(());
    }

    /// The field lost focus; commits the text.
    pub fn focus_lost(&mut self) -> CommitOutcome<S::Value> {
        self.focused = false;
        self.text_selected = false;
        self.commit()
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Finalize the text into a value.
    ///
    /// Empty text clears the committed value and always succeeds. Otherwise
    /// the text is parsed and validated; a valid value is committed and the
    /// text reformatted, while a failure leaves the committed value untouched
    /// and presents the error according to the policy.
    pub fn commit(&mut self) -> CommitOutcome<S::Value> {
        let _span = EditSpan::commit(&self.label);
        self.text_selected = false;

        if self.raw_text.is_empty() {
            self.clear_error();
            self.phase = FieldPhase::Empty;
            self.store(None);
            tracing::debug!(target: targets::FIELD, "committed empty field");
            self.committed.emit(None);
            return CommitOutcome {
                result: ValidationResult::Valid,
                value: None,
            };
        }

        let Some(parsed) = self.strategy.parse(&self.raw_text) else {
            let result = ValidationResult::unparseable(&self.raw_text);
            return self.reject(result);
        };

        let result = self.strategy.validate(&parsed);
        if !result.is_valid() {
            return self.reject(result);
        }

        self.raw_text = self.strategy.format(&parsed);
        self.clear_error();
        self.phase = FieldPhase::Valid;
        self.store(Some(parsed.clone()));
        tracing::debug!(target: targets::FIELD, text = %self.raw_text, "committed value");
        self.committed.emit(Some(parsed.clone()));
        CommitOutcome {
            result,
            value: Some(parsed),
        }
    }

    fn reject(&mut self, result: ValidationResult) -> CommitOutcome<S::Value> {
        let result = match &self.config.message_override {
            Some(message) => result.with_message(message.clone()),
            None => result,
        };
        let message = result.message().unwrap_or("Invalid value").to_string();
        tracing::debug!(
            target: targets::FIELD,
            text = %self.raw_text,
            kind = ?result.kind(),
            %message,
            "commit rejected"
        );

        self.phase = FieldPhase::Invalid;
        self.last_error = Some(result.clone());
        self.alert_pending = self.config.error_policy == ErrorPolicy::Modal;
        self.error_presented.emit(ErrorPresentation {
            message,
            policy: self.config.error_policy,
        });
        CommitOutcome {
            result,
            value: None,
        }
    }

    // =========================================================================
    // Error Resolution
    // =========================================================================

    /// Resolve a failed commit.
    ///
    /// [`ErrorResolution::Edit`] returns to editing with the whole text
    /// selected. [`ErrorResolution::Discard`] clears the text and the
    /// committed value. Ignored unless the field is in
    /// [`FieldPhase::Invalid`].
    pub fn resolve_error(&mut self, resolution: ErrorResolution) {
        if self.phase != FieldPhase::Invalid {
            tracing::trace!(target: targets::FIELD, field = %self.label, ?resolution, "nothing to resolve");
            return;
        }
        tracing::debug!(target: targets::FIELD, field = %self.label, ?resolution, "resolving error");
        self.clear_error();
        match resolution {
            ErrorResolution::Edit => {
                self.focused = true;
                self.text_selected = true;
                self.phase = FieldPhase::Editing;
                self.editing_started.emit(());
            }
            ErrorResolution::Discard => {
                self.raw_text.clear();
                self.text_selected = false;
                self.phase = FieldPhase::Empty;
                self.store(None);
            }
        }
    }

    // =========================================================================
    // External Updates
    // =========================================================================

    /// Set the value from outside, without validation.
    ///
    /// `Some` reformats the text and marks the field valid; `None` clears it.
    /// `value_changed` fires if the value differs, `committed` does not.
    pub fn set_external_value(&mut self, value: Option<S::Value>) {
        self.clear_error();
        self.text_selected = false;
        match &value {
            Some(v) => {
                self.raw_text = self.strategy.format(v);
                self.phase = FieldPhase::Valid;
            }
            None => {
                self.raw_text.clear();
                self.phase = FieldPhase::Empty;
            }
        }
        self.store(value);
    }

    fn clear_error(&mut self) {
        self.last_error = None;
        self.alert_pending = false;
    }

    fn store(&self, value: Option<S::Value>) {
        if self.value.set(value.clone()) {
            self.value_changed.emit(value);
        }
    }
}

impl<S: FieldStrategy + std::fmt::Debug> std::fmt::Debug for FieldController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldController")
            .field("label", &self.label)
            .field("strategy", &self.strategy)
            .field("raw_text", &self.raw_text)
            .field("value", &self.value)
            .field("phase", &self.phase)
            .field("focused", &self.focused)
            .finish()
    }
}

static_assertions::assert_impl_all!(
    FieldController<crate::validation::IntegerRangeStrategy>: Send, Sync
);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::time::{ClockTime, TimeStrategy};
    use crate::validation::{
        CharacterSet, CharacterSetStrategy, FloatingPointRangeStrategy, IntegerRangeStrategy,
    };

    fn integer_field(min: i64, max: i64) -> FieldController<IntegerRangeStrategy> {
        FieldController::new(IntegerRangeStrategy::new(min, max))
    }

    fn type_text<S: FieldStrategy>(field: &mut FieldController<S>, text: &str) {
        for c in text.chars() {
            field.handle_keystroke(c);
        }
    }

    fn record<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        signal.connect(move |value: &T| received_clone.lock().push(value.clone()));
        received
    }

    // =========================================================================
    // Keystroke Tests
    // =========================================================================

    #[test]
    fn test_initial_state() {
        let field = integer_field(0, 10);
        let state = field.state();
        assert_eq!(state.phase, FieldPhase::Empty);
        assert_eq!(state.raw_text, "");
        assert_eq!(state.committed_value, None);
        assert_eq!(state.last_error, None);
        assert!(!state.is_focused);
    }

    #[test]
    fn test_keystroke_filters_characters() {
        let mut field = integer_field(0, 150);
        assert_eq!(field.handle_keystroke('1'), "1");
        assert_eq!(field.handle_keystroke('x'), "1");
        assert_eq!(field.handle_keystroke('2'), "12");
        assert_eq!(field.phase(), FieldPhase::Editing);
    }

    #[test]
    fn test_keystroke_respects_config_cap() {
        let config = FieldConfig::default().with_max_input_length(3);
        let mut field = FieldController::with_config(IntegerRangeStrategy::new(0, 10_000), config);
        type_text(&mut field, "12345");
        assert_eq!(field.text(), "123");
    }

    #[test]
    fn test_cap_is_smaller_of_config_and_strategy() {
        let config = FieldConfig::default().with_max_input_length(10);
        let field = FieldController::with_config(TimeStrategy::new(), config);
        assert_eq!(field.input_limit(), Some(5));
        assert_eq!(integer_field(0, 1).input_limit(), None);
    }

    #[test]
    fn test_time_keystrokes_insert_colon() {
        let mut field = FieldController::new(TimeStrategy::new());
        type_text(&mut field, "1234");
        assert_eq!(field.text(), "12:34");
        // already at five characters
        assert_eq!(field.handle_keystroke('5'), "12:34");
    }

    #[test]
    fn test_paste_filters_and_truncates() {
        let strategy = CharacterSetStrategy::new(CharacterSet::letters());
        let config = FieldConfig::default().with_max_input_length(4);
        let mut field = FieldController::with_config(strategy, config);
        assert_eq!(field.insert_text("a1b2c3d4e5"), "abcd");
    }

    #[test]
    fn test_paste_time_applies_fixup() {
        let mut field = FieldController::new(TimeStrategy::new());
        assert_eq!(field.insert_text("0930"), "09:30");
    }

    #[test]
    fn test_backspace() {
        let mut field = integer_field(0, 999);
        type_text(&mut field, "12");
        assert_eq!(field.handle_backspace(), "1");
        assert_eq!(field.handle_backspace(), "");
        assert_eq!(field.handle_backspace(), "");
    }

    // =========================================================================
    // Commit Tests
    // =========================================================================

    #[test]
    fn test_commit_empty_is_valid_none() {
        let mut field = FieldController::new(TimeStrategy::new());
        let commits = record(&field.committed);
        let outcome = field.commit();
        assert_eq!(outcome.result, ValidationResult::Valid);
        assert_eq!(outcome.value, None);
        assert!(outcome.advances_focus());
        assert_eq!(field.phase(), FieldPhase::Empty);
        assert_eq!(*commits.lock(), vec![None]);
    }

    #[test]
    fn test_commit_valid_reformats() {
        let mut field = FieldController::new(FloatingPointRangeStrategy::with_default_precision(
            0.0, 100.0,
        ));
        let commits = record(&field.committed);
        type_text(&mut field, "42.10");
        let outcome = field.commit();
        assert!(outcome.advances_focus());
        assert_eq!(outcome.value, Some(42.1));
        assert_eq!(field.text(), "42.1");
        assert_eq!(field.committed_value(), Some(42.1));
        assert_eq!(field.phase(), FieldPhase::Valid);
        assert_eq!(*commits.lock(), vec![Some(42.1)]);
    }

    #[test]
    fn test_commit_unparseable() {
        let mut field = integer_field(0, 10);
        type_text(&mut field, "1-");
        let outcome = field.commit();
        assert_eq!(
            outcome.result,
            ValidationResult::Invalid("\"1-\" is not a valid value".into())
        );
        assert!(!outcome.advances_focus());
        assert_eq!(field.phase(), FieldPhase::Invalid);
        assert_eq!(field.text(), "1-");
    }

    #[test]
    fn test_commit_out_of_range_keeps_previous_value() {
        let mut field = integer_field(0, 150);
        type_text(&mut field, "42");
        field.commit();

        field.focus_gained();
        type_text(&mut field, "0");
        let outcome = field.commit();
        assert!(matches!(outcome.result, ValidationResult::TooHigh(_)));
        assert_eq!(outcome.value, None);
        assert_eq!(field.committed_value(), Some(42));
        assert_eq!(field.text(), "420");
        assert_eq!(field.phase(), FieldPhase::Invalid);
    }

    #[test]
    fn test_failed_commit_does_not_notify_observer() {
        let mut field = integer_field(0, 10);
        let commits = record(&field.committed);
        let errors = record(&field.error_presented);
        type_text(&mut field, "11");
        field.commit();
        assert!(commits.lock().is_empty());
        assert_eq!(
            *errors.lock(),
            vec![ErrorPresentation {
                message: "11 is above maximum value of 10".into(),
                policy: ErrorPolicy::Modal,
            }]
        );
    }

    #[test]
    fn test_message_override() {
        let config = FieldConfig::default().with_message_override("Enter a valid age");
        let mut field = FieldController::with_config(IntegerRangeStrategy::new(0, 150), config);
        type_text(&mut field, "200");
        let outcome = field.commit();
        assert_eq!(outcome.result, ValidationResult::TooHigh("Enter a valid age".into()));
    }

    #[test]
    fn test_invalid_time() {
        let mut field = FieldController::new(TimeStrategy::new());
        type_text(&mut field, "2561");
        assert_eq!(field.text(), "25:61");
        let outcome = field.commit();
        assert_eq!(outcome.result.message(), Some(TimeStrategy::INVALID_TIME));
    }

    #[test]
    fn test_partial_time_is_not_a_valid_value() {
        let mut field = FieldController::new(TimeStrategy::new());
        type_text(&mut field, "9");
        let outcome = field.commit();
        assert_eq!(outcome.result.message(), Some("\"9\" is not a valid value"));
    }

    #[test]
    fn test_value_changed_only_on_change() {
        let mut field = integer_field(0, 10);
        let changes = record(&field.value_changed);
        type_text(&mut field, "5");
        field.commit();
        field.focus_gained();
        field.commit();
        assert_eq!(*changes.lock(), vec![Some(5)]);
    }

    // =========================================================================
    // Error Presentation Tests
    // =========================================================================

    #[test]
    fn test_inline_error_hidden_while_focused() {
        let config = FieldConfig::default().with_error_policy(ErrorPolicy::Inline);
        let mut field = FieldController::with_config(IntegerRangeStrategy::new(0, 10), config);
        field.focus_gained();
        type_text(&mut field, "99");
        field.commit();
        assert_eq!(field.inline_error(), None);
        assert!(!field.blocks_focus_change());

        field.focus_lost();
        assert_eq!(field.inline_error(), Some("99 is above maximum value of 10"));
        assert_eq!(field.pending_alert(), None);
    }

    #[test]
    fn test_modal_alert_blocks_focus() {
        let mut field = integer_field(0, 10);
        field.focus_gained();
        type_text(&mut field, "99");
        field.focus_lost();
        assert!(field.blocks_focus_change());
        assert_eq!(field.pending_alert(), Some("99 is above maximum value of 10"));
        assert_eq!(field.inline_error(), None);
    }

    #[test]
    fn test_focus_gained_clears_error() {
        let mut field = integer_field(0, 10);
        let started = record(&field.editing_started);
        type_text(&mut field, "99");
        field.commit();
        field.focus_gained();
        assert!(!field.blocks_focus_change());
        assert_eq!(field.last_error(), None);
        assert_eq!(field.text(), "99");
        assert_eq!(field.phase(), FieldPhase::Editing);
        assert_eq!(started.lock().len(), 1);
    }

    // =========================================================================
    // Error Resolution Tests
    // =========================================================================

    #[test]
    fn test_resolve_edit_selects_all() {
        let mut field = integer_field(0, 10);
        type_text(&mut field, "99");
        field.focus_lost();
        field.resolve_error(ErrorResolution::Edit);

        assert_eq!(field.phase(), FieldPhase::Editing);
        assert!(field.is_focused());
        assert!(field.is_text_selected());
        assert!(!field.blocks_focus_change());

        // typing replaces the selection
        assert_eq!(field.handle_keystroke('7'), "7");
        assert!(!field.is_text_selected());
        assert_eq!(field.commit().value, Some(7));
    }

    #[test]
    fn test_resolve_discard_clears_everything() {
        let mut field = integer_field(0, 10);
        type_text(&mut field, "5");
        field.commit();
        field.focus_gained();
        type_text(&mut field, "5");
        field.commit();
        assert_eq!(field.committed_value(), Some(5));

        field.resolve_error(ErrorResolution::Discard);
        assert_eq!(field.text(), "");
        assert_eq!(field.committed_value(), None);
        assert_eq!(field.phase(), FieldPhase::Empty);
        assert!(!field.blocks_focus_change());
    }

    #[test]
    fn test_resolve_ignored_when_not_invalid() {
        let mut field = integer_field(0, 10);
        type_text(&mut field, "5");
        field.resolve_error(ErrorResolution::Discard);
        assert_eq!(field.text(), "5");
    }

    #[test]
    fn test_backspace_clears_selection() {
        let mut field = integer_field(0, 10);
        type_text(&mut field, "99");
        field.commit();
        field.resolve_error(ErrorResolution::Edit);
        assert_eq!(field.handle_backspace(), "");
    }

    // =========================================================================
    // External Value Tests
    // =========================================================================

    #[test]
    fn test_set_external_value() {
        let mut field = FieldController::new(TimeStrategy::new());
        let commits = record(&field.committed);
        let changes = record(&field.value_changed);

        field.set_external_value(Some(ClockTime::new(7, 5)));
        assert_eq!(field.text(), "07:05");
        assert_eq!(field.phase(), FieldPhase::Valid);

        field.set_external_value(None);
        assert_eq!(field.text(), "");
        assert_eq!(field.phase(), FieldPhase::Empty);

        assert!(commits.lock().is_empty());
        assert_eq!(*changes.lock(), vec![Some(ClockTime::new(7, 5)), None]);
    }

    #[test]
    fn test_set_external_value_skips_validation() {
        let mut field = integer_field(0, 10);
        field.set_external_value(Some(500));
        assert_eq!(field.text(), "500");
        assert_eq!(field.committed_value(), Some(500));
        assert_eq!(field.phase(), FieldPhase::Valid);
    }
}
