//! Per-field editing state machine.
//!
//! A [`FieldController`] sits between a host text widget and a
//! [`FieldStrategy`](crate::validation::FieldStrategy). The host forwards
//! keystrokes and focus events; the controller filters characters, commits
//! the text through the strategy's parse → validate → format pipeline, and
//! reports results through signals.
//!
//! # Phases
//!
//! ```text
//! Empty ──keystroke/focus──▶ Editing ──commit──▶ Valid | Invalid
//!   ▲                          ▲                       │
//!   └──────── discard ─────────┴──────── edit ─────────┘
//! ```
//!
//! Committing empty text is always acceptable and returns the field to
//! [`FieldPhase::Empty`]. A rejected commit leaves the previous committed
//! value in place and keeps the rejected text for correction.
//!
//! # Error Presentation
//!
//! [`ErrorPolicy::Inline`] shows the message next to the field while it is
//! unfocused. [`ErrorPolicy::Modal`] raises an alert that must be resolved
//! with [`ErrorResolution::Edit`] or [`ErrorResolution::Discard`] before focus
//! may move elsewhere.

mod controller;
mod editable;

pub use controller::FieldController;
pub use editable::EditableField;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

/// The editing phase of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldPhase {
    /// No text and no committed value.
    #[default]
    Empty,
    /// The user is typing.
    Editing,
    /// The last commit succeeded.
    Valid,
    /// The last commit was rejected.
    Invalid,
}

/// How a failed commit is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Message rendered next to the field, hidden while it has focus.
    Inline,
    /// Blocking alert offering edit or discard.
    #[default]
    Modal,
}

/// The user's answer to a validation alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorResolution {
    /// Return to editing with the whole text selected for overwrite.
    Edit,
    /// Clear the text and the committed value.
    Discard,
}

/// Per-field behavior knobs.
///
/// # Example
///
/// ```
/// use fieldwork::field::{ErrorPolicy, FieldConfig};
///
/// let config: FieldConfig = toml::from_str(r#"
///     error_policy = "inline"
///     max_input_length = 3
/// "#).unwrap();
///
/// assert_eq!(config.error_policy, ErrorPolicy::Inline);
/// assert_eq!(config.max_input_length, Some(3));
/// assert_eq!(config.message_override, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// How failed commits are presented.
    pub error_policy: ErrorPolicy,
    /// Maximum number of characters the user may type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_length: Option<usize>,
    /// Message shown instead of the strategy's message on any failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_override: Option<String>,
}

impl FieldConfig {
    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set the typing cap.
    pub fn with_max_input_length(mut self, max: usize) -> Self {
        self.max_input_length = Some(max);
        self
    }

    /// Set the failure message override.
    pub fn with_message_override(mut self, message: impl Into<String>) -> Self {
        self.message_override = Some(message.into());
        self
    }
}

/// The result of a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome<V> {
    /// The validation result.
    pub result: ValidationResult,
    /// The committed value; `None` for empty text and for failures.
    pub value: Option<V>,
}

impl<V> CommitOutcome<V> {
    /// Whether focus may advance to the next field.
    ///
    /// True for valid values and for empty text.
    pub fn advances_focus(&self) -> bool {
        self.result.is_valid()
    }
}

/// A failed commit, as delivered to the host for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPresentation {
    /// The message to show.
    pub message: String,
    /// How to show it.
    pub policy: ErrorPolicy,
}

/// A snapshot of a field's state.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<V> {
    /// The text as displayed.
    pub raw_text: String,
    /// The last successfully committed value.
    pub committed_value: Option<V>,
    /// The result of the last failed commit, until cleared.
    pub last_error: Option<ValidationResult>,
    /// Whether the field has focus.
    pub is_focused: bool,
    /// Whether the whole text is selected for overwrite.
    pub text_selected: bool,
    /// The editing phase.
    pub phase: FieldPhase,
}
