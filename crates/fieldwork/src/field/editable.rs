use std::any::Any;

use super::{ErrorResolution, FieldController, FieldPhase};
use crate::validation::{FieldStrategy, InputMode, ValidationResult};

/// A field with its value type erased.
///
/// Lets numeric, text, and time fields share one [`Form`](crate::form::Form).
/// Use [`as_any`](Self::as_any) to recover the concrete controller.
pub trait EditableField: Send + Sync {
    /// The name used in log output.
    fn label(&self) -> &str;

    /// The text as displayed.
    fn text(&self) -> &str;

    /// The editing phase.
    fn phase(&self) -> FieldPhase;

    /// The keyboard the host should present.
    fn input_mode(&self) -> InputMode;

    /// Whether the field has focus.
    fn is_focused(&self) -> bool;

    /// Offer a typed character; returns the text to display.
    fn handle_keystroke(&mut self, c: char) -> &str;

    /// Offer pasted text; returns the text to display.
    fn insert_text(&mut self, text: &str) -> &str;

    /// Delete backwards; returns the text to display.
    fn handle_backspace(&mut self) -> &str;

    /// The field received focus.
    fn focus_gained(&mut self);

    /// The field lost focus; commits the text.
    fn focus_lost(&mut self) -> ValidationResult;

    /// Commit the text.
    fn commit(&mut self) -> ValidationResult;

    /// Resolve a failed commit.
    fn resolve_error(&mut self, resolution: ErrorResolution);

    /// Clear the text and the committed value without validation.
    fn clear(&mut self);

    /// The committed value in display form, if any.
    fn committed_display(&self) -> Option<String>;

    /// See [`FieldController::inline_error`].
    fn inline_error(&self) -> Option<&str>;

    /// See [`FieldController::pending_alert`].
    fn pending_alert(&self) -> Option<&str>;

    /// See [`FieldController::blocks_focus_change`].
    fn blocks_focus_change(&self) -> bool;

    /// Get this field as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get this field as mutable `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: FieldStrategy + 'static> EditableField for FieldController<S> {
    fn label(&self) -> &str {
        FieldController::label(self)
    }

    fn text(&self) -> &str {
        FieldController::text(self)
    }

    fn phase(&self) -> FieldPhase {
        FieldController::phase(self)
    }

    fn input_mode(&self) -> InputMode {
        self.strategy().input_mode()
    }

    fn is_focused(&self) -> bool {
        FieldController::is_focused(self)
    }

    fn handle_keystroke(&mut self, c: char) -> &str {
        FieldController::handle_keystroke(self, c)
    }

    fn insert_text(&mut self, text: &str) -> &str {
        FieldController::insert_text(self, text)
    }

    fn handle_backspace(&mut self) -> &str {
        FieldController::handle_backspace(self)
    }

    fn focus_gained(&mut self) {
        FieldController::focus_gained(self);
    }

    fn focus_lost(&mut self) -> ValidationResult {
        FieldController::focus_lost(self).result
    }

    fn commit(&mut self) -> ValidationResult {
        FieldController::commit(self).result
    }

    fn resolve_error(&mut self, resolution: ErrorResolution) {
        FieldController::resolve_error(self, resolution);
    }

    fn clear(&mut self) {
        self.set_external_value(None);
    }

    fn committed_display(&self) -> Option<String> {
        self.committed_value().map(|v| self.strategy().format(&v))
    }

    fn inline_error(&self) -> Option<&str> {
        FieldController::inline_error(self)
    }

    fn pending_alert(&self) -> Option<&str> {
        FieldController::pending_alert(self)
    }

    fn blocks_focus_change(&self) -> bool {
        FieldController::blocks_focus_change(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
