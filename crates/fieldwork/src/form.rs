//! One editing session across several fields.
//!
//! A [`Form`] owns a set of [`EditableField`]s and the [`FocusChain`] that
//! links them. Hosts forward events for whichever field is active; the form
//! commits fields as focus moves and advances the chain after successful
//! submits.
//!
//! # Example
//!
//! ```
//! use fieldwork::prelude::*;
//!
//! let mut form = Form::new();
//! form.add_field("age", FieldController::new(IntegerRangeStrategy::new(0, 150)), Some("start"))
//!     .unwrap();
//! form.add_field("start", FieldController::new(TimeStrategy::new()), None)
//!     .unwrap();
//!
//! form.focus(&"age").unwrap();
//! form.paste("42").unwrap();
//! assert!(form.submit().unwrap().is_valid());
//! assert_eq!(form.active(), Some(&"start"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use fieldwork_core::EditSpan;

use crate::error::{FormError, FormResult};
use crate::field::{EditableField, ErrorResolution, FieldController};
use crate::focus::FocusChain;
use crate::logging::targets;
use crate::validation::{FieldStrategy, ValidationResult};

/// Fields of one editing session and the chain between them.
pub struct Form<Id> {
    fields: HashMap<Id, Box<dyn EditableField>>,
    order: Vec<Id>,
    chain: FocusChain<Id>,
}

impl<Id> Form<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    /// Create an empty form.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            order: Vec::new(),
            chain: FocusChain::new(),
        }
    }

    /// Register a field and its successor.
    ///
    /// The successor may be registered later.
    pub fn add_field(
        &mut self,
        id: Id,
        field: impl EditableField + 'static,
        next: Option<Id>,
    ) -> FormResult<()> {
        if self.fields.contains_key(&id) {
            return Err(FormError::DuplicateField(format!("{id:?}")));
        }
        self.chain.link(id.clone(), next)?;
        tracing::trace!(target: targets::FORM, ?id, "field added");
        self.fields.insert(id.clone(), Box::new(field));
        self.order.push(id);
        Ok(())
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Get a field.
    pub fn field(&self, id: &Id) -> Option<&dyn EditableField> {
        self.fields.get(id).map(|field| field.as_ref())
    }

    /// Get a field mutably.
    pub fn field_mut(&mut self, id: &Id) -> Option<&mut (dyn EditableField + 'static)> {
        self.fields.get_mut(id).map(|field| field.as_mut())
    }

    /// Get a field as its concrete controller.
    ///
    /// Returns `None` if the field does not exist or uses another strategy.
    pub fn field_as<S: FieldStrategy + 'static>(&self, id: &Id) -> Option<&FieldController<S>> {
        self.fields.get(id)?.as_any().downcast_ref()
    }

    /// Get a field as its concrete controller, mutably.
    pub fn field_as_mut<S: FieldStrategy + 'static>(
        &mut self,
        id: &Id,
    ) -> Option<&mut FieldController<S>> {
        self.fields.get_mut(id)?.as_any_mut().downcast_mut()
    }

    /// Field ids in registration order.
    pub fn ids(&self) -> &[Id] {
        &self.order
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The focus chain, for connecting to its signals.
    pub fn chain(&self) -> &FocusChain<Id> {
        &self.chain
    }

    /// The active field.
    pub fn active(&self) -> Option<&Id> {
        self.chain.active()
    }

    /// Committed values in display form, in registration order.
    pub fn committed_displays(&self) -> Vec<(Id, Option<String>)> {
        self.order
            .iter()
            .filter_map(|id| {
                let field = self.fields.get(id)?;
                Some((id.clone(), field.committed_display()))
            })
            .collect()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move focus to a field.
    ///
    /// The previously active field loses focus and commits. Focus stays put
    /// if that field has, or now raises, a modal alert.
    pub fn focus(&mut self, id: &Id) -> FormResult<()> {
        if !self.fields.contains_key(id) {
            return Err(FormError::UnknownField(format!("{id:?}")));
        }
        if self.chain.active() == Some(id) {
            return Ok(());
        }

        if let Some(previous) = self.chain.active().cloned() {
            self.release(&previous)?;
        }

        if let Some(field) = self.fields.get_mut(id) {
            field.focus_gained();
        }
        self.chain.activate(id.clone());
        Ok(())
    }

    /// End editing: the active field loses focus and commits.
    ///
    /// Returns `None` if no field was active. The field stays active if its
    /// commit raised a modal alert.
    pub fn blur(&mut self) -> FormResult<Option<ValidationResult>> {
        let Some(active) = self.chain.active().cloned() else {
            return Ok(None);
        };
        let field = self.active_field_mut(&active)?;
        let result = field.focus_lost();
        if !field.blocks_focus_change() {
            self.chain.deactivate();
        }
        Ok(Some(result))
    }

    fn release(&mut self, id: &Id) -> FormResult<()> {
        let field = self.active_field_mut(id)?;
        field.focus_lost();
        if field.blocks_focus_change() {
            return Err(FormError::ModalErrorPending(format!("{id:?}")));
        }
        Ok(())
    }

    fn active_field_mut(&mut self, id: &Id) -> FormResult<&mut Box<dyn EditableField>> {
        let field = self
            .fields
            .get_mut(id)
            .ok_or_else(|| FormError::UnknownField(format!("{id:?}")))?;
        if field.blocks_focus_change() {
            return Err(FormError::ModalErrorPending(format!("{id:?}")));
        }
        Ok(field)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    fn with_active<R>(
        &mut self,
        f: impl FnOnce(&mut Box<dyn EditableField>) -> R,
    ) -> FormResult<R> {
        let id = self.chain.active().ok_or(FormError::NoActiveField)?;
        let field = self
            .fields
            .get_mut(id)
            .ok_or_else(|| FormError::UnknownField(format!("{id:?}")))?;
        Ok(f(field))
    }

    /// Type a character into the active field; returns its text.
    pub fn type_char(&mut self, c: char) -> FormResult<String> {
        self.with_active(|field| field.handle_keystroke(c).to_string())
    }

    /// Paste into the active field; returns its text.
    pub fn paste(&mut self, text: &str) -> FormResult<String> {
        self.with_active(|field| field.insert_text(text).to_string())
    }

    /// Delete backwards in the active field; returns its text.
    pub fn backspace(&mut self) -> FormResult<String> {
        self.with_active(|field| field.handle_backspace().to_string())
    }

    /// Resolve the active field's validation alert.
    pub fn resolve_error(&mut self, resolution: ErrorResolution) -> FormResult<()> {
        self.with_active(|field| field.resolve_error(resolution))
    }

    /// Press return on the active field.
    ///
    /// The field commits; on a valid or empty outcome focus advances along
    /// the chain, ending the session after the last field. On failure focus
    /// stays on the field.
    pub fn submit(&mut self) -> FormResult<ValidationResult> {
        let active = self.chain.active().cloned().ok_or(FormError::NoActiveField)?;
        let field = self.active_field_mut(&active)?;
        let _span = EditSpan::submit(field.label());

        let result = field.focus_lost();
        if !result.is_valid() {
            tracing::debug!(target: targets::FORM, ?active, %result, "submit rejected");
            return Ok(result);
        }

        if let Some(next) = self.chain.advance(&active) {
            match self.fields.get_mut(&next) {
                Some(field) => field.focus_gained(),
                None => {
                    tracing::warn!(target: targets::FORM, ?next, "successor is not a registered field");
                }
            }
        }
        Ok(result)
    }
}

impl<Id> Default for Form<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: fmt::Debug> fmt::Debug for Form<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.order)
            .field("chain", &self.chain)
            .finish()
    }
}

static_assertions::assert_impl_all!(Form<String>: Send, Sync);
