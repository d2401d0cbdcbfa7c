//! Focus chains across fields.
//!
//! A [`FocusChain`] maps each field to the field that should receive focus
//! after it commits successfully. A field without a successor ends the
//! editing session, at which point the host dismisses its input surface.
//!
//! Chains need not be acyclic: linking the last field back to the first is
//! the usual way to keep focus cycling through a form. Only a field naming
//! itself is rejected, since it would re-focus forever.
//!
//! # Usage
//!
//! ```
//! use fieldwork::focus::{FocusChain, ReturnKey};
//!
//! let mut chain = FocusChain::from_sequence(["name", "age", "email"], false).unwrap();
//!
//! chain.activate("name");
//! assert_eq!(chain.advance(&"name"), Some("age"));
//! assert_eq!(chain.return_key(&"email"), ReturnKey::Done);
//! assert_eq!(chain.advance(&"email"), None);
//! assert_eq!(chain.active(), None);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use fieldwork_core::Signal;

use crate::error::FocusChainError;
use crate::logging::targets;

/// The label a host should put on the return key of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnKey {
    /// Another field follows.
    Next,
    /// The chain ends here.
    Done,
}

/// Successor mapping between fields, plus the currently active field.
///
/// # Signals
///
/// - `focus_changed`: the active field changed (`None` when cleared)
/// - `editing_ended`: [`advance`](Self::advance) ran off the end of the chain
pub struct FocusChain<Id> {
    /// Field → successor, `None` marking the end of the chain.
    successors: HashMap<Id, Option<Id>>,
    /// The field that currently has focus.
    active: Option<Id>,

    // Signals

    /// Signal emitted when the active field changes.
    pub focus_changed: Signal<Option<Id>>,

    /// Signal emitted when editing ends at the end of the chain.
    pub editing_ended: Signal<()>,
}

impl<Id> FocusChain<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            successors: HashMap::new(),
            active: None,
            focus_changed: Signal::new(),
            editing_ended: Signal::new(),
        }
    }

    /// Build a chain that visits `ids` in order.
    ///
    /// With `looped`, the last field hands focus back to the first.
    pub fn from_sequence(
        ids: impl IntoIterator<Item = Id>,
        looped: bool,
    ) -> Result<Self, FocusChainError> {
        let ids: Vec<Id> = ids.into_iter().collect();
        let mut chain = Self::new();
        for (index, id) in ids.iter().enumerate() {
            let next = match ids.get(index + 1) {
                Some(next) => Some(next.clone()),
                None if looped => ids.first().cloned(),
                None => None,
            };
            chain.link(id.clone(), next)?;
        }
        Ok(chain)
    }

    /// Set the successor of a field, replacing any previous link.
    ///
    /// Returns an error if `next` is the field itself.
    pub fn link(&mut self, id: Id, next: Option<Id>) -> Result<(), FocusChainError> {
        if next.as_ref() == Some(&id) {
            tracing::warn!(target: targets::FOCUS, ?id, "rejected self-loop");
            return Err(FocusChainError::SelfLoop(format!("{id:?}")));
        }
        self.successors.insert(id, next);
        Ok(())
    }

    /// Remove a field from the chain, returning its successor link.
    ///
    /// Links from other fields to it are kept.
    pub fn unlink(&mut self, id: &Id) -> Option<Option<Id>> {
        if self.active.as_ref() == Some(id) {
            self.deactivate();
        }
        self.successors.remove(id)
    }

    /// Check whether a field is part of the chain.
    pub fn contains(&self, id: &Id) -> bool {
        self.successors.contains_key(id)
    }

    /// Number of fields in the chain.
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Returns `true` if the chain has no fields.
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// The successor of a field, or `None` at the end of the chain.
    pub fn next(&self, id: &Id) -> Option<&Id> {
        self.successors.get(id).and_then(Option::as_ref)
    }

    /// The return-key label for a field.
    pub fn return_key(&self, id: &Id) -> ReturnKey {
        if self.next(id).is_some() {
            ReturnKey::Next
        } else {
            ReturnKey::Done
        }
    }

    /// The field that currently has focus.
    #[inline]
    pub fn active(&self) -> Option<&Id> {
        self.active.as_ref()
    }

    /// Give focus to a field.
    pub fn activate(&mut self, id: Id) {
        if self.active.as_ref() == Some(&id) {
            return;
        }
        tracing::debug!(target: targets::FOCUS, ?id, "focus moved");
        self.active = Some(id.clone());
        self.focus_changed.emit(Some(id));
    }

    /// Clear focus.
    pub fn deactivate(&mut self) {
        if self.active.take().is_some() {
            self.focus_changed.emit(None);
        }
    }

    /// Move focus from `from` to its successor.
    ///
    /// At the end of the chain, focus is cleared and `editing_ended` fires.
    /// Returns the newly active field.
    pub fn advance(&mut self, from: &Id) -> Option<Id> {
        match self.next(from).cloned() {
            Some(next) => {
                self.activate(next.clone());
                Some(next)
            }
            None => {
                tracing::debug!(target: targets::FOCUS, ?from, "end of chain");
                self.deactivate();
                self.editing_ended.emit(());
                None
            }
        }
    }
}

impl<Id> Default for FocusChain<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: fmt::Debug> fmt::Debug for FocusChain<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusChain")
            .field("successors", &self.successors)
            .field("active", &self.active)
            .finish()
    }
}

static_assertions::assert_impl_all!(FocusChain<String>: Send, Sync);
