//! Change-detecting value cells.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it. Fields keep their committed value in a property so the
//! associated change signal fires only on real changes:
//!
//! ```
//! use fieldwork_core::{Property, Signal};
//!
//! struct Bound {
//!     value: Property<Option<i64>>,
//!     value_changed: Signal<Option<i64>>,
//! }
//!
//! impl Bound {
//!     fn set(&self, new_value: Option<i64>) {
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A shared value slot that knows when a write is a no-op.
///
/// Readers and writers may live on different threads; the slot is
/// `Send + Sync` whenever `T` is.
///
/// ```
/// use fieldwork_core::Property;
///
/// let committed = Property::new(Some(200));
/// assert!(!committed.set(Some(200)));
/// assert!(committed.set(None));
/// assert_eq!(committed.get(), None);
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Slot holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone of the stored value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the stored value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite unconditionally. No change is reported.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`; `true` when it differs from what was there.
    ///
    /// Owners emit their change signal only on `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Store `value` and hand back the previous one, or `None` when unchanged.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<Option<f64>>: Send, Sync);
