//! Typed notifications from fields to their host.
//!
//! A field never calls back into host code directly. It owns one [`Signal`]
//! per kind of event (a value committed, an error to present, focus moving
//! along a chain) and the host subscribes closures to the ones it cares
//! about.
//!
//! - [`Signal<Args>`] holds the subscribed closures and emits to them
//! - [`ConnectionId`] names one subscription so it can be dropped later
//! - [`ConnectionGuard`] drops its subscription when it goes out of scope
//!
//! # Delivery
//!
//! Field editing is event driven and single threaded: every slot is invoked
//! synchronously on the emitting thread, in the order it was connected. There
//! is no queued delivery. The connection table is snapshotted before slots run,
//! so a slot may connect or disconnect other slots while being invoked.
//!
//! ```
//! use fieldwork_core::Signal;
//!
//! let committed = Signal::<Option<i64>>::new();
//! let id = committed.connect(|value| println!("bound value is now {value:?}"));
//!
//! committed.emit(Some(42));
//! committed.emit(None);
//! assert!(committed.disconnect(id));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifies one subscription on a [`Signal`].
    ///
    /// Stays valid until passed to [`Signal::disconnect`]; ids are never
    /// reused for later subscriptions.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A notification channel with any number of subscribers.
///
/// Slots receive the emitted payload by reference. Payloads are usually the
/// field's value type wrapped in `Option`, or `()` for bare events.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Subscribe a closure; keep the returned id to unsubscribe.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Subscribe a closure for as long as the returned guard lives.
    ///
    /// The guard borrows the signal, so it can never outlive it.
    ///
    /// ```
    /// use fieldwork_core::Signal;
    ///
    /// let editing_started = Signal::<()>::new();
    /// {
    ///     let _guard = editing_started.connect_scoped(|_| println!("editing"));
    ///     assert_eq!(editing_started.connection_count(), 1);
    /// }
    /// assert_eq!(editing_started.connection_count(), 0);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            id: self.connect(slot),
            signal: self,
        }
    }

    /// Unsubscribe; returns `false` if the id was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Unsubscribe everything.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// How many closures are subscribed.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Suppress or resume emission.
    ///
    /// Hosts block a field's signals while restoring saved values so the
    /// restore is not echoed back as user edits.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Deliver `args` to every subscriber, oldest subscription first.
    ///
    /// Does nothing while blocked.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "emit suppressed while blocked");
            return;
        }

        // snapshot: slots may (dis)connect while running
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emit");

        for slot in &slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// Keeps a subscription alive; unsubscribes on drop.
///
/// Returned by [`Signal::connect_scoped`].
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The guarded subscription.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(Signal<Option<String>>: Send, Sync);
