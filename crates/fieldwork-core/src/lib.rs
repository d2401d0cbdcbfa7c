//! Core systems for fieldwork.
//!
//! This crate provides the foundational pieces the field engine is built on:
//!
//! - **Signal/Slot System**: Typed notifications from fields to their host
//! - **Property System**: Change-detecting value cells
//! - **Logging**: `tracing` targets and editing spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use fieldwork_core::Signal;
//!
//! // Create a signal that notifies when a value is committed
//! let committed = Signal::<Option<i64>>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = committed.connect(|value| {
//!     println!("Committed: {:?}", value);
//! });
//!
//! committed.emit(Some(42));
//! committed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::EditSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
