//! Logging facilities for fieldwork.
//!
//! fieldwork uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("fieldwork=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "fieldwork_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "fieldwork_core::signal";
    /// Strategy construction and parsing.
    pub const STRATEGY: &str = "fieldwork::strategy";
    /// Field controller state machine.
    pub const FIELD: &str = "fieldwork::field";
    /// Focus chain navigation.
    pub const FOCUS: &str = "fieldwork::focus";
    /// Form coordination.
    pub const FORM: &str = "fieldwork::form";
    /// Declarative form configuration.
    pub const CONFIG: &str = "fieldwork::config";
    /// Time conversion.
    pub const TIME: &str = "fieldwork::time";
}

/// A guard that keeps an editing span entered until dropped.
///
/// Every log event emitted while the guard is alive carries the field name.
#[derive(Debug)]
pub struct EditSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl EditSpan {
    /// Enter a commit span for the named field.
    pub fn commit(field: &str) -> Self {
        let span = tracing::debug_span!(target: "fieldwork::field", "commit", field = field);
        Self {
            span: span.entered(),
        }
    }

    /// Enter a submit span for the named field.
    pub fn submit(field: &str) -> Self {
        let span = tracing::debug_span!(target: "fieldwork::form", "submit", field = field);
        Self {
            span: span.entered(),
        }
    }
}
