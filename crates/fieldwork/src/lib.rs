//! fieldwork - validated, chained input fields.
//!
//! This is the main crate. It re-exports `fieldwork-core` and adds the field
//! engine itself:
//!
//! - [`validation`]: strategies that filter, parse, validate, and format input
//! - [`time`]: minutes-since-midnight conversion and `HH:MM` time fields
//! - [`field`]: the per-field commit state machine
//! - [`focus`]: focus chains that advance after successful commits
//! - [`form`]: one editing session across several fields
//! - [`config`]: forms described in TOML
//!
//! # Example
//!
//! ```
//! use fieldwork::prelude::*;
//!
//! let mut age = FieldController::new(IntegerRangeStrategy::new(0, 150));
//! for c in "200".chars() {
//!     age.handle_keystroke(c);
//! }
//!
//! let outcome = age.commit();
//! assert!(matches!(outcome.result, ValidationResult::TooHigh(_)));
//! assert_eq!(age.phase(), FieldPhase::Invalid);
//! assert_eq!(age.committed_value(), None);
//! ```

pub use fieldwork_core::*;

pub mod config;
pub mod error;
pub mod field;
pub mod focus;
pub mod form;
pub mod prelude;
pub mod time;
pub mod validation;

pub use error::{ConfigError, FocusChainError, FormError, StrategyError};
