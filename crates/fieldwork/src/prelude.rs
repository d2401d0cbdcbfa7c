//! Prelude module for fieldwork.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use fieldwork::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{ConnectionId, Property, Signal};

// ============================================================================
// Strategies
// ============================================================================

pub use crate::time::{ClockTime, TimeMode, TimeStrategy};
pub use crate::validation::{
    CharacterSet, CharacterSetStrategy, FieldStrategy, FloatingPointRangeStrategy, InputMode,
    IntegerRangeStrategy, ValidationResult,
};

// ============================================================================
// Fields and Forms
// ============================================================================

pub use crate::config::FormConfig;
pub use crate::field::{
    CommitOutcome, EditableField, ErrorPolicy, ErrorResolution, FieldConfig, FieldController,
    FieldPhase,
};
pub use crate::focus::{FocusChain, ReturnKey};
pub use crate::form::Form;

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{ConfigError, FocusChainError, FormError, StrategyError};
