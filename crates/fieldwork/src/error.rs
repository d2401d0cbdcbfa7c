//! Error types for fieldwork.
//!
//! User input never produces these errors: rejected input is reported through
//! [`ValidationResult`](crate::validation::ValidationResult) values. The types
//! here cover programmer and configuration mistakes, such as an inverted range
//! or a field that names itself as its own successor.

use std::path::PathBuf;

/// Errors raised while constructing a strategy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrategyError {
    /// The lower bound is greater than the upper bound.
    #[error("min ({min}) must be <= max ({max})")]
    InvertedRange { min: String, max: String },

    /// A floating-point bound is NaN or infinite.
    #[error("range bound {0} is not a finite number")]
    NonFiniteBound(f64),
}

impl StrategyError {
    /// Create an inverted range error from any displayable bounds.
    pub fn inverted_range(min: impl ToString, max: impl ToString) -> Self {
        Self::InvertedRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Errors raised while building a focus chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusChainError {
    /// A field was linked to itself, which would re-focus it forever.
    #[error("field {0} cannot be its own successor")]
    SelfLoop(String),
}

/// Errors raised by a [`Form`](crate::form::Form).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// No field is registered under the given id.
    #[error("unknown field {0}")]
    UnknownField(String),

    /// A field with the given id is already registered.
    #[error("field {0} is already registered")]
    DuplicateField(String),

    /// No field currently has focus.
    #[error("no field is active")]
    NoActiveField,

    /// A modal validation alert must be resolved before focus can move.
    #[error("field {0} has a validation alert that must be resolved first")]
    ModalErrorPending(String),

    /// The focus chain rejected a link.
    #[error(transparent)]
    Chain(#[from] FocusChainError),
}

/// Errors raised while loading a declarative form configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed or did not match the schema.
    #[error("invalid form configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize form configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file could not be read.
    #[error("failed to read form configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field's `next` names a field that does not exist.
    #[error("field {field} links to unknown field {next}")]
    UnknownSuccessor { field: String, next: String },

    /// A field's strategy parameters are inconsistent.
    #[error("field {field}: {source}")]
    Strategy {
        field: String,
        #[source]
        source: StrategyError,
    },

    /// The form rejected the field layout.
    #[error(transparent)]
    Form(#[from] FormError),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for strategy construction.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;

/// Result type alias for form operations.
pub type FormResult<T> = std::result::Result<T, FormError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
