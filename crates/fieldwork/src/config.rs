//! Declarative form configuration.
//!
//! A form can be described in TOML as a list of `[[field]]` tables and built
//! into a [`Form<String>`]:
//!
//! ```toml
//! [[field]]
//! id = "age"
//! kind = "integer"
//! min = 0
//! max = 150
//! next = "weight"
//!
//! [[field]]
//! id = "weight"
//! kind = "float"
//! min = 0.5
//! max = 500
//! decimals = 1
//! error_policy = "inline"
//! next = "name"
//!
//! [[field]]
//! id = "name"
//! kind = "characters"
//! allowed = { classes = ["letters"], extra = " -" }
//! max_length = 40
//! next = "start"
//!
//! [[field]]
//! id = "start"
//! kind = "time"
//! mode = "time"
//! message_override = "Use HH:MM"
//! ```
//!
//! Every field accepts the [`FieldConfig`] keys (`error_policy`,
//! `max_input_length`, `message_override`) alongside its kind parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, FormError};
use crate::field::{FieldConfig, FieldController};
use crate::form::Form;
use crate::logging::targets;
use crate::time::{TimeMode, TimeStrategy};
use crate::validation::{
    CharacterSet, CharacterSetStrategy, FloatingPointRangeStrategy, IntegerRangeStrategy,
};

/// A whole form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// The fields, in display order.
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,
}

/// One field of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique field id.
    pub id: String,
    /// The field that receives focus after this one commits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// The strategy and its parameters.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Behavior knobs.
    #[serde(flatten)]
    pub config: FieldConfig,
}

/// Strategy selection, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// [`IntegerRangeStrategy`].
    Integer { min: i64, max: i64 },
    /// [`FloatingPointRangeStrategy`].
    Float {
        min: f64,
        max: f64,
        #[serde(default = "default_decimals")]
        decimals: u32,
    },
    /// [`CharacterSetStrategy`].
    Characters {
        #[serde(default)]
        allowed: CharacterSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// [`TimeStrategy`].
    Time {
        #[serde(default)]
        mode: TimeMode,
    },
}

fn default_decimals() -> u32 {
    FloatingPointRangeStrategy::DEFAULT_DECIMALS
}

impl FormConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            target: targets::CONFIG,
            path = %path.display(),
            fields = config.fields.len(),
            "loaded form configuration"
        );
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check the field layout without building a form.
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, spec) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|other| other.id == spec.id) {
                tracing::warn!(target: targets::CONFIG, id = %spec.id, "duplicate field id");
                return Err(FormError::DuplicateField(format!("{:?}", spec.id)).into());
            }
            if let Some(next) = &spec.next
                && !self.fields.iter().any(|other| &other.id == next)
            {
                tracing::warn!(target: targets::CONFIG, id = %spec.id, %next, "unknown successor");
                return Err(ConfigError::UnknownSuccessor {
                    field: spec.id.clone(),
                    next: next.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build a form with one field per spec, linked by `next`.
    pub fn build(&self) -> ConfigResult<Form<String>> {
        self.validate()?;
        let mut form = Form::new();
        for spec in &self.fields {
            spec.add_to(&mut form)?;
        }
        tracing::info!(target: targets::CONFIG, fields = form.len(), "built form");
        Ok(form)
    }
}

impl FieldSpec {
    fn add_to(&self, form: &mut Form<String>) -> ConfigResult<()> {
        let strategy_error = |source| ConfigError::Strategy {
            field: self.id.clone(),
            source,
        };
        let config = self.config.clone();
        let id = self.id.clone();
        let next = self.next.clone();

        match &self.kind {
            FieldKind::Integer { min, max } => {
                let strategy = IntegerRangeStrategy::try_new(*min, *max).map_err(strategy_error)?;
                form.add_field(id, self.controller(strategy, config), next)?;
            }
            FieldKind::Float { min, max, decimals } => {
                let strategy = FloatingPointRangeStrategy::try_new(*min, *max, *decimals)
                    .map_err(strategy_error)?;
                form.add_field(id, self.controller(strategy, config), next)?;
            }
            FieldKind::Characters {
                allowed,
                max_length,
            } => {
                let mut strategy = CharacterSetStrategy::new(allowed.clone());
                if let Some(max) = max_length {
                    strategy = strategy.with_max_length(*max);
                }
                form.add_field(id, self.controller(strategy, config), next)?;
            }
            FieldKind::Time { mode } => {
                let strategy = TimeStrategy::with_mode(*mode);
                form.add_field(id, self.controller(strategy, config), next)?;
            }
        }
        Ok(())
    }

    fn controller<S: crate::validation::FieldStrategy>(
        &self,
        strategy: S,
        config: FieldConfig,
    ) -> FieldController<S> {
        FieldController::with_config(strategy, config).with_label(self.id.clone())
    }
}
