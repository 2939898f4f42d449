//! Evolution requests and plugin options.

use alsvid_ir::ParameterExpression;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Name of the default synthesis plugin.
pub const DEFAULT_PLUGIN: &str = "product-formula";

/// Option keys recognized by the built-in plugins. Unrecognized keys are
/// ignored unless a plugin declares them mandatory.
pub mod options {
    /// `bool`: allow the output to differ from the exact evolution by a
    /// global phase. Recognized by every built-in plugin; mandatory for
    /// `commuting-groups`.
    pub const UPTO_PHASE: &str = "upto_phase";
    /// `bool`: use the fountain-shaped parity ladder (every CX targets the
    /// designated qubit) instead of the nearest-neighbor chain.
    pub const CX_FOUNTAIN: &str = "cx_fountain";
    /// `bool`: lower two-qubit XX/YY/ZZ/ZX terms to the native two-qubit
    /// rotation gates instead of the general ladder.
    pub const NATIVE_2Q: &str = "native_2q";
    /// `bool`: insert a barrier between per-term gate blocks.
    pub const INSERT_BARRIERS: &str = "insert_barriers";
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

/// A string-keyed map of plugin options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthOptions {
    values: FxHashMap<String, OptionValue>,
}

impl SynthOptions {
    /// Create an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Look up a boolean option; non-boolean values read as absent.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(OptionValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Check whether no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A complete synthesis request: duration, approximation parameters,
/// plugin selector and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRequest {
    /// Evolution duration, concrete or symbolic.
    pub time: ParameterExpression,
    /// Product-formula order: 1 (Lie–Trotter) or a positive even integer
    /// (symmetric Suzuki).
    pub order: u32,
    /// Number of Trotter steps the duration is divided into.
    pub reps: u32,
    /// Name of the synthesis plugin to dispatch to.
    pub plugin: String,
    /// Plugin options.
    pub options: SynthOptions,
}

impl EvolutionRequest {
    /// Create a request with order 1, a single step and the default plugin.
    pub fn new(time: impl Into<ParameterExpression>) -> Self {
        Self {
            time: time.into(),
            order: 1,
            reps: 1,
            plugin: DEFAULT_PLUGIN.to_string(),
            options: SynthOptions::new(),
        }
    }

    /// Set the product-formula order.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the Trotter step count.
    #[must_use]
    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = reps;
        self
    }

    /// Select a synthesis plugin by name.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = plugin.into();
        self
    }

    /// Set a plugin option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.set(key, value);
        self
    }

    /// Validate order and step count.
    pub fn validate(&self) -> SynthResult<()> {
        if self.order == 0 || (self.order > 1 && self.order % 2 != 0) {
            return Err(SynthError::InvalidOrder { order: self.order });
        }
        if self.reps == 0 {
            return Err(SynthError::InvalidStepCount { reps: self.reps });
        }
        Ok(())
    }

    /// Whether the caller accepts output correct only up to global phase.
    pub fn upto_phase(&self) -> bool {
        self.options.get_bool(options::UPTO_PHASE).unwrap_or(false)
    }
}
