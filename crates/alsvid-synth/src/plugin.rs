//! Synthesis strategy plugins and their registry.
//!
//! The registry is the pipeline's dispatch layer: a request names a plugin,
//! the registry resolves it, checks the plugin's mandatory options and
//! delegates. Plugins are stateless values (all per-call configuration
//! travels in the request), so concurrent synthesis calls never interfere.
//! The process-wide default registry is built once and treated as
//! read-only afterward.

use std::sync::OnceLock;

use alsvid_ir::GateStream;
use alsvid_pauli::SparseHamiltonian;
use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use crate::assemble::Layout;
use crate::error::{SynthError, SynthResult};
use crate::grouped::CommutingGroups;
use crate::product_formula::ProductFormula;
use crate::request::EvolutionRequest;

/// A global synthesis strategy.
///
/// A plugin consumes the whole Hamiltonian and the request and produces
/// the complete gate stream; it is free to go through the per-factor
/// default pipeline or to apply a global algorithm over the full term
/// list. Implementations must not carry mutable state across calls.
pub trait SynthesisPlugin: Send + Sync {
    /// The name this plugin is addressed by.
    fn name(&self) -> &'static str;

    /// Option keys that must be present in the request.
    fn mandatory_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Synthesize the evolution circuit.
    fn synthesize(
        &self,
        hamiltonian: &SparseHamiltonian,
        request: &EvolutionRequest,
        layout: &Layout,
    ) -> SynthResult<GateStream>;
}

/// Central registry mapping plugin names to strategies.
pub struct PluginRegistry {
    plugins: FxHashMap<String, Box<dyn SynthesisPlugin>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: FxHashMap::default(),
        }
    }

    /// Create a registry holding the built-in plugins.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ProductFormula));
        registry.register(Box::new(CommutingGroups));
        registry
    }

    /// Register a plugin under its own name.
    pub fn register(&mut self, plugin: Box<dyn SynthesisPlugin>) {
        debug!("Registering synthesis plugin: {}", plugin.name());
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    /// Look up a plugin by name.
    pub fn get(&self, name: &str) -> Option<&dyn SynthesisPlugin> {
        self.plugins.get(name).map(|plugin| plugin.as_ref())
    }

    /// Check whether a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// All registered plugin names, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<_> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Dispatch a request to its plugin.
    #[instrument(skip(self, hamiltonian, request, layout), fields(plugin = %request.plugin))]
    pub fn synthesize(
        &self,
        hamiltonian: &SparseHamiltonian,
        request: &EvolutionRequest,
        layout: &Layout,
    ) -> SynthResult<GateStream> {
        if layout.num_source_qubits() != hamiltonian.num_qubits() {
            return Err(SynthError::LayoutSizeMismatch {
                expected: hamiltonian.num_qubits(),
                got: layout.num_source_qubits(),
            });
        }

        let plugin = self
            .get(&request.plugin)
            .ok_or_else(|| SynthError::UnknownPlugin {
                name: request.plugin.clone(),
                available: self.available(),
            })?;

        for key in plugin.mandatory_options() {
            if !request.options.contains(key) {
                return Err(SynthError::MissingOption {
                    plugin: plugin.name().to_string(),
                    key: (*key).to_string(),
                });
            }
        }

        info!(
            "Synthesizing evolution of {} terms over {} qubits (order {}, {} steps)",
            hamiltonian.num_terms(),
            hamiltonian.num_qubits(),
            request.order,
            request.reps,
        );
        let stream = plugin.synthesize(hamiltonian, request, layout)?;
        debug!(
            "Plugin {} emitted {} gates, depth {}",
            plugin.name(),
            stream.num_gates(),
            stream.depth(),
        );
        Ok(stream)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry of built-in plugins.
pub fn default_registry() -> &'static PluginRegistry {
    static REGISTRY: OnceLock<PluginRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PluginRegistry::with_builtins)
}

/// Synthesize an evolution circuit using the default registry.
pub fn synthesize(
    hamiltonian: &SparseHamiltonian,
    request: &EvolutionRequest,
    layout: &Layout,
) -> SynthResult<GateStream> {
    default_registry().synthesize(hamiltonian, request, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn single_z() -> SparseHamiltonian {
        SparseHamiltonian::from_sparse_list(
            [("Z".to_string(), vec![0], Complex64::new(1.0, 0.0))],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_builtins_registered() {
        let registry = PluginRegistry::with_builtins();
        assert!(registry.contains("product-formula"));
        assert!(registry.contains("commuting-groups"));
        assert_eq!(
            registry.available(),
            vec!["commuting-groups", "product-formula"]
        );
    }

    #[test]
    fn test_unknown_plugin() {
        let registry = PluginRegistry::with_builtins();
        let request = EvolutionRequest::new(1.0).with_plugin("nonexistent");
        let err = registry
            .synthesize(&single_z(), &request, &Layout::identity(1))
            .unwrap_err();
        let SynthError::UnknownPlugin { name, available } = err else {
            panic!("expected UnknownPlugin, got {err:?}");
        };
        assert_eq!(name, "nonexistent");
        assert!(available.contains(&"product-formula".to_string()));
    }

    #[test]
    fn test_layout_size_checked_before_dispatch() {
        let registry = PluginRegistry::with_builtins();
        let request = EvolutionRequest::new(1.0);
        let err = registry
            .synthesize(&single_z(), &request, &Layout::identity(3))
            .unwrap_err();
        assert!(matches!(
            err,
            SynthError::LayoutSizeMismatch {
                expected: 1,
                got: 3
            }
        ));
    }

    #[test]
    fn test_custom_plugin_registration() {
        struct Empty;
        impl SynthesisPlugin for Empty {
            fn name(&self) -> &'static str {
                "empty"
            }
            fn synthesize(
                &self,
                _hamiltonian: &SparseHamiltonian,
                _request: &EvolutionRequest,
                layout: &Layout,
            ) -> SynthResult<GateStream> {
                Ok(GateStream::new(layout.num_target_qubits()))
            }
        }

        let mut registry = PluginRegistry::new();
        registry.register(Box::new(Empty));
        let request = EvolutionRequest::new(1.0).with_plugin("empty");
        let stream = registry
            .synthesize(&single_z(), &request, &Layout::identity(1))
            .unwrap();
        assert!(stream.is_empty());
    }

    #[test]
    fn test_mandatory_option_enforced() {
        let registry = PluginRegistry::with_builtins();
        let request = EvolutionRequest::new(1.0).with_plugin("commuting-groups");
        let err = registry
            .synthesize(&single_z(), &request, &Layout::identity(1))
            .unwrap_err();
        let SynthError::MissingOption { plugin, key } = err else {
            panic!("expected MissingOption, got {err:?}");
        };
        assert_eq!(plugin, "commuting-groups");
        assert_eq!(key, "upto_phase");
    }
}
