//! Error types for evolution synthesis.

use alsvid_ir::{IrError, QubitId};
use alsvid_pauli::PauliError;
use thiserror::Error;

/// Errors that can occur while synthesizing an evolution circuit.
///
/// Every error is raised synchronously by the stage that detects it; no
/// partial gate stream is ever returned alongside one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Product-formula order outside {1} ∪ {2, 4, 6, …}.
    #[error("invalid product-formula order {order}: only 1 and positive even orders are supported")]
    InvalidOrder {
        /// The rejected order.
        order: u32,
    },

    /// Zero Trotter steps requested.
    #[error("invalid step count {reps}: at least one step is required")]
    InvalidStepCount {
        /// The rejected step count.
        reps: u32,
    },

    /// No plugin registered under the requested name.
    #[error("no synthesis plugin named '{name}' (available: {})", .available.join(", "))]
    UnknownPlugin {
        /// The unresolved name.
        name: String,
        /// Registered plugin names, sorted.
        available: Vec<String>,
    },

    /// A plugin-mandatory option key is absent from the request.
    #[error("plugin '{plugin}' requires option '{key}'")]
    MissingOption {
        /// The plugin that declared the key mandatory.
        plugin: String,
        /// The missing key.
        key: String,
    },

    /// The plugin cannot honor exact global phase and was not allowed to
    /// drop it.
    #[error("plugin '{plugin}' does not preserve global phase; set upto_phase = true to accept this")]
    PhaseNotPreserved {
        /// The refusing plugin.
        plugin: String,
    },

    /// Layout size disagrees with the Hamiltonian register.
    #[error("layout maps {got} qubits but the Hamiltonian spans {expected}")]
    LayoutSizeMismatch {
        /// Hamiltonian register size.
        expected: u32,
        /// Layout source size.
        got: u32,
    },

    /// Two source qubits map to the same target.
    #[error("duplicate target qubit {qubit} in layout")]
    DuplicateLayoutQubit {
        /// The repeated target.
        qubit: QubitId,
    },

    /// A layout target lies outside the target register.
    #[error("layout target {qubit} out of range for {num_qubits} target qubits")]
    LayoutTargetOutOfRange {
        /// The offending target.
        qubit: QubitId,
        /// Target register size.
        num_qubits: u32,
    },

    /// Gate-stream construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Term-store construction failed.
    #[error(transparent)]
    Pauli(#[from] PauliError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
