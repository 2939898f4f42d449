//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur when building a gate stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operand outside the stream's qubit register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit stream (gate: {gate_name})")]
    QubitOutOfRange {
        /// The out-of-range operand.
        qubit: QubitId,
        /// Size of the stream's register.
        num_qubits: u32,
        /// Name of the offending instruction.
        gate_name: String,
    },

    /// The same qubit appears twice in one instruction's operands.
    #[error("Duplicate qubit {qubit} in operands (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate operand.
        qubit: QubitId,
        /// Name of the offending instruction.
        gate_name: String,
    },

    /// Operand count does not match the gate's arity.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
