//! Error types for the Pauli term store.

use thiserror::Error;

/// A defect in one sparse-list entry.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedTerm {
    /// Label string and index list disagree in length.
    #[error("label '{label}' has {label_len} characters but {index_len} qubit indices")]
    LabelIndexMismatch {
        /// The offending label.
        label: String,
        /// Characters in the label.
        label_len: usize,
        /// Entries in the index list.
        index_len: usize,
    },

    /// A qubit index is outside the register.
    #[error("qubit index {index} out of range for {num_qubits} qubits")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Register size.
        num_qubits: u32,
    },

    /// The same qubit index appears twice in one entry.
    #[error("duplicate qubit index {index} within one term")]
    DuplicateIndex {
        /// The repeated index.
        index: u32,
    },

    /// A label character outside {X, Y, Z}.
    #[error("invalid Pauli label character '{character}' (expected X, Y or Z)")]
    InvalidLabel {
        /// The offending character.
        character: char,
    },
}

/// Errors that can occur when building a Hamiltonian.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PauliError {
    /// A sparse-list entry failed validation.
    #[error("malformed Pauli term: {0}")]
    MalformedTerm(#[from] MalformedTerm),

    /// A dense label string has the wrong length for the register.
    #[error("dense label '{label}' has length {got}, expected {expected}")]
    DenseLabelLength {
        /// The offending label.
        label: String,
        /// Label length.
        got: usize,
        /// Register size.
        expected: usize,
    },
}

/// Result type for term-store operations.
pub type PauliResult<T> = Result<T, PauliError>;
