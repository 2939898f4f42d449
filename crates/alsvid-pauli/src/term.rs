//! Weighted sparse Pauli terms.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MalformedTerm;
use crate::pauli::Pauli;

/// A tensor product of single-qubit Paulis with a scalar coefficient,
/// stored sparsely.
///
/// Invariants, established at construction and relied on downstream:
/// qubit indices are unique and ascending, and `indices` and `paulis` have
/// equal length. Omitted qubits are implicitly identity. A term with empty
/// support is proportional to the identity and contributes only global
/// phase under evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    indices: Vec<u32>,
    paulis: Vec<Pauli>,
    coefficient: Complex64,
}

impl PauliTerm {
    /// Create a term from parallel axis/index lists.
    ///
    /// Pairs are sorted by qubit index; duplicate indices are rejected.
    pub fn new(
        paulis: impl IntoIterator<Item = Pauli>,
        indices: impl IntoIterator<Item = u32>,
        coefficient: Complex64,
    ) -> Result<Self, MalformedTerm> {
        let mut pairs: Vec<(u32, Pauli)> = indices.into_iter().zip(paulis).collect();
        pairs.sort_by_key(|(index, _)| *index);
        for window in pairs.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(MalformedTerm::DuplicateIndex { index: window[0].0 });
            }
        }
        let (indices, paulis) = pairs.into_iter().unzip();
        Ok(Self {
            indices,
            paulis,
            coefficient,
        })
    }

    /// Create a term from a label string (e.g. `"XZ"`) and matching indices.
    pub fn from_label(
        label: &str,
        indices: impl IntoIterator<Item = u32>,
        coefficient: Complex64,
    ) -> Result<Self, MalformedTerm> {
        let indices: Vec<u32> = indices.into_iter().collect();
        let label_len = label.chars().count();
        if label_len != indices.len() {
            return Err(MalformedTerm::LabelIndexMismatch {
                label: label.to_string(),
                label_len,
                index_len: indices.len(),
            });
        }
        let paulis = label
            .chars()
            .map(|c| Pauli::from_char(c).ok_or(MalformedTerm::InvalidLabel { character: c }))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(paulis, indices, coefficient)
    }

    /// An identity (empty-support) term.
    pub fn identity(coefficient: Complex64) -> Self {
        Self {
            indices: vec![],
            paulis: vec![],
            coefficient,
        }
    }

    /// Qubit indices, ascending.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Pauli axes, parallel to [`PauliTerm::indices`].
    pub fn paulis(&self) -> &[Pauli] {
        &self.paulis
    }

    /// The scalar coefficient.
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// Replace the coefficient, keeping the support.
    #[must_use]
    pub fn with_coefficient(&self, coefficient: Complex64) -> Self {
        Self {
            indices: self.indices.clone(),
            paulis: self.paulis.clone(),
            coefficient,
        }
    }

    /// Number of qubits the term acts on non-trivially.
    pub fn weight(&self) -> usize {
        self.indices.len()
    }

    /// Check whether this term is proportional to the identity.
    pub fn is_identity(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, axis)` pairs in ascending index order.
    pub fn support(&self) -> impl Iterator<Item = (u32, Pauli)> + '_ {
        self.indices.iter().copied().zip(self.paulis.iter().copied())
    }

    /// The canonical sparse label, e.g. `"XZ"` for X on the lowest index.
    pub fn label(&self) -> String {
        self.paulis.iter().map(|p| p.as_char()).collect()
    }

    /// The dense label over a `num_qubits` register, identity positions
    /// filled with `I`.
    ///
    /// Assumes all indices are `< num_qubits`, which
    /// `SparseHamiltonian` guarantees.
    pub fn dense_label(&self, num_qubits: u32) -> String {
        let mut label: Vec<char> = vec!['I'; num_qubits as usize];
        for (index, pauli) in self.support() {
            label[index as usize] = pauli.as_char();
        }
        label.into_iter().collect()
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * [", self.coefficient)?;
        for (i, (index, pauli)) in self.support().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{pauli}{index}")?;
        }
        write!(f, "]")
    }
}
