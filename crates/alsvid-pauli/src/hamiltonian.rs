//! The sparse Hamiltonian term store.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{MalformedTerm, PauliError, PauliResult};
use crate::pauli::Pauli;
use crate::term::PauliTerm;

/// One entry of the sparse-list interchange format:
/// `(label over {X,Y,Z}, ascending qubit indices, coefficient)`.
pub type SparseEntry = (String, Vec<u32>, Complex64);

/// A Hamiltonian as an insertion-ordered sum of weighted Pauli terms over a
/// fixed qubit register.
///
/// Terms with identical support (same indices, same axes) are merged at
/// construction by summing coefficients, so downstream consumers always see
/// a minimal representation. The store is immutable once built; the
/// synthesis pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseHamiltonian {
    terms: Vec<PauliTerm>,
    num_qubits: u32,
}

impl SparseHamiltonian {
    /// Build a Hamiltonian from validated terms.
    ///
    /// Fails if any term index reaches past the register. Duplicate-support
    /// terms are merged, keeping first-occurrence order.
    pub fn new(terms: impl IntoIterator<Item = PauliTerm>, num_qubits: u32) -> PauliResult<Self> {
        let mut merged: Vec<PauliTerm> = Vec::new();
        let mut by_support: FxHashMap<(Vec<u32>, Vec<Pauli>), usize> = FxHashMap::default();

        for term in terms {
            if let Some(&index) = term.indices().iter().find(|&&i| i >= num_qubits) {
                return Err(MalformedTerm::IndexOutOfRange { index, num_qubits }.into());
            }
            let key = (term.indices().to_vec(), term.paulis().to_vec());
            match by_support.get(&key) {
                Some(&slot) => {
                    let combined = merged[slot].coefficient() + term.coefficient();
                    merged[slot] = merged[slot].with_coefficient(combined);
                }
                None => {
                    by_support.insert(key, merged.len());
                    merged.push(term);
                }
            }
        }

        Ok(Self {
            terms: merged,
            num_qubits,
        })
    }

    /// Build from the sparse-list interchange format.
    pub fn from_sparse_list(
        entries: impl IntoIterator<Item = SparseEntry>,
        num_qubits: u32,
    ) -> PauliResult<Self> {
        let terms = entries
            .into_iter()
            .map(|(label, indices, coefficient)| {
                PauliTerm::from_label(&label, indices, coefficient)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(terms, num_qubits)
    }

    /// Build from dense labels over `{I, X, Y, Z}`, one per term.
    ///
    /// The sparse support of each term is exactly the set of non-`I`
    /// positions; the register size is the label length.
    pub fn from_dense_labels(
        labels: impl IntoIterator<Item = (String, Complex64)>,
        num_qubits: u32,
    ) -> PauliResult<Self> {
        let mut terms = Vec::new();
        for (label, coefficient) in labels {
            let len = label.chars().count();
            if len != num_qubits as usize {
                return Err(PauliError::DenseLabelLength {
                    label,
                    got: len,
                    expected: num_qubits as usize,
                });
            }
            let mut indices = Vec::new();
            let mut paulis = Vec::new();
            for (position, character) in label.chars().enumerate() {
                if character == 'I' || character == 'i' {
                    continue;
                }
                let pauli = Pauli::from_char(character)
                    .ok_or(MalformedTerm::InvalidLabel { character })?;
                indices.push(position as u32);
                paulis.push(pauli);
            }
            terms.push(PauliTerm::new(paulis, indices, coefficient)?);
        }
        Self::new(terms, num_qubits)
    }

    /// Emit the sparse-list interchange format, construction order
    /// preserved, ascending indices, identities omitted.
    ///
    /// Exact inverse of [`SparseHamiltonian::from_sparse_list`] for any
    /// store built without duplicate supports.
    pub fn to_sparse_list(&self) -> Vec<SparseEntry> {
        self.terms
            .iter()
            .map(|term| (term.label(), term.indices().to_vec(), term.coefficient()))
            .collect()
    }

    /// Emit one fixed-length dense label per term, `I` at identity
    /// positions.
    pub fn to_dense_labels(&self) -> Vec<String> {
        self.terms
            .iter()
            .map(|term| term.dense_label(self.num_qubits))
            .collect()
    }

    /// The terms, in insertion order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Size of the qubit register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of (merged) terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the Hamiltonian has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PauliTerm> {
        self.terms.iter()
    }
}
