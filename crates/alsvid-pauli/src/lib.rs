//! Sparse Pauli Term Store
//!
//! A Hamiltonian for evolution synthesis is a weighted sum of Pauli terms
//! over a fixed qubit register. This crate stores those terms sparsely
//! (only the qubits a term touches), normalizes duplicate supports at
//! construction, and converts losslessly between the sparse-list
//! interchange format and dense labels.
//!
//! # Example
//!
//! ```rust
//! use alsvid_pauli::SparseHamiltonian;
//! use num_complex::Complex64;
//!
//! // H = X_3 + 2 Z_1 Z_2 over four qubits.
//! let ham = SparseHamiltonian::from_sparse_list(
//!     [
//!         ("X".to_string(), vec![3], Complex64::new(1.0, 0.0)),
//!         ("ZZ".to_string(), vec![1, 2], Complex64::new(2.0, 0.0)),
//!     ],
//!     4,
//! )
//! .unwrap();
//!
//! assert_eq!(ham.to_dense_labels(), vec!["IIIX", "IZZI"]);
//! ```

pub mod error;
pub mod hamiltonian;
pub mod pauli;
pub mod term;

pub use error::{MalformedTerm, PauliError, PauliResult};
pub use hamiltonian::{SparseEntry, SparseHamiltonian};
pub use pauli::Pauli;
pub use term::PauliTerm;
