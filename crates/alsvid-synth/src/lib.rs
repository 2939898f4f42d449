//! Hamiltonian-Evolution Circuit Synthesis
//!
//! Turns a Hamiltonian given as a weighted sum of sparse Pauli terms into
//! an ordered elementary-gate sequence approximating `exp(-i t H)`.
//!
//! # Pipeline
//!
//! ```text
//! SparseHamiltonian
//!       │
//!       ▼
//! ┌────────────────┐
//! │ PluginRegistry │ ◄── EvolutionRequest (time, order, steps, options)
//! └────────────────┘
//!       │
//!       ├── product-formula: Trotter/Suzuki expansion → per-term lowering
//!       └── commuting-groups: global regrouping + gate cancellation
//!       │
//!       ▼
//! Assembler ── GateStream (+ global phase)
//! ```
//!
//! The default `product-formula` plugin expands the evolution into ordered
//! `exp(-i θ P)` factors (Lie–Trotter for order 1, recursive symmetric
//! Suzuki for even orders) and lowers each factor to basis changes, a CX
//! parity ladder and one Z rotation. The alternative `commuting-groups`
//! plugin consumes the whole term list at once, regroups commuting terms
//! and cancels gates across term boundaries, at the cost of exact global
//! phase.
//!
//! # Example
//!
//! ```rust
//! use alsvid_pauli::SparseHamiltonian;
//! use alsvid_synth::{EvolutionRequest, Layout, synthesize};
//! use num_complex::Complex64;
//!
//! // H = X_3 + 2 Z_1 Z_2 over four qubits, evolved for t = 1.
//! let ham = SparseHamiltonian::from_sparse_list(
//!     [
//!         ("X".to_string(), vec![3], Complex64::new(1.0, 0.0)),
//!         ("ZZ".to_string(), vec![1, 2], Complex64::new(2.0, 0.0)),
//!     ],
//!     4,
//! )
//! .unwrap();
//!
//! let request = EvolutionRequest::new(1.0);
//! let stream = synthesize(&ham, &request, &Layout::identity(4)).unwrap();
//! assert_eq!(stream.num_gates(), 6);
//! ```

pub mod assemble;
pub mod error;
pub mod grouped;
pub mod plugin;
pub mod product_formula;
pub mod request;

mod lower;
mod trotter;

pub use assemble::{Assembler, Layout};
pub use error::{SynthError, SynthResult};
pub use grouped::CommutingGroups;
pub use plugin::{PluginRegistry, SynthesisPlugin, default_registry, synthesize};
pub use product_formula::ProductFormula;
pub use request::{DEFAULT_PLUGIN, EvolutionRequest, OptionValue, SynthOptions, options};
