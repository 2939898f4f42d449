//! Alsvid Gate-Instruction Intermediate Representation
//!
//! Core data structures shared by the Hamiltonian-evolution synthesis
//! pipeline: qubit addressing, the standard gate alphabet, symbolic
//! parameters, and the flat ordered [`GateStream`] that synthesis produces.
//!
//! # Overview
//!
//! Unlike a full circuit IR there is no DAG here: evolution synthesis emits
//! a strictly ordered instruction sequence whose composition order *is* the
//! approximation, so the stream representation is a plain vector with
//! operand validation and a global-phase accumulator. Scheduling,
//! optimization and drawing belong to downstream consumers.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{GateStream, Instruction, ParameterExpression, QubitId, StandardGate};
//!
//! let mut stream = GateStream::new(2);
//! stream.push(Instruction::single_qubit_gate(StandardGate::H, QubitId(0))).unwrap();
//! stream.push(Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1))).unwrap();
//! stream.push(Instruction::single_qubit_gate(
//!     StandardGate::Rz(ParameterExpression::symbol("t")),
//!     QubitId(1),
//! )).unwrap();
//!
//! assert_eq!(stream.num_ops(), 3);
//! assert_eq!(stream.depth(), 3);
//! ```

pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;
pub mod stream;

pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::QubitId;
pub use stream::GateStream;
