//! Flat ordered gate streams.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// An ordered sequence of instructions over a fixed qubit register, plus an
/// accumulated global phase.
///
/// This is the output format of evolution synthesis: a strictly ordered
/// stream (product-formula correctness depends on exact composition order)
/// with the global phase tracked separately so callers can honor or discard
/// it. There is deliberately no graph structure here; downstream compilers
/// own scheduling and optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateStream {
    num_qubits: u32,
    instructions: Vec<Instruction>,
    global_phase: ParameterExpression,
}

impl GateStream {
    /// Create an empty stream over `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            instructions: Vec::new(),
            global_phase: ParameterExpression::zero(),
        }
    }

    /// Append an instruction, validating its operands.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<()> {
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }
        for (i, qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: *qubit,
                    num_qubits: self.num_qubits,
                    gate_name: instruction.name().to_string(),
                });
            }
            if instruction.qubits[..i].contains(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit: *qubit,
                    gate_name: instruction.name().to_string(),
                });
            }
        }
        self.instructions.push(instruction);
        Ok(())
    }

    /// Append a block of instructions in order.
    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) -> IrResult<()> {
        for inst in instructions {
            self.push(inst)?;
        }
        Ok(())
    }

    /// Add a contribution to the global phase.
    pub fn add_global_phase(&mut self, phase: ParameterExpression) {
        self.global_phase = (self.global_phase.clone() + phase).simplify();
    }

    /// The accumulated global phase.
    pub fn global_phase(&self) -> &ParameterExpression {
        &self.global_phase
    }

    /// The global phase as a concrete value, when no symbols remain.
    pub fn global_phase_value(&self) -> Option<f64> {
        self.global_phase.as_f64()
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of instructions (gates and barriers).
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Number of gate instructions, excluding barriers.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Check whether the stream holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// Per-gate-name instruction counts.
    pub fn gate_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in self.instructions.iter().filter(|i| i.is_gate()) {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth: longest chain of gates sharing qubits.
    ///
    /// Barriers synchronize all qubits they touch but do not count as a
    /// layer themselves.
    pub fn depth(&self) -> usize {
        let mut front: FxHashMap<QubitId, usize> = FxHashMap::default();
        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| front.get(q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            let next = if inst.is_gate() { level + 1 } else { level };
            for q in &inst.qubits {
                front.insert(*q, next);
            }
        }
        front.into_values().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    #[test]
    fn test_push_and_count() {
        let mut stream = GateStream::new(2);
        stream
            .push(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        stream
            .push(Instruction::two_qubit_gate(
                StandardGate::CX,
                QubitId(0),
                QubitId(1),
            ))
            .unwrap();
        assert_eq!(stream.num_ops(), 2);
        assert_eq!(stream.depth(), 2);
        assert_eq!(stream.gate_counts().get("cx"), Some(&1));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut stream = GateStream::new(1);
        let err = stream
            .push(Instruction::single_qubit_gate(StandardGate::H, QubitId(3)))
            .unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { .. }));
        assert!(stream.is_empty());
    }

    #[test]
    fn test_duplicate_operand_rejected() {
        let mut stream = GateStream::new(2);
        let err = stream
            .push(Instruction::two_qubit_gate(
                StandardGate::CX,
                QubitId(1),
                QubitId(1),
            ))
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let mut stream = GateStream::new(2);
        let err = stream
            .push(Instruction::gate(StandardGate::CX, [QubitId(0)]))
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_global_phase_accumulates() {
        let mut stream = GateStream::new(1);
        stream.add_global_phase(ParameterExpression::constant(-0.5));
        stream.add_global_phase(ParameterExpression::constant(-0.25));
        assert_eq!(stream.global_phase_value(), Some(-0.75));
    }

    #[test]
    fn test_symbolic_global_phase() {
        let mut stream = GateStream::new(1);
        stream.add_global_phase(-ParameterExpression::symbol("t"));
        assert_eq!(stream.global_phase_value(), None);
        assert!(stream.global_phase().is_symbolic());
    }

    #[test]
    fn test_depth_parallel_gates() {
        let mut stream = GateStream::new(2);
        stream
            .push(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        stream
            .push(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        // Disjoint qubits occupy the same layer.
        assert_eq!(stream.depth(), 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut stream = GateStream::new(2);
        stream
            .push(Instruction::single_qubit_gate(
                StandardGate::Rz(ParameterExpression::constant(1.5)),
                QubitId(1),
            ))
            .unwrap();
        let json = serde_json::to_string(&stream).unwrap();
        let back: GateStream = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stream);
    }
}
