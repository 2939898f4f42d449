//! Assembly of lowered gate blocks into one stream.

use alsvid_ir::{GateStream, Instruction, QubitId};
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};
use crate::lower::LoweredFactor;

/// An injective mapping from Hamiltonian-register qubit indices to target
/// qubits, supplied by the caller alongside the Hamiltonian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    targets: Vec<QubitId>,
    num_target_qubits: u32,
}

impl Layout {
    /// Create a layout from an explicit target list.
    ///
    /// `targets[i]` is the target qubit for Hamiltonian index `i`. The
    /// mapping must be injective and stay inside the target register.
    pub fn new(targets: Vec<QubitId>, num_target_qubits: u32) -> SynthResult<Self> {
        for (i, qubit) in targets.iter().enumerate() {
            if qubit.0 >= num_target_qubits {
                return Err(SynthError::LayoutTargetOutOfRange {
                    qubit: *qubit,
                    num_qubits: num_target_qubits,
                });
            }
            if targets[..i].contains(qubit) {
                return Err(SynthError::DuplicateLayoutQubit { qubit: *qubit });
            }
        }
        Ok(Self {
            targets,
            num_target_qubits,
        })
    }

    /// The identity layout over an `n`-qubit register.
    pub fn identity(num_qubits: u32) -> Self {
        Self {
            targets: (0..num_qubits).map(QubitId).collect(),
            num_target_qubits: num_qubits,
        }
    }

    /// Number of Hamiltonian-register qubits this layout maps.
    pub fn num_source_qubits(&self) -> u32 {
        self.targets.len() as u32
    }

    /// Size of the target register.
    pub fn num_target_qubits(&self) -> u32 {
        self.num_target_qubits
    }

    /// Map a Hamiltonian-register index to its target qubit.
    ///
    /// Out-of-range sources map to themselves; the assembler's stream
    /// validation rejects them downstream.
    pub fn target(&self, source: QubitId) -> QubitId {
        self.targets
            .get(source.0 as usize)
            .copied()
            .unwrap_or(source)
    }

    /// All target qubits, in Hamiltonian-register order.
    pub fn targets(&self) -> &[QubitId] {
        &self.targets
    }
}

/// Builds the final gate stream from lowered factor blocks.
///
/// The assembler owns the output exclusively: blocks arrive in factor
/// order (the caller is responsible for that order, even when lowering ran
/// in parallel), operands are remapped through the layout, and global
/// phase accumulates as a running scalar exposed on the stream rather than
/// folded into gates.
#[derive(Debug)]
pub struct Assembler {
    stream: GateStream,
    layout: Layout,
    track_phase: bool,
}

impl Assembler {
    /// Create an assembler emitting into the layout's target register.
    pub fn new(layout: Layout, track_phase: bool) -> Self {
        Self {
            stream: GateStream::new(layout.num_target_qubits()),
            layout,
            track_phase,
        }
    }

    /// Append one lowered factor block.
    pub(crate) fn push_block(&mut self, block: LoweredFactor) -> SynthResult<()> {
        for instruction in block.gates {
            self.push(instruction)?;
        }
        if self.track_phase {
            if let Some(phase) = block.phase {
                self.stream.add_global_phase(phase);
            }
        }
        Ok(())
    }

    /// Append a single instruction, remapping its operands.
    pub fn push(&mut self, instruction: Instruction) -> SynthResult<()> {
        let remapped = instruction.remap_qubits(|q| self.layout.target(q));
        self.stream.push(remapped)?;
        Ok(())
    }

    /// Append a barrier across every mapped target qubit.
    pub fn push_barrier(&mut self) -> SynthResult<()> {
        let qubits: Vec<QubitId> = self.layout.targets().to_vec();
        self.stream.push(Instruction::barrier(qubits))?;
        Ok(())
    }

    /// Finish assembly and hand over the stream.
    pub fn finish(self) -> GateStream {
        self.stream
    }
}
