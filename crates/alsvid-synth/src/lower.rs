//! Lowering of expansion factors to elementary gates.
//!
//! Each factor `exp(-i θ P)` becomes a block of basis changes, a parity
//! ladder and a single Z rotation. For `Z_1 Y_2 X_3` with the chain
//! ladder:
//!
//! ```text
//!               ┌───┐┌────────┐┌───┐
//! q1: ──────────┤ X ├┤ Rz(2θ) ├┤ X ├──────────
//!     ┌────┐┌───┐└─┬─┘└────────┘└─┬─┘┌───┐┌──────┐
//! q2: ┤ √X ├┤ X ├──■──────────────■──┤ X ├┤ √Xdg ├
//!     └────┘└─┬─┘                    └─┬─┘└──────┘
//!      ┌───┐  │                        │  ┌───┐
//! q3: ─┤ H ├──■────────────────────────■──┤ H ├───
//!      └───┘                              └───┘
//! ```
//!
//! Lowering one
//! factor depends only on that factor's data, so factors lower in parallel;
//! the assembler serializes the final ordering.

use alsvid_ir::{Instruction, ParameterExpression, QubitId, StandardGate};
use alsvid_pauli::{Pauli, PauliTerm};

use crate::trotter::ExpansionFactor;

/// Shape of the parity ladder for multi-qubit terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LadderShape {
    /// CX between neighboring support qubits; one chain down, one up.
    #[default]
    Chain,
    /// Every CX targets the designated qubit directly.
    Fountain,
}

/// Per-request lowering configuration, derived from plugin options.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LoweringConfig {
    /// Parity-ladder shape.
    pub ladder: LadderShape,
    /// Use native RXX/RYY/RZZ/RZX gates for two-qubit terms.
    pub native_2q: bool,
}

/// The gate block for one factor, plus its global-phase contribution.
#[derive(Debug, Clone)]
pub(crate) struct LoweredFactor {
    /// Elementary gates, in order. Operands are Hamiltonian-register
    /// indices; the assembler remaps them through the caller's layout.
    pub gates: Vec<Instruction>,
    /// Global-phase contribution (only identity terms produce one).
    pub phase: Option<ParameterExpression>,
}

/// Lower one factor to elementary gates.
pub(crate) fn lower_factor(factor: &ExpansionFactor<'_>, config: &LoweringConfig) -> LoweredFactor {
    let term = factor.term;

    // exp(-i θ I) is the scalar e^{-iθ}: no gates, phase -θ.
    if term.is_identity() {
        return LoweredFactor {
            gates: vec![],
            phase: Some((-factor.angle.clone()).simplify()),
        };
    }

    // Standard rotation-gate parametrization absorbs a factor of two.
    let rotation = factor.angle.scale(2.0);

    let gates = match term.weight() {
        1 => single_qubit(term, rotation),
        2 if config.native_2q => match native_two_qubit(term, rotation.clone()) {
            Some(gates) => gates,
            None => ladder(term, rotation, config.ladder),
        },
        _ => ladder(term, rotation, config.ladder),
    };

    LoweredFactor { gates, phase: None }
}

/// Diagonalizing basis change into the Z eigenbasis for one axis.
///
/// Y uses the square-root-of-X pair: a single primitive each way, one gate
/// cheaper than the Hadamard-plus-phase composition.
fn diagonalize(pauli: Pauli) -> Option<(StandardGate, StandardGate)> {
    match pauli {
        Pauli::X => Some((StandardGate::H, StandardGate::H)),
        Pauli::Y => Some((StandardGate::SX, StandardGate::SXdg)),
        Pauli::Z => None,
    }
}

/// Single-qubit factor: conjugate a Z rotation into the term's eigenbasis.
fn single_qubit(term: &PauliTerm, rotation: ParameterExpression) -> Vec<Instruction> {
    let qubit = QubitId(term.indices()[0]);
    let rz = Instruction::single_qubit_gate(StandardGate::Rz(rotation), qubit);
    match diagonalize(term.paulis()[0]) {
        None => vec![rz],
        Some((enter, leave)) => vec![
            Instruction::single_qubit_gate(enter, qubit),
            rz,
            Instruction::single_qubit_gate(leave, qubit),
        ],
    }
}

/// Native two-qubit rotation, when the axis pair has one.
fn native_two_qubit(term: &PauliTerm, rotation: ParameterExpression) -> Option<Vec<Instruction>> {
    let (q0, q1) = (QubitId(term.indices()[0]), QubitId(term.indices()[1]));
    let gate = match (term.paulis()[0], term.paulis()[1]) {
        (Pauli::X, Pauli::X) => Instruction::two_qubit_gate(StandardGate::RXX(rotation), q0, q1),
        (Pauli::Y, Pauli::Y) => Instruction::two_qubit_gate(StandardGate::RYY(rotation), q0, q1),
        (Pauli::Z, Pauli::Z) => Instruction::two_qubit_gate(StandardGate::RZZ(rotation), q0, q1),
        (Pauli::Z, Pauli::X) => Instruction::two_qubit_gate(StandardGate::RZX(rotation), q0, q1),
        // RZX puts Z on its first operand, so XZ swaps the operand order.
        (Pauli::X, Pauli::Z) => Instruction::two_qubit_gate(StandardGate::RZX(rotation), q1, q0),
        _ => return None,
    };
    Some(vec![gate])
}

/// General multi-qubit factor: basis changes, parity ladder onto the
/// lowest-index support qubit, Rz there, then uncompute.
fn ladder(term: &PauliTerm, rotation: ParameterExpression, shape: LadderShape) -> Vec<Instruction> {
    let qubits: Vec<QubitId> = term.indices().iter().map(|&i| QubitId(i)).collect();
    let designated = qubits[0];

    let enter: Vec<Instruction> = term
        .support()
        .filter_map(|(index, pauli)| {
            diagonalize(pauli)
                .map(|(gate, _)| Instruction::single_qubit_gate(gate, QubitId(index)))
        })
        .collect();

    // Basis changes undo in reverse order.
    let mut leave: Vec<Instruction> = term
        .support()
        .filter_map(|(index, pauli)| {
            diagonalize(pauli)
                .map(|(_, gate)| Instruction::single_qubit_gate(gate, QubitId(index)))
        })
        .collect();
    leave.reverse();

    let compute: Vec<Instruction> = match shape {
        LadderShape::Chain => (0..qubits.len() - 1)
            .rev()
            .map(|i| Instruction::two_qubit_gate(StandardGate::CX, qubits[i + 1], qubits[i]))
            .collect(),
        LadderShape::Fountain => (1..qubits.len())
            .map(|i| Instruction::two_qubit_gate(StandardGate::CX, qubits[i], designated))
            .collect(),
    };
    let uncompute: Vec<Instruction> = compute.iter().rev().cloned().collect();

    let mut gates =
        Vec::with_capacity(enter.len() + leave.len() + compute.len() + uncompute.len() + 1);
    gates.extend(enter);
    gates.extend(compute);
    gates.push(Instruction::single_qubit_gate(
        StandardGate::Rz(rotation),
        designated,
    ));
    gates.extend(uncompute);
    gates.extend(leave);
    gates
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn factor(label: &str, indices: &[u32], angle: f64) -> (PauliTerm, ParameterExpression) {
        let term =
            PauliTerm::from_label(label, indices.iter().copied(), Complex64::new(1.0, 0.0))
                .unwrap();
        (term, ParameterExpression::constant(angle))
    }

    fn lower(
        term: &PauliTerm,
        angle: &ParameterExpression,
        config: &LoweringConfig,
    ) -> LoweredFactor {
        lower_factor(
            &ExpansionFactor {
                term,
                angle: angle.clone(),
            },
            config,
        )
    }

    fn names(lowered: &LoweredFactor) -> Vec<String> {
        lowered.gates.iter().map(|g| format!("{g}")).collect()
    }

    #[test]
    fn test_identity_term_phase_only() {
        let term = PauliTerm::identity(Complex64::new(1.0, 0.0));
        let angle = ParameterExpression::constant(0.75);
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        assert!(lowered.gates.is_empty());
        assert_eq!(lowered.phase.unwrap().as_f64(), Some(-0.75));
    }

    #[test]
    fn test_single_z_is_bare_rotation() {
        let (term, angle) = factor("Z", &[2], 0.5);
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        assert_eq!(names(&lowered), vec!["rz(1) q2"]);
        assert!(lowered.phase.is_none());
    }

    #[test]
    fn test_single_x_conjugation_triple() {
        let (term, angle) = factor("X", &[3], 1.0);
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        assert_eq!(names(&lowered), vec!["h q3", "rz(2) q3", "h q3"]);
    }

    #[test]
    fn test_single_y_uses_sqrt_x_pair() {
        let (term, angle) = factor("Y", &[0], 1.0);
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        assert_eq!(names(&lowered), vec!["sx q0", "rz(2) q0", "sxdg q0"]);
    }

    #[test]
    fn test_zz_ladder() {
        let (term, angle) = factor("ZZ", &[1, 2], 2.0);
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        assert_eq!(
            names(&lowered),
            vec!["cx q2, q1", "rz(4) q1", "cx q2, q1"]
        );
    }

    #[test]
    fn test_mixed_term_basis_changes() {
        let (term, angle) = factor("YZX", &[0, 1, 3], 0.5);
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        assert_eq!(
            names(&lowered),
            vec![
                "sx q0",
                "h q3",
                "cx q3, q1",
                "cx q1, q0",
                "rz(1) q0",
                "cx q1, q0",
                "cx q3, q1",
                "h q3",
                "sxdg q0",
            ]
        );
    }

    #[test]
    fn test_fountain_ladder() {
        let (term, angle) = factor("ZZZ", &[0, 2, 5], 1.0);
        let config = LoweringConfig {
            ladder: LadderShape::Fountain,
            native_2q: false,
        };
        let lowered = lower(&term, &angle, &config);
        assert_eq!(
            names(&lowered),
            vec![
                "cx q2, q0",
                "cx q5, q0",
                "rz(2) q0",
                "cx q5, q0",
                "cx q2, q0",
            ]
        );
    }

    #[test]
    fn test_native_two_qubit_rotations() {
        let config = LoweringConfig {
            ladder: LadderShape::Chain,
            native_2q: true,
        };
        let cases = [
            ("XX", "rxx(2) q0, q1"),
            ("YY", "ryy(2) q0, q1"),
            ("ZZ", "rzz(2) q0, q1"),
            ("ZX", "rzx(2) q0, q1"),
        ];
        for (label, expected) in cases {
            let (term, angle) = factor(label, &[0, 1], 1.0);
            let lowered = lower(&term, &angle, &config);
            assert_eq!(names(&lowered), vec![expected.to_string()], "label {label}");
        }

        // XZ maps onto RZX with swapped operands.
        let (term, angle) = factor("XZ", &[0, 1], 1.0);
        let lowered = lower(&term, &angle, &config);
        assert_eq!(names(&lowered), vec!["rzx(2) q1, q0"]);

        // Mixed axes without a native gate fall back to the ladder.
        let (term, angle) = factor("XY", &[0, 1], 1.0);
        let lowered = lower(&term, &angle, &config);
        assert_eq!(lowered.gates.len(), 7);
    }

    #[test]
    fn test_ladder_gate_count_linear_in_weight() {
        for weight in 2..6 {
            let indices: Vec<u32> = (0..weight).collect();
            let label: String = "Z".repeat(weight as usize);
            let (term, angle) = factor(&label, &indices, 1.0);
            let lowered = lower(&term, &angle, &LoweringConfig::default());
            // 2 (weight - 1) CX plus one rotation.
            assert_eq!(lowered.gates.len(), 2 * (weight as usize - 1) + 1);
        }
    }

    #[test]
    fn test_symbolic_angle() {
        let term = PauliTerm::from_label("Z", [0], Complex64::new(1.0, 0.0)).unwrap();
        let angle = ParameterExpression::symbol("t");
        let lowered = lower(&term, &angle, &LoweringConfig::default());
        let StandardGate::Rz(param) = lowered.gates[0].as_gate().unwrap().clone() else {
            panic!("expected rz");
        };
        assert!(param.is_symbolic());
        assert_eq!(param.bind("t", 0.5).simplify().as_f64(), Some(1.0));
    }
}
