//! Standard gates emitted by the synthesis pipeline.

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;

/// The gate alphabet of the evolution synthesizer.
///
/// Intentionally smaller than a full transpiler gate set: it holds exactly
/// the gates the lowering stage emits (diagonalizing Cliffords, rotations,
/// parity-ladder CX/CZ and the native two-qubit rotations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// XX rotation gate, `exp(-i θ/2 X⊗X)`.
    RXX(ParameterExpression),
    /// YY rotation gate, `exp(-i θ/2 Y⊗Y)`.
    RYY(ParameterExpression),
    /// ZZ rotation gate, `exp(-i θ/2 Z⊗Z)`.
    RZZ(ParameterExpression),
    /// ZX rotation gate, `exp(-i θ/2 Z⊗X)` (Z on the first operand).
    RZX(ParameterExpression),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::RZX(_) => "rzx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_)
            | StandardGate::RZX(_) => 2,
        }
    }

    /// Check if this gate carries an unbound symbolic parameter.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p)
            | StandardGate::RZX(p) => vec![p],

            _ => vec![],
        }
    }

    /// The inverse gate, when it is itself a member of this alphabet.
    ///
    /// The uncompute halves of the lowering (inverse parity ladder, inverse
    /// basis changes) and the cancellation peephole both key off this.
    /// Parameterized rotations invert by negating the angle.
    pub fn inverse(&self) -> StandardGate {
        match self {
            StandardGate::I => StandardGate::I,
            StandardGate::X => StandardGate::X,
            StandardGate::Y => StandardGate::Y,
            StandardGate::Z => StandardGate::Z,
            StandardGate::H => StandardGate::H,
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::Rx(p) => StandardGate::Rx(-p.clone()),
            StandardGate::Ry(p) => StandardGate::Ry(-p.clone()),
            StandardGate::Rz(p) => StandardGate::Rz(-p.clone()),
            StandardGate::P(p) => StandardGate::P(-p.clone()),
            StandardGate::CX => StandardGate::CX,
            StandardGate::CZ => StandardGate::CZ,
            StandardGate::RXX(p) => StandardGate::RXX(-p.clone()),
            StandardGate::RYY(p) => StandardGate::RYY(-p.clone()),
            StandardGate::RZZ(p) => StandardGate::RZZ(-p.clone()),
            StandardGate::RZX(p) => StandardGate::RZX(-p.clone()),
        }
    }

    /// Check whether applying this gate twice on the same operands is the
    /// identity (up to global phase).
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::H
                | StandardGate::CX
                | StandardGate::CZ
        )
    }
}
