//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4, PI};

/// A 2×2 complex matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    /// T gate (fourth root of Z).
    T,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// The 2×2 unitary of this gate, for the single-qubit members.
    ///
    /// Returns `None` for [`StandardGate::Swap`].
    pub fn matrix(self) -> Option<Matrix2> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        match self {
            StandardGate::I => Some([[one, zero], [zero, one]]),
            StandardGate::X => Some([[zero, one], [one, zero]]),
            StandardGate::Y => Some([[zero, -i], [i, zero]]),
            StandardGate::Z => Some([[one, zero], [zero, -one]]),
            StandardGate::H => Some([[h, h], [h, -h]]),
            StandardGate::S => Some([[one, zero], [zero, i]]),
            StandardGate::T => Some([[one, zero], [zero, Complex64::from_polar(1.0, FRAC_PI_4)]]),
            StandardGate::Swap => None,
        }
    }
}

/// The axis of a Pauli gate that may be raised to a real exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliAxis {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliAxis {
    /// Get the name of the underlying Pauli gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            PauliAxis::X => "x",
            PauliAxis::Y => "y",
            PauliAxis::Z => "z",
        }
    }

    /// The underlying full-power Pauli gate.
    #[inline]
    pub fn gate(self) -> StandardGate {
        match self {
            PauliAxis::X => StandardGate::X,
            PauliAxis::Y => StandardGate::Y,
            PauliAxis::Z => StandardGate::Z,
        }
    }
}

/// The unitary of a Pauli gate raised to a real exponent.
///
/// A Pauli P has eigenvalues ±1 with projectors (I ± P)/2, so the principal
/// power is `P^t = (I + P)/2 + e^{iπt}·(I − P)/2`. At t = 1 this is P itself,
/// at t = 0 the identity, and at t = 1/2 the principal square root.
pub fn powered_matrix(axis: PauliAxis, exponent: f64) -> Matrix2 {
    let p = axis
        .gate()
        .matrix()
        .unwrap_or_else(|| unreachable!("Pauli gates are single-qubit"));
    let identity = StandardGate::I
        .matrix()
        .unwrap_or_else(|| unreachable!("identity is single-qubit"));
    let phase = Complex64::from_polar(1.0, PI * exponent);
    let half = Complex64::new(0.5, 0.0);

    let mut out = [[Complex64::new(0.0, 0.0); 2]; 2];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, entry) in row.iter_mut().enumerate() {
            let plus = half * (identity[r][c] + p[r][c]);
            let minus = half * (identity[r][c] - p[r][c]);
            *entry = plus + phase * minus;
        }
    }
    out
}
