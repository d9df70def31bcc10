//! Symbolic single-qubit basis states.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// A symbolic single-qubit initial state.
///
/// Each variant maps bijectively to a one-character internal code, matching
/// the lettering convention of common statevector initializers
/// (`r` = |+i⟩, `l` = |-i⟩).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ket {
    /// |0⟩
    Zero,
    /// |1⟩
    One,
    /// |+⟩ = (|0⟩ + |1⟩)/√2
    Plus,
    /// |-⟩ = (|0⟩ - |1⟩)/√2
    Minus,
    /// |+i⟩ = (|0⟩ + i|1⟩)/√2
    PlusI,
    /// |-i⟩ = (|0⟩ - i|1⟩)/√2
    MinusI,
}

impl Ket {
    /// One-character internal code for this state.
    #[inline]
    pub fn code(self) -> char {
        match self {
            Ket::Zero => '0',
            Ket::One => '1',
            Ket::Plus => '+',
            Ket::Minus => '-',
            Ket::PlusI => 'r',
            Ket::MinusI => 'l',
        }
    }

    /// Decode the one-character internal code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Ket::Zero),
            '1' => Some(Ket::One),
            '+' => Some(Ket::Plus),
            '-' => Some(Ket::Minus),
            'r' => Some(Ket::PlusI),
            'l' => Some(Ket::MinusI),
            _ => None,
        }
    }

    /// Parse a user-facing state label.
    ///
    /// Accepts the composer's bra-ket forms (`|0>`, `|+i〉`), the bare body
    /// (`0`, `+i`, `-j`) and the internal codes (`r`, `l`).
    pub fn parse(label: &str) -> Option<Self> {
        let body = label
            .trim()
            .trim_start_matches('|')
            .trim_end_matches(['>', '⟩', '〉']);
        match body {
            "0" => Some(Ket::Zero),
            "1" => Some(Ket::One),
            "+" => Some(Ket::Plus),
            "-" => Some(Ket::Minus),
            "+i" | "+j" | "r" => Some(Ket::PlusI),
            "-i" | "-j" | "l" => Some(Ket::MinusI),
            _ => None,
        }
    }

    /// The two-component amplitude vector (|0⟩ amplitude first).
    pub fn amplitudes(self) -> [Complex64; 2] {
        let h = FRAC_1_SQRT_2;
        match self {
            Ket::Zero => [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            Ket::One => [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            Ket::Plus => [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
            Ket::Minus => [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)],
            Ket::PlusI => [Complex64::new(h, 0.0), Complex64::new(0.0, h)],
            Ket::MinusI => [Complex64::new(h, 0.0), Complex64::new(0.0, -h)],
        }
    }
}

impl Default for Ket {
    fn default() -> Self {
        Ket::Zero
    }
}

impl fmt::Display for Ket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self {
            Ket::Zero => "0",
            Ket::One => "1",
            Ket::Plus => "+",
            Ket::Minus => "-",
            Ket::PlusI => "+i",
            Ket::MinusI => "-i",
        };
        write!(f, "|{body}⟩")
    }
}
