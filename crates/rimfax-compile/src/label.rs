//! Gate label codec.
//!
//! Composer cells travel the wire as string stamps. A stamp is either bare
//! (`"x"`, `"swap"`) or parameterized, with the parameter glued on after a
//! fixed delimiter (`"control<!@DELIMITER>1"`). Two stamp vocabularies are in
//! circulation: the current short names and the legacy `*Gate` names; the
//! decoder accepts both, the encoder always emits the current form.

use rimfax_ir::{PauliAxis, StandardGate};

use crate::error::{CompileError, CompileResult};

/// Separator between a stamp's head and its parameter.
///
/// Splitting is on the first occurrence only, so parameter text may itself
/// contain the delimiter characters.
pub const DELIMITER: &str = "<!@DELIMITER>";

/// A decoded composer cell.
#[derive(Debug, Clone, PartialEq)]
pub enum GateLabel {
    /// A fixed single-qubit gate (X, Y, Z, H, S, T).
    Plain(StandardGate),
    /// Identity: the cell is occupied but does nothing.
    Identity,
    /// One endpoint of a swap pair.
    Swap,
    /// A control cell: `true` for a plain control, `false` for an anticontrol.
    Control {
        /// Required basis bit of the control qubit.
        bit: bool,
    },
    /// A measurement cell, optionally postselecting on a basis bit.
    Measurement {
        /// `Some(bit)` keeps only outcomes where the qubit read `bit`;
        /// `None` measures without filtering.
        postselect: Option<bool>,
    },
    /// A Pauli gate raised to an exponent, carried as unevaluated text.
    Powered {
        /// The Pauli axis.
        axis: PauliAxis,
        /// Exponent expression, evaluated at step-compile time.
        exponent: String,
    },
    /// A reference to a registered custom gate (`cg1`, `cg2`, …).
    CustomRef(String),
}

impl GateLabel {
    /// Decode a wire stamp.
    ///
    /// Unknown heads are a hard error; a known head with a missing or
    /// unparseable parameter is reported separately as malformed.
    pub fn decode(stamp: &str) -> CompileResult<Self> {
        let (head, param) = match stamp.find(DELIMITER) {
            Some(at) => (&stamp[..at], Some(&stamp[at + DELIMITER.len()..])),
            None => (stamp, None),
        };
        match head {
            "x" | "xGate" => Ok(GateLabel::Plain(StandardGate::X)),
            "y" | "yGate" => Ok(GateLabel::Plain(StandardGate::Y)),
            "z" | "zGate" => Ok(GateLabel::Plain(StandardGate::Z)),
            "h" | "hGate" => Ok(GateLabel::Plain(StandardGate::H)),
            "s" | "sGate" => Ok(GateLabel::Plain(StandardGate::S)),
            "t" | "tGate" => Ok(GateLabel::Plain(StandardGate::T)),
            "inertia" | "identityGate" => Ok(GateLabel::Identity),
            "swap" | "swapGate" => Ok(GateLabel::Swap),
            "control" => match param {
                Some("1") => Ok(GateLabel::Control { bit: true }),
                Some("0") => Ok(GateLabel::Control { bit: false }),
                _ => Err(malformed(stamp, "control mode must be 0 or 1")),
            },
            "controlGate" => Ok(GateLabel::Control { bit: true }),
            "anticontrolGate" => Ok(GateLabel::Control { bit: false }),
            "measurement" | "measurementGate" => match param {
                Some("0") => Ok(GateLabel::Measurement {
                    postselect: Some(false),
                }),
                Some("1") => Ok(GateLabel::Measurement {
                    postselect: Some(true),
                }),
                // Mode 2 and bare legacy stamps measure without filtering.
                Some("2") | None => Ok(GateLabel::Measurement { postselect: None }),
                Some(_) => Err(malformed(stamp, "measurement mode must be 0, 1 or 2")),
            },
            "powered-x" | "nthXGate" => powered(stamp, PauliAxis::X, param),
            "powered-y" | "nthYGate" => powered(stamp, PauliAxis::Y, param),
            "powered-z" | "nthZGate" => powered(stamp, PauliAxis::Z, param),
            _ if is_custom_ref(head) => Ok(GateLabel::CustomRef(head.to_owned())),
            _ => Err(CompileError::UnknownLabel(stamp.to_owned())),
        }
    }

    /// Encode back to a wire stamp, always in the current vocabulary.
    pub fn encode(&self) -> String {
        match self {
            GateLabel::Plain(g) => g.name().to_owned(),
            GateLabel::Identity => "inertia".to_owned(),
            GateLabel::Swap => "swap".to_owned(),
            GateLabel::Control { bit } => format!("control{DELIMITER}{}", u8::from(*bit)),
            GateLabel::Measurement { postselect } => {
                let mode = match postselect {
                    Some(false) => 0,
                    Some(true) => 1,
                    None => 2,
                };
                format!("measurement{DELIMITER}{mode}")
            }
            GateLabel::Powered { axis, exponent } => {
                format!("powered-{}{DELIMITER}{exponent}", axis.name())
            }
            GateLabel::CustomRef(id) => id.clone(),
        }
    }

    /// Whether the cell is a no-op placeholder.
    pub fn is_identity(&self) -> bool {
        matches!(self, GateLabel::Identity)
    }

    /// Whether the cell is a control or anticontrol.
    pub fn is_control(&self) -> bool {
        matches!(self, GateLabel::Control { .. })
    }
}

fn powered(stamp: &str, axis: PauliAxis, param: Option<&str>) -> CompileResult<GateLabel> {
    match param {
        Some(expr) if !expr.trim().is_empty() => Ok(GateLabel::Powered {
            axis,
            exponent: expr.to_owned(),
        }),
        _ => Err(malformed(stamp, "powered gate needs an exponent expression")),
    }
}

fn is_custom_ref(head: &str) -> bool {
    head.len() > 2
        && head.starts_with("cg")
        && head[2..].bytes().all(|b| b.is_ascii_digit())
}

fn malformed(stamp: &str, reason: &str) -> CompileError {
    CompileError::MalformedLabel {
        label: stamp.to_owned(),
        reason: reason.to_owned(),
    }
}
