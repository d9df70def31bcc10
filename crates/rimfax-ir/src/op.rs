//! Step operations: composite gates, control states, instructions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::{PauliAxis, StandardGate};
use crate::ket::Ket;
use crate::qubit::{ClbitId, QubitId};

/// One slot of a composite step operation.
///
/// A slot occupies one or more consecutive qubit positions of the composite
/// it belongs to; [`SlotOp::width`] gives the span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotOp {
    /// A standard gate.
    Gate(StandardGate),
    /// A Pauli gate raised to a real exponent.
    Powered {
        /// The Pauli axis.
        axis: PauliAxis,
        /// The evaluated exponent.
        exponent: f64,
    },
    /// A compiled custom-gate body, spanning its full width.
    Sub(SubCircuit),
    /// A swap of two consecutive slots.
    Swap,
}

impl SlotOp {
    /// Number of qubit positions this slot occupies.
    pub fn width(&self) -> usize {
        match self {
            SlotOp::Gate(g) => g.num_qubits(),
            SlotOp::Powered { .. } => 1,
            SlotOp::Sub(sub) => sub.num_qubits,
            SlotOp::Swap => 2,
        }
    }
}

/// The unified multi-qubit operation for one step.
///
/// Slots are laid out consecutively; the composite's width is the sum of its
/// slot widths, and the k-th qubit position of the composite is resolved
/// against the position list of the enclosing [`Instruction::Operation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    slots: Vec<SlotOp>,
}

impl Composite {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self { slots: vec![] }
    }

    /// Append a slot.
    pub fn push(&mut self, slot: SlotOp) {
        self.slots.push(slot);
    }

    /// The slots in placement order.
    pub fn slots(&self) -> &[SlotOp] {
        &self.slots
    }

    /// Total number of qubit positions spanned.
    pub fn width(&self) -> usize {
        self.slots.iter().map(SlotOp::width).sum()
    }

    /// Whether the composite holds no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<SlotOp> for Composite {
    fn from_iter<T: IntoIterator<Item = SlotOp>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// A multi-bit control condition.
///
/// Bit k belongs to control qubit k: `true` requires |1⟩ (a plain control),
/// `false` requires |0⟩ (an anticontrol). The pairing between qubit and bit
/// is positional and fixed at construction; getting this order wrong silently
/// inverts the condition, so both lists grow only in lockstep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    qubits: Vec<QubitId>,
    bits: Vec<bool>,
}

impl ControlState {
    /// Create an empty control state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one control qubit with its required bit.
    pub fn push(&mut self, qubit: QubitId, bit: bool) {
        self.qubits.push(qubit);
        self.bits.push(bit);
    }

    /// The control qubits, in condition order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The required bit per control qubit, in condition order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Iterate `(qubit, required_bit)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, bool)> + '_ {
        self.qubits.iter().copied().zip(self.bits.iter().copied())
    }

    /// Number of control qubits.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Whether there are no controls.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Render the condition as a bitstring in condition order.
    pub fn bitstring(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .iter()
            .map(|(q, b)| format!("{q}={}", u8::from(b)))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

/// A compiled custom-gate body.
///
/// Holds the sub-circuit's instructions against a local qubit numbering
/// `0..num_qubits`; the enclosing composite maps them onto absolute
/// positions when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCircuit {
    /// Registry identifier (`cg1`, `cg2`, …).
    pub name: String,
    /// Qubit span of the body.
    pub num_qubits: usize,
    /// The body, in step order.
    pub instructions: Vec<Instruction>,
}

/// A complete instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// A composite operation applied at explicit qubit positions,
    /// optionally wrapped in a multi-bit control condition.
    Operation {
        /// The unified step operation.
        op: Composite,
        /// Target positions, one per composite qubit slot, in slot order.
        qubits: Vec<QubitId>,
        /// Optional control condition; control qubits precede the targets
        /// in the instruction's overall footprint.
        control: Option<ControlState>,
    },
    /// Measure a qubit into a classical bit.
    Measure {
        /// The measured qubit.
        qubit: QubitId,
        /// The destination classical bit.
        clbit: ClbitId,
    },
    /// Inject the register's initial state. Always the first instruction.
    Initialize {
        /// One ket per qubit, indexed by qubit.
        kets: Vec<Ket>,
    },
}

impl Instruction {
    /// Create an uncontrolled operation instruction.
    pub fn operation(op: Composite, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Instruction::Operation {
            op,
            qubits: qubits.into_iter().collect(),
            control: None,
        }
    }

    /// Create a controlled operation instruction.
    pub fn controlled(
        op: Composite,
        qubits: impl IntoIterator<Item = QubitId>,
        control: ControlState,
    ) -> Self {
        Instruction::Operation {
            op,
            qubits: qubits.into_iter().collect(),
            control: Some(control),
        }
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Instruction::Measure { qubit, clbit }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Instruction::Measure { .. })
    }

    /// Check if this is an operation.
    pub fn is_operation(&self) -> bool {
        matches!(self, Instruction::Operation { .. })
    }

    /// Check if this is an initial-state injection.
    pub fn is_initialize(&self) -> bool {
        matches!(self, Instruction::Initialize { .. })
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Operation { .. } => "operation",
            Instruction::Measure { .. } => "measure",
            Instruction::Initialize { .. } => "initialize",
        }
    }
}
