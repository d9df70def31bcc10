//! Step-sequence circuit representation.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::ket::Ket;
use crate::op::{ControlState, Instruction};
use crate::qubit::QubitId;

/// A quantum circuit over an explicit register length.
///
/// The circuit is an ordered sequence of instructions; each operation carries
/// its own composite step plus the exact qubit positions it applies to, so
/// no DAG bookkeeping is needed. Operation ordering is semantically
/// significant and preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            instructions: vec![],
        }
    }

    /// Register length.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The instructions in step order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Whether any instruction is a measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Append an instruction, validating its footprint against the register.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        match &instruction {
            Instruction::Operation { op, qubits, control } => {
                if qubits.len() != op.width() {
                    return Err(IrError::WidthMismatch {
                        expected: op.width(),
                        got: qubits.len(),
                    });
                }
                let footprint: Vec<QubitId> = control
                    .iter()
                    .flat_map(|c| c.qubits().iter().copied())
                    .chain(qubits.iter().copied())
                    .collect();
                for (i, &q) in footprint.iter().enumerate() {
                    if q.index() >= self.num_qubits {
                        return Err(IrError::QubitOutOfRange {
                            qubit: q,
                            num_qubits: self.num_qubits,
                        });
                    }
                    if footprint[..i].contains(&q) {
                        return Err(IrError::DuplicateQubit(q));
                    }
                }
            }
            Instruction::Measure { qubit, clbit } => {
                if qubit.index() >= self.num_qubits {
                    return Err(IrError::QubitOutOfRange {
                        qubit: *qubit,
                        num_qubits: self.num_qubits,
                    });
                }
                if clbit.index() >= self.num_qubits {
                    return Err(IrError::ClbitOutOfRange {
                        clbit: *clbit,
                        num_clbits: self.num_qubits,
                    });
                }
            }
            Instruction::Initialize { .. } => {
                // Initial state goes through `initialize`, which composes it
                // in front; pushing it like a step would break the ordering
                // invariant.
                return Err(IrError::AlreadyInitialized);
            }
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Compose an initial-state injection in front of every other step.
    pub fn initialize(&mut self, kets: Vec<Ket>) -> IrResult<&mut Self> {
        if kets.len() != self.num_qubits {
            return Err(IrError::InitialStateLength {
                expected: self.num_qubits,
                got: kets.len(),
            });
        }
        if self.instructions.iter().any(Instruction::is_initialize) {
            return Err(IrError::AlreadyInitialized);
        }
        self.instructions.insert(0, Instruction::Initialize { kets });
        Ok(self)
    }

    /// The injected initial state, if any.
    pub fn initial_state(&self) -> Option<&[Ket]> {
        self.instructions.iter().find_map(|inst| match inst {
            Instruction::Initialize { kets } => Some(kets.as_slice()),
            _ => None,
        })
    }

    /// Reverse the qubit ordering of the entire circuit (big-endian output).
    ///
    /// Every qubit position q becomes n-1-q: operation targets, control
    /// qubits, measurement qubits and classical bits, and the initial kets
    /// all follow the same flip, so readout order stays internally
    /// consistent.
    pub fn reverse_bits(&mut self) {
        let n = self.num_qubits;
        let flip = |q: QubitId| QubitId::from(n - 1 - q.index());
        for inst in &mut self.instructions {
            match inst {
                Instruction::Operation { qubits, control, .. } => {
                    for q in qubits.iter_mut() {
                        *q = flip(*q);
                    }
                    if let Some(cs) = control.take() {
                        let mut flipped = ControlState::new();
                        for (q, bit) in cs.iter() {
                            flipped.push(flip(q), bit);
                        }
                        *control = Some(flipped);
                    }
                }
                Instruction::Measure { qubit, clbit } => {
                    *qubit = flip(*qubit);
                    *clbit = crate::qubit::ClbitId::from(n - 1 - clbit.index());
                }
                Instruction::Initialize { kets } => {
                    kets.reverse();
                }
            }
        }
    }
}
