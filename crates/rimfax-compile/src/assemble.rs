//! Circuit assembler: a full gate matrix to a circuit plus postselections.

use rimfax_ir::{Circuit, ClbitId, Instruction, QubitId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::label::GateLabel;
use crate::matrix::GateMatrix;
use crate::registry::CustomGateRegistry;
use crate::segregate::segregate;
use crate::step::compile_step;

/// Postselection directives keyed by qubit index.
///
/// `true` keeps only outcomes where the qubit measured |1⟩, `false` only |0⟩.
pub type PostselectionMap = FxHashMap<usize, bool>;

/// Assemble a circuit from a gate matrix, column by column.
///
/// Each column compiles to at most one operation, followed by one measurement
/// per measurement cell (classical bit = qubit index). Postselecting
/// measurement cells record their directive in the returned map; when a qubit
/// is measured more than once, the latest directive wins.
pub fn assemble(
    num_qubits: usize,
    matrix: &GateMatrix,
    registry: &CustomGateRegistry,
) -> CompileResult<(Circuit, PostselectionMap)> {
    if matrix.num_qubits() != num_qubits {
        return Err(CompileError::QubitCountMismatch {
            declared: num_qubits,
            got: matrix.num_qubits(),
        });
    }

    let mut circuit = Circuit::new(num_qubits);
    let mut postselections = PostselectionMap::default();

    for step in 0..matrix.width() {
        let column = matrix.column(step);
        let seg = segregate(&column);

        if let Some(compiled) = compile_step(&column, &seg, registry)? {
            let instruction = match compiled.control {
                Some(cs) => Instruction::controlled(compiled.op, compiled.qubits, cs),
                None => Instruction::operation(compiled.op, compiled.qubits),
            };
            circuit.push(instruction)?;
        }

        for &idx in &seg.measurements {
            circuit.push(Instruction::measure(
                QubitId::from(idx),
                ClbitId::from(idx),
            ))?;
            if let GateLabel::Measurement {
                postselect: Some(bit),
            } = column[idx]
            {
                postselections.insert(idx, bit);
            }
        }
    }

    debug!(
        num_qubits,
        steps = matrix.width(),
        instructions = circuit.len(),
        postselections = postselections.len(),
        "assembled circuit"
    );
    Ok((circuit, postselections))
}
