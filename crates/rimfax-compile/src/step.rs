//! Step compiler: one classified column to one circuit operation.
//!
//! The composite for a step lays its slots out in a fixed order: plain gates,
//! powered gates, custom gate bodies, then the swap pair. The position list
//! follows the same order, with every control cell in front, so the
//! instruction's footprint reads controls-then-targets.

use rimfax_ir::{Composite, ControlState, QubitId, SlotOp};
use tracing::warn;

use crate::error::CompileResult;
use crate::expr;
use crate::label::GateLabel;
use crate::registry::CustomGateRegistry;
use crate::segregate::Segregated;

/// One compiled step: a composite plus its absolute placement.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStep {
    /// The unified step operation.
    pub op: Composite,
    /// Target positions, one per composite qubit slot.
    pub qubits: Vec<QubitId>,
    /// The merged control condition, if any control cells were present.
    pub control: Option<ControlState>,
}

/// Compile one classified column into a step operation.
///
/// Returns `Ok(None)` when the column carries nothing operational (only
/// identity, measurement or dangling control cells).
pub fn compile_step(
    column: &[GateLabel],
    seg: &Segregated,
    registry: &CustomGateRegistry,
) -> CompileResult<Option<CompiledStep>> {
    let mut op = Composite::new();
    let mut qubits: Vec<QubitId> = Vec::new();

    // Plain gates, then custom references; `rest` is already in that order.
    for &idx in &seg.rest {
        match &column[idx] {
            GateLabel::Plain(gate) => {
                op.push(SlotOp::Gate(*gate));
                qubits.push(QubitId::from(idx));
            }
            GateLabel::CustomRef(id) => {
                let sub = registry.resolve(id)?;
                // A custom body spans consecutive qubits downward from its
                // cell.
                for j in 0..sub.num_qubits {
                    qubits.push(QubitId::from(idx + j));
                }
                op.push(SlotOp::Sub(sub.clone()));
            }
            other => unreachable!("non-rest label {other:?} in rest bucket"),
        }
    }

    for &idx in &seg.powers {
        let GateLabel::Powered { axis, exponent } = &column[idx] else {
            unreachable!("non-powered label in powers bucket");
        };
        let value = expr::evaluate(exponent)?;
        op.push(SlotOp::Powered {
            axis: *axis,
            exponent: value,
        });
        qubits.push(QubitId::from(idx));
    }

    match seg.swaps.len() {
        0 => {}
        2 => {
            op.push(SlotOp::Swap);
            qubits.push(QubitId::from(seg.swaps[0]));
            qubits.push(QubitId::from(seg.swaps[1]));
        }
        n => {
            // A swap needs exactly two endpoints in the same step; anything
            // else is a stray composer cell.
            warn!(endpoints = n, "dropping swap cells without a matching pair");
        }
    }

    if op.is_empty() {
        return Ok(None);
    }

    let control = merge_controls(column, seg);
    Ok(Some(CompiledStep { op, qubits, control }))
}

/// Merge control and anticontrol cells into one condition, in qubit order.
fn merge_controls(column: &[GateLabel], seg: &Segregated) -> Option<ControlState> {
    if seg.controls.is_empty() && seg.anticontrols.is_empty() {
        return None;
    }
    let mut cs = ControlState::new();
    for (idx, label) in column.iter().enumerate() {
        if let GateLabel::Control { bit } = label {
            cs.push(QubitId::from(idx), *bit);
        }
    }
    Some(cs)
}
