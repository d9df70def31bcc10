//! Step classification.
//!
//! One column of the gate matrix mixes cells with very different compile-time
//! roles. The segregator sorts the column's occupied cells into role buckets
//! by qubit index; the step compiler then consumes the buckets in a fixed
//! placement order.

use crate::label::GateLabel;

/// The occupied cells of one step, bucketed by role.
///
/// Every bucket holds qubit indices in ascending order. `rest` is the
/// placement bucket for matrix-bearing cells: plain gates first, then custom
/// gate references, each group in qubit order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segregated {
    /// Plain control cells.
    pub controls: Vec<usize>,
    /// Anticontrol cells.
    pub anticontrols: Vec<usize>,
    /// Swap endpoints.
    pub swaps: Vec<usize>,
    /// Measurement cells.
    pub measurements: Vec<usize>,
    /// Powered Pauli cells.
    pub powers: Vec<usize>,
    /// Plain gates, then custom gate references.
    pub rest: Vec<usize>,
}

/// Classify one column of the gate matrix.
pub fn segregate(column: &[GateLabel]) -> Segregated {
    let mut seg = Segregated::default();
    let mut customs = Vec::new();
    for (idx, label) in column.iter().enumerate() {
        match label {
            GateLabel::Identity => {}
            GateLabel::Control { bit: true } => seg.controls.push(idx),
            GateLabel::Control { bit: false } => seg.anticontrols.push(idx),
            GateLabel::Swap => seg.swaps.push(idx),
            GateLabel::Measurement { .. } => seg.measurements.push(idx),
            GateLabel::Powered { .. } => seg.powers.push(idx),
            GateLabel::Plain(_) => seg.rest.push(idx),
            GateLabel::CustomRef(_) => customs.push(idx),
        }
    }
    seg.rest.extend(customs);
    seg
}
