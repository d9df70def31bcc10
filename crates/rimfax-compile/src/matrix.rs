//! Rectangular gate matrix over decoded labels.
//!
//! The composer sends one timeline per qubit; timelines may have ragged
//! lengths, so the builder pads every row with identity cells up to the
//! longest one. After that, column j of the matrix is exactly time step j.

use crate::error::{CompileError, CompileResult};
use crate::label::GateLabel;

/// A rectangular matrix of decoded gate labels: row = qubit, column = step.
#[derive(Debug, Clone, PartialEq)]
pub struct GateMatrix {
    rows: Vec<Vec<GateLabel>>,
    width: usize,
}

impl GateMatrix {
    /// Build a matrix from per-qubit timelines, padding short rows with
    /// [`GateLabel::Identity`].
    pub fn build(mut rows: Vec<Vec<GateLabel>>) -> CompileResult<Self> {
        if rows.is_empty() {
            return Err(CompileError::EmptyTemplate);
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, GateLabel::Identity);
        }
        Ok(Self { rows, width })
    }

    /// Number of qubits (rows).
    pub fn num_qubits(&self) -> usize {
        self.rows.len()
    }

    /// Number of time steps (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// The padded timelines.
    pub fn rows(&self) -> &[Vec<GateLabel>] {
        &self.rows
    }

    /// The labels of time step `step`, top row first.
    ///
    /// # Panics
    ///
    /// Panics if `step >= self.width()`.
    pub fn column(&self, step: usize) -> Vec<GateLabel> {
        assert!(step < self.width, "step {step} out of range");
        self.rows.iter().map(|row| row[step].clone()).collect()
    }
}
