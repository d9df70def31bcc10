//! Response rendering.
//!
//! The response shape is fixed: every output field is always present and
//! `null` when not requested or failed. Reals are rounded to four decimals
//! before serialization; the `probabilites` field name is a wire-format typo
//! the composer depends on, so it stays.

use serde::{Deserialize, Serialize};

use rimfax_hal::{AmplitudeVector, Counts, UnitaryMatrix};

/// One measurement outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountsEntry {
    /// The measured bitstring, big-endian display order.
    pub state: String,
    /// Number of shots that produced it.
    pub counts: u64,
}

/// One basis-state amplitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeEntry {
    /// Basis-state label, big-endian display order.
    pub state: String,
    /// Real part, rounded.
    pub real: f64,
    /// Imaginary part, rounded.
    pub imag: f64,
}

/// The full simulation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Measurement counts, sorted by state.
    pub counts: Option<Vec<CountsEntry>>,
    /// Final statevector amplitudes, by basis state.
    pub amplitudes: Option<Vec<AmplitudeEntry>>,
    /// Measurement probabilities per basis state.
    pub probabilites: Option<Vec<f64>>,
    /// The unitary as `a+bi` decimal strings, row-major.
    pub unitary: Option<Vec<Vec<String>>>,
    /// Entry-wise squared magnitudes of the unitary.
    pub unitary_squares: Option<Vec<Vec<f64>>>,
}

/// Render counts sorted by bitstring.
pub fn render_counts(counts: &Counts) -> Vec<CountsEntry> {
    counts
        .sorted()
        .into_iter()
        .map(|(state, counts)| CountsEntry { state, counts })
        .collect()
}

/// Render the statevector into amplitude entries and probabilities.
pub fn render_amplitudes(amplitudes: &AmplitudeVector) -> (Vec<AmplitudeEntry>, Vec<f64>) {
    let entries = (0..amplitudes.len())
        .map(|index| {
            let amp = amplitudes.get(index);
            AmplitudeEntry {
                state: amplitudes.bitstring(index),
                real: round4(amp.re),
                imag: round4(amp.im),
            }
        })
        .collect();
    let probabilities = amplitudes
        .probabilities()
        .into_iter()
        .map(round4)
        .collect();
    (entries, probabilities)
}

/// Render the unitary into decimal strings and squared magnitudes.
pub fn render_unitary(unitary: &UnitaryMatrix) -> (Vec<Vec<String>>, Vec<Vec<f64>>) {
    let mut strings = Vec::with_capacity(unitary.dim());
    let mut squares = Vec::with_capacity(unitary.dim());
    for row in 0..unitary.dim() {
        let entries = unitary.row(row);
        strings.push(
            entries
                .iter()
                .map(|amp| format!("{:.4}{:+.4}i", round4(amp.re), round4(amp.im)))
                .collect(),
        );
        squares.push(entries.iter().map(|amp| round4(amp.norm_sqr())).collect());
    }
    (strings, squares)
}

fn round4(x: f64) -> f64 {
    // The +0.0 folds -0.0 into 0.0.
    (x * 10_000.0).round() / 10_000.0 + 0.0
}
