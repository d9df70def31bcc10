//! Simulation result types.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts from a circuit execution.
///
/// Keys are bitstrings in big-endian display order: the leftmost character is
/// the highest-numbered qubit, the rightmost is qubit 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty counts collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` additional observations of `bitstring`.
    pub fn record(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of one bitstring (0 if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total observations across all bitstrings.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequent outcome, if any observations exist.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .filter(|&(_, &n)| n > 0)
            .max_by_key(|&(_, &n)| n)
            .map(|(s, &n)| (s.as_str(), n))
    }

    /// Iterate `(bitstring, observations)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, &n)| (s.as_str(), n))
    }

    /// Iterate with mutable access to the observation counts.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut u64)> {
        self.counts.iter_mut().map(|(s, n)| (s.as_str(), n))
    }

    /// Number of distinct bitstrings recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no bitstrings are recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(bitstring, observations)` pairs sorted by bitstring.
    ///
    /// Deterministic ordering for rendering and assertions.
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> =
            self.counts.iter().map(|(s, &n)| (s.clone(), n)).collect();
        entries.sort();
        entries
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (s, n) in iter {
            counts.record(s, n);
        }
        counts
    }
}

/// The full statevector of a register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeVector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl AmplitudeVector {
    /// Wrap `2^num_qubits` amplitudes indexed by basis state.
    ///
    /// Basis index bit q (little-endian) is the state of qubit q.
    ///
    /// # Panics
    ///
    /// Panics if the amplitude count is not `2^num_qubits`.
    pub fn new(num_qubits: usize, amplitudes: Vec<Complex64>) -> Self {
        assert_eq!(
            amplitudes.len(),
            1usize << num_qubits,
            "amplitude count must be 2^num_qubits"
        );
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Register length.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Whether the vector is empty (never true for a constructed vector).
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitude of basis state `index`.
    pub fn get(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// All amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable access for in-place filtering and renormalization.
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Big-endian display label of basis state `index`.
    ///
    /// The rightmost character is qubit 0, matching [`Counts`] keys.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{index:0width$b}", width = self.num_qubits)
    }

    /// Measurement probabilities per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Euclidean norm of the vector.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }
}

/// The unitary matrix of a circuit's gate sequence, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitaryMatrix {
    data: Vec<Complex64>,
    dim: usize,
}

impl UnitaryMatrix {
    /// Wrap a `dim × dim` row-major matrix.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != dim * dim`.
    pub fn new(dim: usize, data: Vec<Complex64>) -> Self {
        assert_eq!(data.len(), dim * dim, "matrix must be dim × dim");
        Self { data, dim }
    }

    /// Matrix dimension (`2^num_qubits`).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[Complex64] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }
}

/// One requested output slot of a simulation run.
///
/// Output failures are isolated: one slot failing never poisons the others,
/// so each slot carries its own state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output<T> {
    /// The output was produced.
    Ready(T),
    /// The request did not ask for this output.
    NotRequested,
    /// Producing this output failed.
    Failed(String),
}

impl<T> Output<T> {
    /// Whether the output was produced.
    pub fn is_ready(&self) -> bool {
        matches!(self, Output::Ready(_))
    }

    /// The produced value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Output::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if the slot failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Output::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.record("01", 1);
        counts.record("01", 2);
        counts.record("10", 5);
        assert_eq!(counts.get("01"), 3);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total(), 8);
        assert_eq!(counts.most_frequent(), Some(("10", 5)));
        assert_eq!(counts.sorted(), vec![("01".into(), 3), ("10".into(), 5)]);
    }

    #[test]
    fn test_most_frequent_skips_zeroed_entries() {
        let mut counts = Counts::new();
        counts.record("00", 4);
        counts.record("11", 1);
        for (_, n) in counts.iter_mut() {
            *n = 0;
        }
        assert_eq!(counts.most_frequent(), None);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_amplitude_vector_labels() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        // |01⟩ in big-endian display: qubit 0 is set.
        let amps = AmplitudeVector::new(2, vec![zero, one, zero, zero]);
        assert_eq!(amps.bitstring(1), "01");
        assert_eq!(amps.bitstring(2), "10");
        assert_eq!(amps.probabilities()[1], 1.0);
        assert!((amps.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unitary_indexing() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let u = UnitaryMatrix::new(2, vec![zero, one, one, zero]);
        assert_eq!(u.get(0, 1), one);
        assert_eq!(u.row(1), &[one, zero]);
    }

    #[test]
    fn test_output_slots() {
        let ready: Output<u32> = Output::Ready(7);
        assert!(ready.is_ready());
        assert_eq!(ready.ready(), Some(&7));
        let failed: Output<u32> = Output::Failed("boom".into());
        assert_eq!(failed.failure(), Some("boom"));
        assert!(!Output::<u32>::NotRequested.is_ready());
    }
}
