//! Postselection and renormalization.
//!
//! Measurement cells with mode 0 or 1 keep only the outcomes where their
//! qubit read the required bit. Counts filtering zeroes the frequencies of
//! rejected bitstrings; amplitude filtering zeroes rejected basis states and
//! renormalizes the survivors to unit norm. A directive that rejects
//! everything is a hard error, never a silently corrupted distribution.

use num_complex::Complex64;
use rimfax_hal::{AmplitudeVector, Counts};
use tracing::debug;

use crate::assemble::PostselectionMap;
use crate::error::{CompileError, CompileResult};

// Norms below this are treated as fully filtered out.
const NORM_EPSILON: f64 = 1e-12;

/// Zero out counts of bitstrings that violate any postselection directive.
///
/// Bitstrings are big-endian display order, so qubit q is the character
/// `len - 1 - q`. Filtering is idempotent; an empty map is a no-op.
pub fn filter_counts(counts: &mut Counts, postselections: &PostselectionMap) -> CompileResult<()> {
    if postselections.is_empty() {
        return Ok(());
    }
    let before = counts.total();
    for (bitstring, n) in counts.iter_mut() {
        if !satisfies(bitstring, postselections) {
            *n = 0;
        }
    }
    let after = counts.total();
    debug!(before, after, "filtered counts");
    if after == 0 && before > 0 {
        return Err(CompileError::PostselectionUnsatisfiable);
    }
    Ok(())
}

/// Zero out rejected basis states and renormalize the survivors.
///
/// Basis index bit q is the state of qubit q. If the surviving norm is zero
/// the directives contradict the state and the vector is left untouched.
pub fn filter_amplitudes(
    amplitudes: &mut AmplitudeVector,
    postselections: &PostselectionMap,
) -> CompileResult<()> {
    if postselections.is_empty() {
        return Ok(());
    }

    let mut norm_sqr = 0.0;
    let mut masked = amplitudes.amplitudes().to_vec();
    for (index, amp) in masked.iter_mut().enumerate() {
        let keep = postselections
            .iter()
            .all(|(&q, &bit)| (index >> q) & 1 == usize::from(bit));
        if keep {
            norm_sqr += amp.norm_sqr();
        } else {
            *amp = Complex64::new(0.0, 0.0);
        }
    }

    let norm = norm_sqr.sqrt();
    if norm < NORM_EPSILON {
        return Err(CompileError::PostselectionUnsatisfiable);
    }
    for (slot, amp) in amplitudes.amplitudes_mut().iter_mut().zip(masked) {
        *slot = amp / norm;
    }
    debug!(norm, "renormalized statevector");
    Ok(())
}

fn satisfies(bitstring: &str, postselections: &PostselectionMap) -> bool {
    postselections.iter().all(|(&q, &bit)| {
        bitstring
            .chars()
            .rev()
            .nth(q)
            .is_some_and(|c| c == if bit { '1' } else { '0' })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(entries: &[(usize, bool)]) -> PostselectionMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_counts_filtering_zeroes_violators() {
        let mut counts = Counts::new();
        counts.record("00", 40);
        counts.record("01", 30);
        counts.record("11", 30);
        filter_counts(&mut counts, &posts(&[(0, true)])).unwrap();
        assert_eq!(counts.get("00"), 0);
        assert_eq!(counts.get("01"), 30);
        assert_eq!(counts.get("11"), 30);
    }

    #[test]
    fn test_counts_filtering_is_idempotent() {
        let mut counts = Counts::new();
        counts.record("10", 5);
        counts.record("11", 5);
        let map = posts(&[(1, true)]);
        filter_counts(&mut counts, &map).unwrap();
        let snapshot = counts.sorted();
        filter_counts(&mut counts, &map).unwrap();
        assert_eq!(counts.sorted(), snapshot);
    }

    #[test]
    fn test_counts_contradiction_is_an_error() {
        let mut counts = Counts::new();
        counts.record("00", 10);
        assert!(matches!(
            filter_counts(&mut counts, &posts(&[(0, true)])),
            Err(CompileError::PostselectionUnsatisfiable)
        ));
    }

    #[test]
    fn test_empty_map_is_a_noop() {
        let mut counts = Counts::new();
        counts.record("0", 10);
        filter_counts(&mut counts, &PostselectionMap::default()).unwrap();
        assert_eq!(counts.get("0"), 10);
    }

    #[test]
    fn test_amplitudes_filter_and_renormalize() {
        use num_complex::Complex64;
        let h = std::f64::consts::FRAC_1_SQRT_2;
        // (|00⟩ + |01⟩)/√2, postselect qubit 0 = 1 → |01⟩.
        let mut amps = AmplitudeVector::new(
            2,
            vec![
                Complex64::new(h, 0.0),
                Complex64::new(h, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(0.0, 0.0),
            ],
        );
        filter_amplitudes(&mut amps, &posts(&[(0, true)])).unwrap();
        assert!((amps.get(1) - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert_eq!(amps.get(0), Complex64::new(0.0, 0.0));
        assert!((amps.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_amplitudes_contradiction_is_an_error() {
        use num_complex::Complex64;
        let mut amps = AmplitudeVector::new(
            1,
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        );
        assert!(matches!(
            filter_amplitudes(&mut amps, &posts(&[(0, true)])),
            Err(CompileError::PostselectionUnsatisfiable)
        ));
        // The vector is untouched on failure.
        assert_eq!(amps.get(0), Complex64::new(1.0, 0.0));
    }
}
