//! Property tests for the compilation pipeline.

use proptest::prelude::*;

use rimfax_compile::{
    CustomGateRegistry, GateLabel, GateMatrix, PostselectionMap, assemble, filter_counts,
    segregate,
};
use rimfax_hal::Counts;

fn arb_stamp() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x".to_owned()),
        Just("y".to_owned()),
        Just("z".to_owned()),
        Just("h".to_owned()),
        Just("s".to_owned()),
        Just("t".to_owned()),
        Just("inertia".to_owned()),
        Just("control<!@DELIMITER>0".to_owned()),
        Just("control<!@DELIMITER>1".to_owned()),
        Just("measurement<!@DELIMITER>0".to_owned()),
        Just("measurement<!@DELIMITER>1".to_owned()),
        Just("measurement<!@DELIMITER>2".to_owned()),
        (1u8..=7).prop_map(|n| format!("powered-x<!@DELIMITER>{n}/4")),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(arb_stamp(), 0..6), 1..5)
}

fn decode(rows: &[Vec<String>]) -> Vec<Vec<GateLabel>> {
    rows.iter()
        .map(|row| row.iter().map(|s| GateLabel::decode(s).unwrap()).collect())
        .collect()
}

proptest! {
    /// The built matrix is always rectangular, whatever the input raggedness.
    #[test]
    fn matrix_is_rectangular(rows in arb_rows()) {
        let matrix = GateMatrix::build(decode(&rows)).unwrap();
        let width = matrix.width();
        for row in matrix.rows() {
            prop_assert_eq!(row.len(), width);
        }
        prop_assert_eq!(matrix.num_qubits(), rows.len());
    }

    /// Segregation is a partition: every occupied cell lands in exactly one
    /// bucket, identity cells in none.
    #[test]
    fn segregation_partitions_the_column(stamps in prop::collection::vec(arb_stamp(), 1..10)) {
        let column: Vec<GateLabel> =
            stamps.iter().map(|s| GateLabel::decode(s).unwrap()).collect();
        let seg = segregate(&column);

        let mut seen: Vec<usize> = seg
            .controls
            .iter()
            .chain(&seg.anticontrols)
            .chain(&seg.swaps)
            .chain(&seg.measurements)
            .chain(&seg.powers)
            .chain(&seg.rest)
            .copied()
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<usize> = column
            .iter()
            .enumerate()
            .filter(|(_, label)| !label.is_identity())
            .map(|(idx, _)| idx)
            .collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    /// Assembled circuits round-trip any stamp soup without panicking, and
    /// every measurement cell produces exactly one measurement instruction.
    #[test]
    fn assembly_accounts_for_every_measurement(rows in arb_rows()) {
        let decoded = decode(&rows);
        let expected: usize = decoded
            .iter()
            .flatten()
            .filter(|label| matches!(label, GateLabel::Measurement { .. }))
            .count();
        let matrix = GateMatrix::build(decoded).unwrap();
        let (circuit, _) = assemble(rows.len(), &matrix, &CustomGateRegistry::new()).unwrap();
        let measures = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.is_measure())
            .count();
        prop_assert_eq!(measures, expected);
    }

    /// Counts filtering is idempotent and never increases any frequency.
    #[test]
    fn counts_filtering_is_idempotent(
        entries in prop::collection::vec((0u8..16, 1u64..1000), 1..10),
        bit in any::<bool>(),
    ) {
        let mut counts = Counts::new();
        for (state, n) in &entries {
            counts.record(format!("{state:04b}"), *n);
        }
        let before = counts.total();
        let map: PostselectionMap = [(1usize, bit)].into_iter().collect();

        match filter_counts(&mut counts, &map) {
            Ok(()) => {
                prop_assert!(counts.total() <= before);
                prop_assert!(counts.total() > 0);
                let snapshot = counts.sorted();
                filter_counts(&mut counts, &map).unwrap();
                prop_assert_eq!(counts.sorted(), snapshot);
            }
            Err(_) => {
                // Contradictory directive: everything was filtered.
                prop_assert_eq!(counts.total(), 0);
            }
        }
    }
}
