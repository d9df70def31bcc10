//! End-to-end request tests against the statevector backend.

use rimfax_adapter_sim::StatevectorSimulator;
use rimfax_hal::SimulatorRegistry;
use rimfax_service::{ServiceError, execute};

fn registry() -> SimulatorRegistry {
    let mut registry = SimulatorRegistry::new();
    registry.register("statevector", || Box::new(StatevectorSimulator::new()));
    registry
}

#[tokio::test]
async fn test_round_trip_x_gate() {
    let payload = r#"{"length":2,"q0":{"state":"|0>","gates":["x","measurement<!@DELIMITER>2"]},"q1":{"state":"|0>","gates":["inertia","measurement<!@DELIMITER>2"]},"shots":100,"includeCounts":true}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "01");
    assert_eq!(hit.counts, 100);
    assert!(response.amplitudes.is_none());
    assert!(response.unitary.is_none());
}

#[tokio::test]
async fn test_counts_without_measurement_cells() {
    // No measurement stamps anywhere: counts sample the full register.
    let payload = r#"{"length":2,"q0":{"gates":["x"]},"q1":{"gates":[]},"shots":100,"includeCounts":true}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "01");
    assert_eq!(hit.counts, 100);
}

#[tokio::test]
async fn test_custom_gate_counts_without_measurement_cells() {
    let payload = concat!(
        r#"{"length":2,"q0":{"gates":["swap"]},"q1":{"gates":["swap"]}}"#,
        "\n",
        r#"{"length":2,"q0":{"state":"|1>","gates":["cg1"]},"q1":{"gates":[]},"shots":50,"includeCounts":true}"#,
    );
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "10");
    assert_eq!(hit.counts, 50);
}

#[tokio::test]
async fn test_custom_gate_definition_line() {
    // Line 1 defines a two-qubit swap as cg1; line 2 applies it to |01⟩.
    let payload = concat!(
        r#"{"length":2,"q0":{"gates":["swap"]},"q1":{"gates":["swap"]}}"#,
        "\n",
        r#"{"length":2,"q0":{"state":"|1>","gates":["cg1","measurement<!@DELIMITER>2"]},"q1":{"state":"|0>","gates":["inertia","measurement<!@DELIMITER>2"]},"shots":50,"includeCounts":true}"#,
    );
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "10");
    assert_eq!(hit.counts, 50);
}

#[tokio::test]
async fn test_postselection_keeps_conforming_states() {
    // H then postselect |1⟩: amplitudes renormalize onto |1⟩.
    let payload = r#"{"length":1,"q0":{"gates":["h","measurement<!@DELIMITER>1"]},"shots":100}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let amplitudes = response.amplitudes.unwrap();
    assert_eq!(amplitudes[0].real, 0.0);
    assert_eq!(amplitudes[1].real, 1.0);
    assert_eq!(response.probabilites.unwrap(), vec![0.0, 1.0]);

    for entry in response.counts.unwrap() {
        if entry.state == "0" {
            assert_eq!(entry.counts, 0);
        }
    }
}

#[tokio::test]
async fn test_contradictory_postselection_nulls_the_outputs() {
    // The qubit is deterministically |1⟩ but the directive demands |0⟩.
    let payload = r#"{"length":1,"q0":{"gates":["x","measurement<!@DELIMITER>0"]},"shots":100}"#;
    let response = execute(payload, &registry()).await.unwrap();

    assert!(response.counts.is_none());
    assert!(response.amplitudes.is_none());
    assert!(response.probabilites.is_none());
}

#[tokio::test]
async fn test_big_endian_reverses_readout() {
    let payload = r#"{"length":2,"q0":{"gates":["x","measurement<!@DELIMITER>2"]},"q1":{"gates":["inertia","measurement<!@DELIMITER>2"]},"shots":10,"endianness":"big","includeCounts":true}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "10");
}

#[tokio::test]
async fn test_unitary_output() {
    let payload = r#"{"length":1,"q0":{"gates":["h"]},"includeUnitary":true}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let unitary = response.unitary.unwrap();
    assert_eq!(unitary[0][0], "0.7071+0.0000i");
    assert_eq!(unitary[1][1], "-0.7071+0.0000i");
    assert_eq!(response.unitary_squares.unwrap()[0], vec![0.5, 0.5]);
    assert!(response.counts.is_none());
}

#[tokio::test]
async fn test_controlled_gate_between_lanes() {
    // CNOT built from a control cell and an X cell in the same step.
    let payload = r#"{"length":2,"q0":{"state":"|1>","gates":["control<!@DELIMITER>1","measurement<!@DELIMITER>2"]},"q1":{"gates":["x","measurement<!@DELIMITER>2"]},"shots":20,"includeCounts":true}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "11");
}

#[tokio::test]
async fn test_unknown_backend_isolates_counts_failure() {
    let payload = r#"{"length":1,"q0":{"gates":["x","measurement<!@DELIMITER>2"]},"backend":"tensor"}"#;
    let response = execute(payload, &registry()).await.unwrap();

    // The named backend does not exist, so every slot that needed it is null,
    // but the request itself still succeeds.
    assert!(response.counts.is_none());
    assert!(response.amplitudes.is_none());
}

#[tokio::test]
async fn test_unknown_label_aborts_the_request() {
    let payload = r#"{"length":1,"q0":{"gates":["frobnicate"]}}"#;
    let error = execute(payload, &registry()).await.unwrap_err();
    assert!(matches!(error, ServiceError::Compile(_)));
}

#[tokio::test]
async fn test_empty_payload_is_an_error() {
    assert!(execute("", &registry()).await.is_err());
}

#[tokio::test]
async fn test_powered_gate_end_to_end() {
    // Two X^(1/2) in sequence equal one X.
    let payload = r#"{"length":1,"q0":{"gates":["powered-x<!@DELIMITER>1/2","powered-x<!@DELIMITER>1/2","measurement<!@DELIMITER>2"]},"shots":40,"includeCounts":true}"#;
    let response = execute(payload, &registry()).await.unwrap();

    let counts = response.counts.unwrap();
    let hit = counts.iter().find(|entry| entry.counts > 0).unwrap();
    assert_eq!(hit.state, "1");
    assert_eq!(hit.counts, 40);
}
