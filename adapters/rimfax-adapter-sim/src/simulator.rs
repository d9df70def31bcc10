//! The statevector simulator backend.

use async_trait::async_trait;
use tracing::{debug, instrument};

use rimfax_hal::{AmplitudeVector, Counts, SimError, SimResult, Simulator, UnitaryMatrix};
use rimfax_ir::Circuit;

use crate::statevector::Statevector;

// Statevector memory doubles per qubit; 20 qubits is 16 MiB of amplitudes.
const DEFAULT_MAX_QUBITS: usize = 20;
// The unitary is dim² entries, so its cap is half the register budget.
const MAX_UNITARY_QUBITS: usize = 10;

/// An exact statevector simulator.
///
/// Counts are produced by simulating the circuit once and sampling the final
/// distribution per shot, so shot count only affects sampling noise, not
/// simulation time.
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    max_qubits: usize,
}

impl StatevectorSimulator {
    /// Create a simulator with the default register limit.
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Create a simulator with a custom register limit.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self { max_qubits }
    }

    fn check_size(&self, circuit: &Circuit, max_qubits: usize) -> SimResult<()> {
        if circuit.num_qubits() > max_qubits {
            return Err(SimError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max_qubits,
            });
        }
        Ok(())
    }

    fn evolve(circuit: &Circuit) -> Statevector {
        let mut sv = Statevector::new(circuit.num_qubits());
        for instruction in circuit.instructions() {
            sv.apply(instruction);
        }
        sv
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Simulator for StatevectorSimulator {
    fn name(&self) -> &str {
        "statevector"
    }

    fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits(), shots))]
    async fn run_counts(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        self.check_size(circuit, self.max_qubits)?;
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }

        // Measurements are terminal no-ops in the engine, so a circuit
        // without measurement cells samples the full register the same way.
        let sv = Self::evolve(circuit);
        let mut rng = rand::thread_rng();
        let mut counts = Counts::new();
        for _ in 0..shots {
            let index = sv.sample(&mut rng);
            counts.record(sv.bitstring(index), 1);
        }
        debug!(outcomes = counts.len(), "sampled counts");
        Ok(counts)
    }

    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    async fn run_statevector(&self, circuit: &Circuit) -> SimResult<AmplitudeVector> {
        self.check_size(circuit, self.max_qubits)?;
        let sv = Self::evolve(circuit);
        Ok(AmplitudeVector::new(
            circuit.num_qubits(),
            sv.into_amplitudes(),
        ))
    }

    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    async fn run_unitary(&self, circuit: &Circuit) -> SimResult<UnitaryMatrix> {
        self.check_size(circuit, MAX_UNITARY_QUBITS)?;
        let dim = 1usize << circuit.num_qubits();
        let mut data = vec![num_complex::Complex64::new(0.0, 0.0); dim * dim];

        // Propagate each basis state through the gate sequence; the result
        // is column j of the unitary. Initial-state injection and
        // measurements are not part of the gate sequence.
        for col in 0..dim {
            let mut sv = Statevector::basis(circuit.num_qubits(), col);
            for instruction in circuit.instructions() {
                if instruction.is_operation() {
                    sv.apply(instruction);
                }
            }
            for (row, amp) in sv.amplitudes().iter().enumerate() {
                data[row * dim + col] = *amp;
            }
        }
        Ok(UnitaryMatrix::new(dim, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rimfax_ir::{ClbitId, Composite, Instruction, Ket, QubitId, SlotOp, StandardGate};

    fn x_then_measure(n: usize) -> Circuit {
        let mut circuit = Circuit::new(n);
        let mut op = Composite::new();
        op.push(SlotOp::Gate(StandardGate::X));
        circuit
            .push(Instruction::operation(op, [QubitId(0)]))
            .unwrap();
        for q in 0..n {
            circuit
                .push(Instruction::measure(QubitId::from(q), ClbitId::from(q)))
                .unwrap();
        }
        circuit
    }

    #[tokio::test]
    async fn test_counts_deterministic_circuit() {
        let sim = StatevectorSimulator::new();
        let counts = sim.run_counts(&x_then_measure(2), 100).await.unwrap();
        assert_eq!(counts.get("01"), 100);
        assert_eq!(counts.total(), 100);
    }

    #[tokio::test]
    async fn test_counts_without_measurements_sample_full_register() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::new(2);
        let mut op = Composite::new();
        op.push(SlotOp::Gate(StandardGate::X));
        circuit
            .push(Instruction::operation(op, [QubitId(0)]))
            .unwrap();

        let counts = sim.run_counts(&circuit, 100).await.unwrap();
        assert_eq!(counts.get("01"), 100);
        assert_eq!(counts.total(), 100);
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let sim = StatevectorSimulator::new();
        assert!(matches!(
            sim.run_counts(&x_then_measure(1), 0).await,
            Err(SimError::InvalidShots(0))
        ));
    }

    #[tokio::test]
    async fn test_register_limit() {
        let sim = StatevectorSimulator::with_max_qubits(3);
        let circuit = Circuit::new(4);
        assert!(matches!(
            sim.run_statevector(&circuit).await,
            Err(SimError::CircuitTooLarge { num_qubits: 4, max_qubits: 3 })
        ));
    }

    #[tokio::test]
    async fn test_statevector_respects_initial_state() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::new(1);
        circuit.initialize(vec![Ket::One]).unwrap();
        let amps = sim.run_statevector(&circuit).await.unwrap();
        assert!((amps.get(1).re - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_unitary_of_x() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::new(1);
        let mut op = Composite::new();
        op.push(SlotOp::Gate(StandardGate::X));
        circuit
            .push(Instruction::operation(op, [QubitId(0)]))
            .unwrap();
        // Initial state and measurements must not leak into the unitary.
        circuit.initialize(vec![Ket::One]).unwrap();
        circuit
            .push(Instruction::measure(QubitId(0), ClbitId(0)))
            .unwrap();

        let u = sim.run_unitary(&circuit).await.unwrap();
        assert_eq!(u.dim(), 2);
        assert!((u.get(0, 1).re - 1.0).abs() < 1e-12);
        assert!((u.get(1, 0).re - 1.0).abs() < 1e-12);
        assert!(u.get(0, 0).norm() < 1e-12);
    }
}
