//! Statevector representation and gate application.
//!
//! The state of an n-qubit register is a flat vector of 2^n amplitudes,
//! indexed little-endian: bit q of the basis index is the state of qubit q.
//! Gates apply in place via bit-mask loops over the index space; a control
//! condition masks the loop to the basis states that satisfy it.

use num_complex::Complex64;
use rand::Rng;

use rimfax_ir::{Composite, Instruction, Ket, Matrix2, SlotOp, StandardGate, powered_matrix};

/// The full quantum state of a register.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Create the product state of one ket per qubit, indexed by qubit.
    pub fn from_kets(kets: &[Ket]) -> Self {
        let num_qubits = kets.len();
        let single: Vec<[Complex64; 2]> = kets.iter().copied().map(Ket::amplitudes).collect();
        let amplitudes = (0..1usize << num_qubits)
            .map(|index| {
                (0..num_qubits)
                    .map(|q| single[q][(index >> q) & 1])
                    .product()
            })
            .collect();
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Create the basis state |index⟩.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Register length.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector, yielding its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply one circuit instruction.
    ///
    /// Measurements are terminal in compiled circuits, so they are a no-op
    /// here; sampling happens on the final state.
    pub fn apply(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Initialize { kets } => *self = Self::from_kets(kets),
            Instruction::Measure { .. } => {}
            Instruction::Operation { op, qubits, control } => {
                let positions: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
                let controls: Vec<(usize, bool)> = control
                    .iter()
                    .flat_map(|cs| cs.iter().map(|(q, bit)| (q.index(), bit)))
                    .collect();
                self.apply_composite(op, &positions, &controls);
            }
        }
    }

    /// Apply a composite at absolute positions, under a control condition.
    fn apply_composite(&mut self, op: &Composite, positions: &[usize], controls: &[(usize, bool)]) {
        let mut k = 0;
        for slot in op.slots() {
            match slot {
                SlotOp::Gate(StandardGate::Swap) | SlotOp::Swap => {
                    self.apply_swap(positions[k], positions[k + 1], controls);
                }
                SlotOp::Gate(gate) => {
                    if let Some(matrix) = gate.matrix() {
                        self.apply_single(positions[k], matrix, controls);
                    }
                }
                SlotOp::Powered { axis, exponent } => {
                    self.apply_single(positions[k], powered_matrix(*axis, *exponent), controls);
                }
                SlotOp::Sub(sub) => {
                    // Map the body's local numbering onto our positions; the
                    // outer control condition applies to every body step.
                    let local = &positions[k..k + sub.num_qubits];
                    for inner in &sub.instructions {
                        let Instruction::Operation { op, qubits, control } = inner else {
                            continue;
                        };
                        let mapped: Vec<usize> =
                            qubits.iter().map(|q| local[q.index()]).collect();
                        let mut merged = controls.to_vec();
                        if let Some(cs) = control {
                            merged.extend(cs.iter().map(|(q, bit)| (local[q.index()], bit)));
                        }
                        self.apply_composite(op, &mapped, &merged);
                    }
                }
            }
            k += slot.width();
        }
    }

    /// Apply a 2×2 matrix to one qubit, masked by the control condition.
    fn apply_single(&mut self, qubit: usize, matrix: Matrix2, controls: &[(usize, bool)]) {
        let mask = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 || !controls_match(i, controls) {
                continue;
            }
            let j = i | mask;
            let a = self.amplitudes[i];
            let b = self.amplitudes[j];
            self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
            self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
        }
    }

    /// Exchange two qubits, masked by the control condition.
    fn apply_swap(&mut self, a: usize, b: usize, controls: &[(usize, bool)]) {
        let mask_a = 1usize << a;
        let mask_b = 1usize << b;
        for i in 0..self.amplitudes.len() {
            if i & mask_a == 0 || i & mask_b != 0 || !controls_match(i, controls) {
                continue;
            }
            let j = (i & !mask_a) | mask_b;
            self.amplitudes.swap(i, j);
        }
    }

    /// Measurement probabilities per basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Sample one basis state from the measurement distribution.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let roll: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        for (index, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if roll < cumulative {
                return index;
            }
        }
        // Rounding can leave the total a hair under 1.0.
        self.amplitudes.len() - 1
    }

    /// Big-endian display label of basis state `index`.
    pub fn bitstring(&self, index: usize) -> String {
        format!("{index:0width$b}", width = self.num_qubits)
    }
}

/// Whether basis state `index` satisfies every `(qubit, required_bit)` pair.
fn controls_match(index: usize, controls: &[(usize, bool)]) -> bool {
    controls
        .iter()
        .all(|&(q, bit)| (index >> q) & 1 == usize::from(bit))
}
