//! Simulator trait.
//!
//! The [`Simulator`] trait defines the three outputs a backend can produce
//! from a compiled circuit:
//!
//! ```text
//!   run_counts() ──→ sampled measurement outcomes
//!   run_statevector() ──→ the final amplitudes, measurements ignored
//!   run_unitary() ──→ the unitary of the gate sequence
//! ```
//!
//! ## Design principles
//!
//! - **Async-native**: all execution methods are async, so slow backends can
//!   be awaited under a timeout without blocking the service.
//! - **Thread-safe**: `Send + Sync` bound enables shared ownership.
//! - **Independent outputs**: each method stands alone; a backend that cannot
//!   produce one output returns [`SimError::Unsupported`] for it without
//!   affecting the others.
//!
//! ## Method table
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `max_qubits()` | sync | yes | `usize` |
//! | `run_counts()` | async | yes | `SimResult<Counts>` |
//! | `run_statevector()` | async | yes | `SimResult<AmplitudeVector>` |
//! | `run_unitary()` | async | yes | `SimResult<UnitaryMatrix>` |

use async_trait::async_trait;

use rimfax_ir::Circuit;

use crate::error::SimResult;
use crate::result::{AmplitudeVector, Counts, UnitaryMatrix};

/// Trait for circuit simulators.
///
/// # Contract
///
/// - `name()` and `max_qubits()` MUST be synchronous and infallible.
/// - `run_counts()` MUST reject a shot count of zero. A circuit without
///   measurement instructions samples the full register from its final
///   state, as if every qubit were measured.
/// - `run_statevector()` MUST ignore measurement instructions; the vector is
///   the pre-measurement state.
/// - `run_unitary()` MUST cover the gate sequence only: initial-state
///   injection and measurements are excluded.
/// - Bitstrings in all outputs are big-endian display order (qubit 0
///   rightmost), consistent across the three methods.
#[async_trait]
pub trait Simulator: Send + Sync {
    /// Get the name of this simulator.
    fn name(&self) -> &str;

    /// Largest register this simulator accepts.
    fn max_qubits(&self) -> usize;

    /// Execute the circuit `shots` times and return sampled counts.
    async fn run_counts(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts>;

    /// Compute the final statevector of the circuit.
    async fn run_statevector(&self, circuit: &Circuit) -> SimResult<AmplitudeVector>;

    /// Compute the unitary of the circuit's gate sequence.
    async fn run_unitary(&self, circuit: &Circuit) -> SimResult<UnitaryMatrix>;
}
