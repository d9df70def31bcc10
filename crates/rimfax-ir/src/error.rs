//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit position outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Register length of the circuit.
        num_qubits: usize,
    },

    /// Classical bit outside the register.
    #[error("Classical bit {clbit} out of range for a {num_clbits}-bit register")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Classical register length.
        num_clbits: usize,
    },

    /// The same qubit appears twice in one instruction footprint.
    #[error("Duplicate qubit {0} in instruction")]
    DuplicateQubit(QubitId),

    /// Position count does not match the composite's width.
    #[error("Operation spans {expected} qubit positions, got {got}")]
    WidthMismatch {
        /// Width of the composite operation.
        expected: usize,
        /// Number of positions supplied.
        got: usize,
    },

    /// Initial state length does not match the register.
    #[error("Initial state has {got} kets for a {expected}-qubit circuit")]
    InitialStateLength {
        /// Register length.
        expected: usize,
        /// Kets supplied.
        got: usize,
    },

    /// The circuit already carries an initial state.
    #[error("Circuit is already initialized")]
    AlreadyInitialized,
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
