//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in simulator operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// No simulator registered under the requested name.
    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),

    /// The circuit exceeds the simulator's register limit.
    #[error("Circuit has {num_qubits} qubits, backend supports at most {max_qubits}")]
    CircuitTooLarge {
        /// Register length of the circuit.
        num_qubits: usize,
        /// The backend's limit.
        max_qubits: usize,
    },

    /// The backend does not implement the requested output.
    #[error("Backend '{backend}' does not support {what}")]
    Unsupported {
        /// Backend name.
        backend: String,
        /// The unsupported output.
        what: String,
    },

    /// Shot count outside the accepted range.
    #[error("Invalid shot count {0}")]
    InvalidShots(u32),

    /// The backend failed while executing.
    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
