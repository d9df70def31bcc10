//! Error types for the compiler crate.

use rimfax_ir::IrError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The payload carries no circuit template at all.
    #[error("Template defines no qubits")]
    EmptyTemplate,

    /// Declared register length disagrees with the number of qubit records.
    #[error("Template declares {declared} qubits but defines {got}")]
    QubitCountMismatch {
        /// The `length` field of the template.
        declared: usize,
        /// Number of per-qubit timelines actually present.
        got: usize,
    },

    /// A gate stamp that no codec table knows.
    #[error("Unknown gate label '{0}'")]
    UnknownLabel(String),

    /// A known stamp with a broken parameter section.
    #[error("Malformed gate label '{label}': {reason}")]
    MalformedLabel {
        /// The offending stamp.
        label: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A `cg<k>` reference with no matching registry entry.
    #[error("Unknown custom gate '{0}'")]
    UnknownCustomGate(String),

    /// An exponent expression that failed to evaluate.
    #[error("Bad exponent expression '{expr}': {reason}")]
    Expression {
        /// The expression text.
        expr: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Postselection filtered out every state.
    #[error("Postselection is unsatisfiable: every state was filtered out")]
    PostselectionUnsatisfiable,

    /// A lower-level circuit construction error.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;
