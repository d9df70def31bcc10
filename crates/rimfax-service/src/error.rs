//! Error types for the service crate.

use rimfax_compile::CompileError;
use thiserror::Error;

/// Errors that abort a whole request.
///
/// Per-output simulation failures are not here: those are isolated into the
/// response's null slots.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// The payload is structurally wrong (not the composer's wire shape).
    #[error("Invalid payload: {0}")]
    Payload(String),

    /// A payload line is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Compilation of the payload failed.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
