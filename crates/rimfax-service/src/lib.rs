//! Rimfax Simulation Service
//!
//! The request-handling layer: newline-delimited JSON payloads in,
//! fixed-shape simulation responses out.
//!
//! - [`request`]: payload parsing into compile templates and run options
//! - [`run`]: end-to-end execution against a [`rimfax_hal::SimulatorRegistry`]
//! - [`response`]: rendering counts, amplitudes and unitaries for the wire
//!
//! The HTTP surface is deliberately not here; embedders own their framework
//! and call [`run::execute`] with the raw request body.

pub mod error;
pub mod request;
pub mod response;
pub mod run;

pub use error::{ServiceError, ServiceResult};
pub use request::{ParsedLine, RunOptions, parse_payload};
pub use response::{AmplitudeEntry, CountsEntry, SimulationResponse};
pub use run::{DEFAULT_TIMEOUT, execute, execute_with_timeout};
