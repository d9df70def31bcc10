//! Rimfax Hardware Abstraction Layer
//!
//! This crate defines the seam between the compiler and the simulator
//! backends that execute compiled circuits:
//!
//! - [`Simulator`]: the async execution trait with one method per output
//!   (counts, statevector, unitary)
//! - [`SimulatorRegistry`]: name-to-backend resolution for request routing
//! - [`Counts`], [`AmplitudeVector`], [`UnitaryMatrix`]: the result types
//! - [`Output`]: per-output slot state, isolating failures between outputs
//!
//! Backends live in their own adapter crates and only depend on this one.

pub mod backend;
pub mod error;
pub mod registry;
pub mod result;

pub use backend::Simulator;
pub use error::{SimError, SimResult};
pub use registry::SimulatorRegistry;
pub use result::{AmplitudeVector, Counts, Output, UnitaryMatrix};
