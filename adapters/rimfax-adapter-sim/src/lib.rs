//! Statevector simulator backend for Rimfax.
//!
//! Implements the [`rimfax_hal::Simulator`] trait with an exact in-memory
//! statevector. Registration with a [`rimfax_hal::SimulatorRegistry`]:
//!
//! ```rust
//! use rimfax_adapter_sim::StatevectorSimulator;
//! use rimfax_hal::SimulatorRegistry;
//!
//! let mut registry = SimulatorRegistry::new();
//! registry.register("statevector", || Box::new(StatevectorSimulator::new()));
//! assert!(registry.has_backend("statevector"));
//! ```

pub mod simulator;
pub mod statevector;

pub use simulator::StatevectorSimulator;
pub use statevector::Statevector;
