//! Rimfax Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing compiled
//! quantum circuits in Rimfax. It forms the foundation of the compilation
//! stack: the compiler lowers per-qubit gate timelines into these types, and
//! simulator backends consume them.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered sequence of instructions over an explicit
//! register length. Each time-slice of the source timeline compiles into one
//! [`Instruction::Operation`]: a [`Composite`] of slot operations (plain
//! gates, powered Pauli gates, custom sub-circuits, a swap pair) applied at
//! explicit qubit positions, optionally wrapped in a multi-bit
//! [`ControlState`].
//!
//! # Core Components
//!
//! - **Identifiers**: [`QubitId`], [`ClbitId`]
//! - **States**: [`Ket`] — the six symbolic single-qubit initial states
//! - **Gates**: [`StandardGate`], [`PauliAxis`] + [`powered_matrix`]
//! - **Steps**: [`SlotOp`], [`Composite`], [`ControlState`], [`SubCircuit`]
//! - **Circuit**: [`Circuit`] with initial-state injection and endianness
//!   reversal
//!
//! # Example
//!
//! ```rust
//! use rimfax_ir::{Circuit, Composite, Instruction, Ket, QubitId, SlotOp, StandardGate};
//!
//! let mut circuit = Circuit::new(2);
//! let mut step = Composite::new();
//! step.push(SlotOp::Gate(StandardGate::X));
//! circuit.push(Instruction::operation(step, [QubitId(0)])).unwrap();
//! circuit.initialize(vec![Ket::Zero, Ket::Zero]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.instructions()[0].is_initialize());
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod ket;
pub mod op;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Matrix2, PauliAxis, StandardGate, powered_matrix};
pub use ket::Ket;
pub use op::{Composite, ControlState, Instruction, SlotOp, SubCircuit};
pub use qubit::{ClbitId, QubitId};
