//! Rimfax Circuit Compiler
//!
//! Turns composer payloads into executable [`rimfax_ir::Circuit`]s. The
//! pipeline runs in fixed stages:
//!
//! 1. **Label codec** ([`label`]): wire stamps to [`GateLabel`]s, current and
//!    legacy vocabularies.
//! 2. **Gate matrix** ([`matrix`]): ragged per-qubit timelines to a
//!    rectangular, identity-padded matrix.
//! 3. **Segregation** ([`segregate`]): one column's cells bucketed by role.
//! 4. **Step compilation** ([`step`]): buckets to one composite operation
//!    with explicit placement and a merged control condition.
//! 5. **Assembly** ([`assemble`]): all columns to a circuit plus the
//!    postselection map.
//! 6. **Session** ([`session`]): multi-line payloads, custom gate
//!    definitions, initial state, endianness.
//!
//! Postselection filtering of simulation results ([`postselect`]) lives here
//! too: it is the compiler that knows which measurement produced which
//! directive.
//!
//! # Example
//!
//! ```rust
//! use rimfax_compile::session::{QubitSpec, Template, compile_session};
//! use rimfax_ir::Ket;
//!
//! let line = Template {
//!     length: 1,
//!     qubits: vec![QubitSpec {
//!         state: Ket::Zero,
//!         gates: vec!["h".into(), "measurement<!@DELIMITER>2".into()],
//!     }],
//! };
//! let compiled = compile_session(&[line], true).unwrap();
//! assert!(compiled.circuit.has_measurements());
//! ```

pub mod assemble;
pub mod error;
pub mod expr;
pub mod label;
pub mod matrix;
pub mod postselect;
pub mod registry;
pub mod segregate;
pub mod session;
pub mod step;

pub use assemble::{PostselectionMap, assemble};
pub use error::{CompileError, CompileResult};
pub use label::{DELIMITER, GateLabel};
pub use matrix::GateMatrix;
pub use postselect::{filter_amplitudes, filter_counts};
pub use registry::CustomGateRegistry;
pub use segregate::{Segregated, segregate};
pub use session::{CompiledRequest, QubitSpec, Template, compile_session};
pub use step::{CompiledStep, compile_step};
