//! Compilation session: a full multi-line payload to one executable circuit.
//!
//! A payload is a sequence of templates. Every template except the last
//! defines a custom gate; the last one is the circuit itself. Custom gate
//! identifiers are assigned in definition order, so `cg1` always refers to
//! the first line of the request that defined it and nothing leaks between
//! requests.

use rimfax_ir::{Circuit, Ket};
use tracing::{debug, instrument};

use crate::assemble::{PostselectionMap, assemble};
use crate::error::{CompileError, CompileResult};
use crate::label::GateLabel;
use crate::matrix::GateMatrix;
use crate::registry::CustomGateRegistry;

/// One qubit's timeline plus its requested initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct QubitSpec {
    /// Initial state of the qubit.
    pub state: Ket,
    /// The gate stamps of the timeline, in step order.
    pub gates: Vec<String>,
}

/// One parsed payload line: a declared register length and its timelines.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Declared register length.
    pub length: usize,
    /// Per-qubit timelines, indexed by qubit.
    pub qubits: Vec<QubitSpec>,
}

/// The compiled output of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRequest {
    /// The executable circuit, initial state injected.
    pub circuit: Circuit,
    /// Postselection directives keyed by qubit index, in the circuit's
    /// final bit ordering.
    pub postselections: PostselectionMap,
}

/// Compile a full payload.
///
/// With `big_endian` set, the finished circuit is bit-reversed and the
/// postselection map remapped with it, so directives keep pointing at the
/// same physical qubit.
#[instrument(skip(lines), fields(lines = lines.len()))]
pub fn compile_session(lines: &[Template], big_endian: bool) -> CompileResult<CompiledRequest> {
    let Some((circuit_line, definitions)) = lines.split_last() else {
        return Err(CompileError::EmptyTemplate);
    };

    let mut registry = CustomGateRegistry::new();
    for definition in definitions {
        let (body, _) = compile_template(definition, &registry)?;
        registry.define(body);
    }

    let (mut circuit, mut postselections) = compile_template(circuit_line, &registry)?;
    let kets: Vec<Ket> = circuit_line.qubits.iter().map(|q| q.state).collect();
    circuit.initialize(kets)?;

    if big_endian {
        let n = circuit.num_qubits();
        circuit.reverse_bits();
        postselections = postselections
            .into_iter()
            .map(|(q, bit)| (n - 1 - q, bit))
            .collect();
    }

    debug!(
        num_qubits = circuit.num_qubits(),
        custom_gates = registry.len(),
        instructions = circuit.len(),
        "compiled session"
    );
    Ok(CompiledRequest {
        circuit,
        postselections,
    })
}

/// Compile one template against the current registry.
fn compile_template(
    template: &Template,
    registry: &CustomGateRegistry,
) -> CompileResult<(Circuit, PostselectionMap)> {
    if template.qubits.is_empty() {
        return Err(CompileError::EmptyTemplate);
    }
    if template.length != template.qubits.len() {
        return Err(CompileError::QubitCountMismatch {
            declared: template.length,
            got: template.qubits.len(),
        });
    }

    let rows: Vec<Vec<GateLabel>> = template
        .qubits
        .iter()
        .map(|q| q.gates.iter().map(|s| GateLabel::decode(s)).collect())
        .collect::<CompileResult<_>>()?;
    let matrix = GateMatrix::build(rows)?;
    assemble(template.length, &matrix, registry)
}
