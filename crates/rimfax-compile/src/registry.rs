//! Request-scoped custom gate registry.
//!
//! Intermediate payload lines compile into reusable gate bodies. Each body is
//! assigned a sequential `cg<k>` identifier in definition order, matching the
//! references the composer writes into later timelines. The registry lives for
//! exactly one request; nothing is shared across payloads.

use rimfax_ir::{Circuit, Instruction, SubCircuit};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{CompileError, CompileResult};

/// Custom gate definitions for one compilation session.
#[derive(Debug, Default)]
pub struct CustomGateRegistry {
    gates: FxHashMap<String, SubCircuit>,
    next_id: usize,
}

impl CustomGateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled definition body, returning its `cg<k>` identifier.
    ///
    /// Custom bodies are unitary: measurement and initialization steps have
    /// no meaning inside a reusable gate and are dropped here.
    pub fn define(&mut self, body: Circuit) -> String {
        self.next_id += 1;
        let name = format!("cg{}", self.next_id);
        let instructions: Vec<Instruction> = body
            .instructions()
            .iter()
            .filter(|inst| inst.is_operation())
            .cloned()
            .collect();
        debug!(
            name = %name,
            num_qubits = body.num_qubits(),
            steps = instructions.len(),
            "registered custom gate"
        );
        self.gates.insert(
            name.clone(),
            SubCircuit {
                name: name.clone(),
                num_qubits: body.num_qubits(),
                instructions,
            },
        );
        name
    }

    /// Look up a definition by its `cg<k>` identifier.
    pub fn resolve(&self, id: &str) -> CompileResult<&SubCircuit> {
        self.gates
            .get(id)
            .ok_or_else(|| CompileError::UnknownCustomGate(id.to_owned()))
    }

    /// Number of registered gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rimfax_ir::{ClbitId, Composite, QubitId, SlotOp, StandardGate};

    fn x_circuit(n: usize) -> Circuit {
        let mut circuit = Circuit::new(n);
        let mut op = Composite::new();
        op.push(SlotOp::Gate(StandardGate::X));
        circuit
            .push(Instruction::operation(op, [QubitId(0)]))
            .unwrap();
        circuit
    }

    #[test]
    fn test_sequential_identifiers() {
        let mut registry = CustomGateRegistry::new();
        assert_eq!(registry.define(x_circuit(1)), "cg1");
        assert_eq!(registry.define(x_circuit(2)), "cg2");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("cg2").unwrap().num_qubits, 2);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let registry = CustomGateRegistry::new();
        assert!(matches!(
            registry.resolve("cg1"),
            Err(CompileError::UnknownCustomGate(_))
        ));
    }

    #[test]
    fn test_measurements_dropped_from_bodies() {
        let mut circuit = x_circuit(1);
        circuit
            .push(Instruction::measure(QubitId(0), ClbitId(0)))
            .unwrap();
        let mut registry = CustomGateRegistry::new();
        let id = registry.define(circuit);
        let sub = registry.resolve(&id).unwrap();
        assert_eq!(sub.instructions.len(), 1);
        assert!(sub.instructions[0].is_operation());
    }
}
