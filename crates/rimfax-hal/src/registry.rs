//! Simulator registry.
//!
//! The [`SimulatorRegistry`] is the central point for discovering and
//! creating simulator instances by backend name. Requests name their backend
//! as a plain string, so the service resolves it here per request.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::Simulator;
use crate::error::{SimError, SimResult};

/// Factory function type for registered simulators.
type Factory = Box<dyn Fn() -> Box<dyn Simulator> + Send + Sync>;

/// Central registry of simulator backends.
#[derive(Default)]
pub struct SimulatorRegistry {
    factories: FxHashMap<String, Factory>,
}

impl SimulatorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a simulator factory under a backend name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn Simulator> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering simulator backend: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Create a simulator by backend name.
    pub fn create(&self, name: &str) -> SimResult<Box<dyn Simulator>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(SimError::UnknownBackend(name.to_owned())),
        }
    }

    /// List all registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a backend is registered by name.
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
