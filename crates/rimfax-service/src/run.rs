//! Request execution.
//!
//! `execute` drives one request end to end: parse the payload, compile the
//! session, then produce each requested output. Compilation failures abort
//! the request; simulation failures are isolated per output, logged, and
//! rendered as `null` so one slow or unsupported output never poisons the
//! rest of the response.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{instrument, warn};

use rimfax_compile::{
    CompileError, CompiledRequest, Template, compile_session, filter_amplitudes, filter_counts,
};
use rimfax_hal::{AmplitudeVector, Counts, Output, Simulator, SimulatorRegistry, UnitaryMatrix};

use crate::error::ServiceResult;
use crate::request::{RunOptions, parse_payload};
use crate::response::{SimulationResponse, render_amplitudes, render_counts, render_unitary};

/// Wall-clock budget per simulator invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Execute a payload with the default per-invocation timeout.
pub async fn execute(
    payload: &str,
    registry: &SimulatorRegistry,
) -> ServiceResult<SimulationResponse> {
    execute_with_timeout(payload, registry, DEFAULT_TIMEOUT).await
}

/// Execute a payload, bounding every simulator invocation by `budget`.
#[instrument(skip_all)]
pub async fn execute_with_timeout(
    payload: &str,
    registry: &SimulatorRegistry,
    budget: Duration,
) -> ServiceResult<SimulationResponse> {
    let lines = parse_payload(payload)?;
    let Some(circuit_line) = lines.last() else {
        return Err(CompileError::EmptyTemplate.into());
    };
    let options = circuit_line.options();

    let templates: Vec<Template> = lines.iter().map(|line| line.template.clone()).collect();
    let compiled = compile_session(&templates, options.big_endian)?;

    let backend = registry.create(&options.backend);
    if let Err(error) = &backend {
        warn!(backend = %options.backend, %error, "backend unavailable");
    }

    let counts: Output<Counts> = if options.include_counts {
        slot("counts", counts_slot(&backend, &compiled, &options, budget).await)
    } else {
        Output::NotRequested
    };
    let amplitudes: Output<AmplitudeVector> = if options.include_amps {
        slot("amplitudes", amplitudes_slot(&backend, &compiled, budget).await)
    } else {
        Output::NotRequested
    };
    let unitary: Output<UnitaryMatrix> = if options.include_unitary {
        slot("unitary", unitary_slot(&backend, &compiled, budget).await)
    } else {
        Output::NotRequested
    };

    let (amp_entries, probabilities) = match amplitudes.ready() {
        Some(amplitudes) => {
            let (entries, probabilities) = render_amplitudes(amplitudes);
            (Some(entries), Some(probabilities))
        }
        None => (None, None),
    };
    let (unitary_strings, unitary_squares) = match unitary.ready() {
        Some(unitary) => {
            let (strings, squares) = render_unitary(unitary);
            (Some(strings), Some(squares))
        }
        None => (None, None),
    };

    Ok(SimulationResponse {
        counts: counts.ready().map(render_counts),
        amplitudes: amp_entries,
        probabilites: probabilities,
        unitary: unitary_strings,
        unitary_squares,
    })
}

/// Fold one output's result into its slot, logging failures.
fn slot<T>(name: &str, result: Result<T, String>) -> Output<T> {
    match result {
        Ok(value) => Output::Ready(value),
        Err(error) => {
            warn!(output = name, %error, "output failed");
            Output::Failed(error)
        }
    }
}

type Backend = Result<Box<dyn Simulator>, rimfax_hal::SimError>;

fn backend_ref(backend: &Backend) -> Result<&dyn Simulator, String> {
    match backend {
        Ok(sim) => Ok(sim.as_ref()),
        Err(error) => Err(error.to_string()),
    }
}

async fn counts_slot(
    backend: &Backend,
    compiled: &CompiledRequest,
    options: &RunOptions,
    budget: Duration,
) -> Result<Counts, String> {
    let sim = backend_ref(backend)?;
    let mut counts = timeout(budget, sim.run_counts(&compiled.circuit, options.shots))
        .await
        .map_err(|_| "simulation timed out".to_owned())?
        .map_err(|e| e.to_string())?;
    filter_counts(&mut counts, &compiled.postselections).map_err(|e| e.to_string())?;
    Ok(counts)
}

async fn amplitudes_slot(
    backend: &Backend,
    compiled: &CompiledRequest,
    budget: Duration,
) -> Result<AmplitudeVector, String> {
    let sim = backend_ref(backend)?;
    let mut amplitudes = timeout(budget, sim.run_statevector(&compiled.circuit))
        .await
        .map_err(|_| "simulation timed out".to_owned())?
        .map_err(|e| e.to_string())?;
    filter_amplitudes(&mut amplitudes, &compiled.postselections).map_err(|e| e.to_string())?;
    Ok(amplitudes)
}

async fn unitary_slot(
    backend: &Backend,
    compiled: &CompiledRequest,
    budget: Duration,
) -> Result<UnitaryMatrix, String> {
    let sim = backend_ref(backend)?;
    timeout(budget, sim.run_unitary(&compiled.circuit))
        .await
        .map_err(|_| "simulation timed out".to_owned())?
        .map_err(|e| e.to_string())
}
