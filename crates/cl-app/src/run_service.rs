//! Run execution and persistence service.

use crate::compile::{CompiledRun, compile_project};
use crate::error::AppResult;
use crate::project_service;
use cl_components::FlowState;
use cl_project::schema::OnFailureDef;
use cl_results::{
    FailureRecord, FlowRecord, RunManifest, RunStatus, RunStore, TankRecord, TraceRecord,
};
use cl_sim::{
    FailurePolicy, SimError, StepFailure, TankState, TraceRecorder, TraceSample, run_sim,
};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Overrides and persistence switches for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Replaces `simulation.steps`
    pub steps: Option<usize>,
    /// Replaces `simulation.on_failure`
    pub on_failure: Option<FailurePolicy>,
    pub save: bool,
    /// Reuse a stored run with the same id instead of executing again
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: None,
            on_failure: None,
            save: true,
            use_cache: false,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub records: Vec<TraceRecord>,
    pub loaded_from_cache: bool,
    pub saved: bool,
    pub elapsed_s: f64,
}

impl RunResponse {
    pub fn halted(&self) -> bool {
        self.manifest.status == RunStatus::Halted
    }
}

/// Execute the project (or load a cached run) and persist the result.
///
/// A step failure under the halt policy is not an error here: the partial trace and
/// the failure are stored and returned with `RunStatus::Halted`.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();
    let options = &request.options;

    let mut project = project_service::load_project(request.project_path)?;
    if let Some(steps) = options.steps {
        project.simulation.steps = steps;
    }
    if let Some(policy) = options.on_failure {
        project.simulation.on_failure = match policy {
            FailurePolicy::Halt => OnFailureDef::Halt,
            FailurePolicy::SkipStep => OnFailureDef::Skip,
        };
    }
    let mut compiled = compile_project(&project)?;
    let run_id =
        cl_results::compute_run_id(&project, compiled.options.steps, &options.solver_version);

    let store = if options.save || options.use_cache {
        Some(RunStore::for_project(request.project_path)?)
    } else {
        None
    };

    if options.use_cache
        && let Some(store) = &store
        && store.has_run(&run_id)
    {
        info!(%run_id, "loading cached run");
        let manifest = store.load_manifest(&run_id)?;
        let records = store.load_trace(&run_id)?;
        return Ok(RunResponse {
            run_id,
            manifest,
            records,
            loaded_from_cache: true,
            saved: true,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }

    let (manifest, records) = execute(&project.name, &mut compiled, &run_id, options)?;

    let saved = match &store {
        Some(store) if options.save => {
            store.save_run(&manifest, &records)?;
            info!(%run_id, dir = %store.root_dir().display(), "run saved");
            true
        }
        _ => false,
    };

    Ok(RunResponse {
        run_id,
        manifest,
        records,
        loaded_from_cache: false,
        saved,
        elapsed_s: started.elapsed().as_secs_f64(),
    })
}

fn execute(
    project_name: &str,
    compiled: &mut CompiledRun,
    run_id: &str,
    options: &RunOptions,
) -> AppResult<(RunManifest, Vec<TraceRecord>)> {
    let mut recorder = TraceRecorder::new();
    let outcome = run_sim(
        &mut compiled.network,
        compiled.fluid.as_ref(),
        compiled.inlet,
        &compiled.schedules,
        &compiled.options,
        &mut recorder,
    );

    let (status, completed_steps, failures) = match outcome {
        Ok(report) => (RunStatus::Completed, report.completed_steps, report.failures),
        Err(SimError::StepFailed(failure)) => {
            warn!(%failure, "run halted");
            (RunStatus::Halted, failure.step, vec![*failure])
        }
        Err(e) => return Err(e.into()),
    };

    let records = recorder
        .into_samples()
        .iter()
        .map(|sample| trace_record(compiled, sample))
        .collect();
    let failures = failures
        .iter()
        .map(|failure| failure_record(compiled, failure))
        .collect();

    let manifest = RunManifest {
        run_id: run_id.to_string(),
        project_name: project_name.to_string(),
        timestamp: cl_results::timestamp_now(),
        steps_requested: compiled.options.steps,
        completed_steps,
        status,
        backend: compiled.fluid.name().to_string(),
        solver_version: options.solver_version.clone(),
        failures,
    };
    Ok((manifest, records))
}

fn flow_record(flow: &FlowState) -> FlowRecord {
    let (mass_flow_kg_s, pressure_pa, temperature_k, quality) = flow.as_tuple();
    FlowRecord {
        mass_flow_kg_s,
        pressure_pa,
        temperature_k,
        quality,
    }
}

fn tank_record(tank: &TankState) -> TankRecord {
    TankRecord {
        mass_kg: tank.mass.value,
        internal_energy_j: tank.internal_energy.value,
        temperature_k: tank.temperature.value,
        pressure_pa: tank.pressure.value,
        quality: tank.quality,
    }
}

fn project_id(compiled: &CompiledRun, sample_id: cl_core::ElementId, fallback: &str) -> String {
    compiled
        .element_id(sample_id)
        .unwrap_or(fallback)
        .to_string()
}

fn trace_record(compiled: &CompiledRun, sample: &TraceSample) -> TraceRecord {
    TraceRecord {
        step: sample.step,
        element_id: project_id(compiled, sample.element, &sample.name),
        element_kind: sample.kind.label().to_string(),
        inlet: flow_record(&sample.inlet),
        outlet: flow_record(&sample.outlet),
        tank: sample.tank.as_ref().map(tank_record),
    }
}

fn failure_record(compiled: &CompiledRun, failure: &StepFailure) -> FailureRecord {
    FailureRecord {
        step: failure.step,
        element_id: project_id(compiled, failure.element, &failure.element_name),
        element_name: failure.element_name.clone(),
        kind: failure.kind,
        inlet: flow_record(&failure.inlet),
        message: failure.message.clone(),
    }
}

/// Stored runs of a project, most recent first.
pub fn list_runs(project_path: &Path) -> AppResult<Vec<RunManifest>> {
    let project = project_service::load_project(project_path)?;
    let store = RunStore::for_project(project_path)?;
    Ok(store.list_runs(Some(&project.name))?)
}

pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<TraceRecord>)> {
    let store = RunStore::for_project(project_path)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_trace(run_id)?;
    Ok((manifest, records))
}
