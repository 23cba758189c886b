//! Simulation runner.

use crate::error::{SimError, SimResult, StepFailure};
use crate::network::Network;
use crate::schedule::Schedule;
use crate::trace::TraceSink;
use cl_components::FlowState;
use cl_fluids::PropertyProvider;
use tracing::{info, warn};

/// What the loop does when a step fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and return the failure (default).
    #[default]
    Halt,
    /// Restore the pre-step state, record the failure and go on with the next step.
    SkipStep,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of steps
    pub steps: usize,
    pub on_failure: FailurePolicy,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            steps: 50,
            on_failure: FailurePolicy::Halt,
        }
    }
}

/// Outcome of a run that was not halted.
#[derive(Clone, Debug, PartialEq)]
pub struct SimReport {
    pub completed_steps: usize,
    /// Flow leaving the last element of the last completed step
    pub final_state: FlowState,
    /// Skipped steps, in order
    pub failures: Vec<StepFailure>,
}

/// Thread `inlet` through the network `opts.steps` times.
///
/// The outlet of the last element becomes the inlet of the first on the next step.
/// Each step runs against a snapshot of the network; a failed step leaves the network
/// and the carried flow exactly as they were before it.
pub fn run_sim(
    network: &mut Network,
    fluid: &dyn PropertyProvider,
    inlet: FlowState,
    schedules: &[Schedule],
    opts: &SimOptions,
    sink: &mut dyn TraceSink,
) -> SimResult<SimReport> {
    if opts.steps == 0 {
        return Err(SimError::InvalidArg {
            what: "steps must be positive",
        });
    }
    for schedule in schedules {
        schedule.check(network)?;
    }

    info!(
        steps = opts.steps,
        elements = network.len(),
        fluid = fluid.name(),
        "simulation start"
    );

    let mut state = inlet;
    let mut completed_steps = 0;
    let mut failures = Vec::new();

    for step in 0..opts.steps {
        let snapshot = network.clone();
        for schedule in schedules {
            schedule.apply(network, step)?;
        }

        match network.step(fluid, step, state, sink) {
            Ok(out) => {
                state = out;
                completed_steps += 1;
            }
            Err(failure) => {
                *network = snapshot;
                warn!(%failure, "step failed");
                match opts.on_failure {
                    FailurePolicy::Halt => return Err(SimError::StepFailed(Box::new(failure))),
                    FailurePolicy::SkipStep => failures.push(failure),
                }
            }
        }
    }

    info!(
        completed_steps,
        failed_steps = failures.len(),
        "simulation finished"
    );
    Ok(SimReport {
        completed_steps,
        final_state: state,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.steps, 50);
        assert_eq!(opts.on_failure, FailurePolicy::Halt);
    }
}
