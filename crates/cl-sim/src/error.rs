//! Error types for simulation operations.

use cl_components::{ComponentError, FlowState};
use cl_core::{ElementId, FailureKind};
use core::fmt;
use thiserror::Error;

/// A step that could not be completed, with what is needed to reproduce it.
#[derive(Clone, Debug, PartialEq)]
pub struct StepFailure {
    pub step: usize,
    pub element: ElementId,
    pub element_name: String,
    pub kind: FailureKind,
    /// Inbound flow of the failing element
    pub inlet: FlowState,
    pub message: String,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mdot, p, t, q) = self.inlet.as_tuple();
        write!(
            f,
            "step {}: element '{}' ({}) failed [{}]: {} (inlet mdot={} kg/s, p={} Pa, T={} K, quality={})",
            self.step, self.element_name, self.element, self.kind, self.message, mdot, p, t, q
        )
    }
}

/// Errors encountered while building or running a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{0}")]
    StepFailed(Box<StepFailure>),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn configuration(what: impl Into<String>) -> Self {
        SimError::Configuration { what: what.into() }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SimError::Configuration { .. } | SimError::InvalidArg { .. } => {
                FailureKind::Configuration
            }
            SimError::StepFailed(failure) => failure.kind,
            SimError::Component(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_reports_element_kind_and_inlet() {
        let failure = StepFailure {
            step: 3,
            element: ElementId::from_index(1).unwrap(),
            element_name: "hx".into(),
            kind: FailureKind::UnhandledRegime,
            inlet: FlowState::from_si(0.1, 5e6, 280.0, 0.5),
            message: "Quality 0.5 is neither liquid, gas nor unspecified".into(),
        };
        let text = SimError::StepFailed(Box::new(failure)).to_string();
        assert!(text.contains("step 3"));
        assert!(text.contains("'hx'"));
        assert!(text.contains("unhandled-regime"));
        assert!(text.contains("quality=0.5"));
    }

    #[test]
    fn configuration_kind() {
        assert_eq!(
            SimError::configuration("no pipe").kind(),
            FailureKind::Configuration
        );
    }
}
