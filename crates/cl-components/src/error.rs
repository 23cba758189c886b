//! Error types for component operations.

use cl_core::FailureKind;
use cl_fluids::FluidError;
use cl_solver::SolverError;
use thiserror::Error;

/// Errors that can occur during an element update.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Element not wired: {what}")]
    NotWired { what: &'static str },

    #[error("Pressure drop of {drop} Pa exceeds inlet pressure {p_in} Pa")]
    NonPositivePressure { p_in: f64, drop: f64 },

    #[error("Quality {quality} is neither liquid, gas nor unspecified")]
    UnhandledRegime { quality: f64 },

    #[error("Unspecified quality resolved to phase '{phase}'")]
    UnresolvedPhase { phase: String },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ComponentError::InvalidArg { .. } | ComponentError::NotWired { .. } => {
                FailureKind::Configuration
            }
            ComponentError::NonPhysical { .. } | ComponentError::NonPositivePressure { .. } => {
                FailureKind::PhysicalRange
            }
            ComponentError::UnhandledRegime { .. } | ComponentError::UnresolvedPhase { .. } => {
                FailureKind::UnhandledRegime
            }
            ComponentError::Fluid(e) => e.kind(),
            ComponentError::Solver(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn kinds_follow_source() {
        assert_eq!(
            ComponentError::UnhandledRegime { quality: 0.5 }.kind(),
            FailureKind::UnhandledRegime
        );
        let solver = ComponentError::Solver(SolverError::ConvergenceFailed {
            solver: "colebrook-white",
            iterations: 1000,
            last: 0.02,
        });
        assert_eq!(solver.kind(), FailureKind::Convergence);
    }
}
