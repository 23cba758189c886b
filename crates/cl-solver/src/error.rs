//! Error types for solver operations.

use cl_core::FailureKind;
use cl_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur inside the scalar solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("{solver} did not converge after {iterations} iterations (last value {last})")]
    ConvergenceFailed {
        solver: &'static str,
        iterations: usize,
        last: f64,
    },

    #[error(
        "Root not bracketed in [{low}, {high}] K (volume residuals {f_low:.3e}, {f_high:.3e} m³)"
    )]
    NotBracketed {
        low: f64,
        high: f64,
        f_low: f64,
        f_high: f64,
    },

    #[error("Out of range: {what} = {value}")]
    OutOfRange { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SolverError::ConvergenceFailed { .. } | SolverError::NotBracketed { .. } => {
                FailureKind::Convergence
            }
            SolverError::OutOfRange { .. } => FailureKind::PhysicalRange,
            SolverError::InvalidArg { .. } => FailureKind::Configuration,
            SolverError::Fluid(e) => e.kind(),
        }
    }
}
