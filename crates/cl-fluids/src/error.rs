//! Fluid property errors.

use cl_core::{ClError, FailureKind};
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Input outside the provider's valid range.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Refrigerant or operation not available in the backend.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Convergence failure inside the provider (e.g., T from h,P).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl FluidError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FluidError::NotSupported { .. } => FailureKind::Configuration,
            FluidError::ConvergenceFailed { .. } => FailureKind::Convergence,
            FluidError::NonPhysical { .. }
            | FluidError::OutOfRange { .. }
            | FluidError::InvalidArg { .. }
            | FluidError::Backend { .. } => FailureKind::PhysicalRange,
        }
    }
}

impl From<ClError> for FluidError {
    fn from(err: ClError) -> Self {
        match err {
            ClError::NonFinite { what, value } => FluidError::OutOfRange { what, value },
            ClError::NotPositive { what, value } => FluidError::OutOfRange { what, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = FluidError::Backend {
            message: "CoolProp failed".into(),
        };
        assert!(err.to_string().contains("CoolProp"));
    }

    #[test]
    fn error_kinds() {
        assert_eq!(
            FluidError::OutOfRange {
                what: "quality",
                value: 1.5
            }
            .kind(),
            FailureKind::PhysicalRange
        );
        assert_eq!(
            FluidError::NotSupported { what: "mixtures" }.kind(),
            FailureKind::Configuration
        );
    }

    #[test]
    fn core_error_converts() {
        let err: FluidError = ClError::NonFinite {
            what: "temperature",
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }
}
