//! Common constants and helpers for element calculations.

use crate::error::{ComponentError, ComponentResult};
use cl_core::ClError;
use cl_core::numeric::{ensure_finite, ensure_positive};

/// Mass flow below which an element treats the flow as zero (kg/s)
pub const EPSILON_MDOT: f64 = 1e-10;

/// Reynolds number assumed when there is no flow to compute one from
pub const REYNOLDS_SEED: f64 = 1000.0;

/// Fixed number of velocity/Reynolds/friction passes in a pipe update
pub const PIPE_PASSES: usize = 10;

/// Offset added to a saturation pressure to get a single-phase enthalpy query (Pa)
pub const SATURATION_OFFSET_PA: f64 = 100.0;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Ensure a value is strictly positive and finite.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_positive(value, what).map_err(|e| match e {
        ClError::NonFinite { .. } => ComponentError::NonPhysical { what },
        ClError::NotPositive { .. } => ComponentError::InvalidArg { what },
    })
}
