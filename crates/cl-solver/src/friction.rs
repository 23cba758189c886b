//! Darcy friction factor from the Colebrook-White correlation.
//!
//! The implicit equation
//!
//! ```text
//! 1/sqrt(fd) = -2 log10( k/(3.71 d) + 2.51/(Re sqrt(fd)) )
//! ```
//!
//! is solved by plain fixed-point substitution. The correlation is applied for any
//! positive Reynolds number; below ~2300 the flow is laminar and the result is only
//! an approximation.

use crate::error::{SolverError, SolverResult};
use cl_core::numeric::relative_change;
use tracing::{debug, trace};

const LAMINAR_LIMIT: f64 = 2300.0;

/// Fixed-point iteration settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColebrookConfig {
    /// Initial friction factor guess
    pub seed: f64,
    /// Relative change between iterates that counts as converged
    pub rel_tol: f64,
    /// Iteration cap
    pub max_iterations: usize,
}

impl Default for ColebrookConfig {
    fn default() -> Self {
        Self {
            seed: 0.05,
            rel_tol: 1e-9,
            max_iterations: 1000,
        }
    }
}

/// Converged friction factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrictionSolution {
    pub factor: f64,
    pub iterations: usize,
}

fn colebrook_map(fd: f64, rel_roughness_term: f64, reynolds: f64) -> f64 {
    let rhs = -2.0 * (2.51 / (reynolds * fd.sqrt()) + rel_roughness_term).log10();
    rhs.powi(-2)
}

fn check_inputs(roughness: f64, diameter: f64, reynolds: f64) -> SolverResult<()> {
    if !roughness.is_finite() || roughness < 0.0 {
        return Err(SolverError::OutOfRange {
            what: "roughness",
            value: roughness,
        });
    }
    if !diameter.is_finite() || diameter <= 0.0 {
        return Err(SolverError::OutOfRange {
            what: "diameter",
            value: diameter,
        });
    }
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(SolverError::OutOfRange {
            what: "Reynolds number",
            value: reynolds,
        });
    }
    Ok(())
}

/// Relative fixed-point residual `|g(fd) - fd| / fd` of the Colebrook-White map.
///
/// Zero for an exact solution. Inputs in SI units (m, m, -).
pub fn colebrook_residual(fd: f64, roughness: f64, diameter: f64, reynolds: f64) -> f64 {
    let next = colebrook_map(fd, roughness / (3.71 * diameter), reynolds);
    (next - fd).abs() / fd
}

/// Solve Colebrook-White for the Darcy friction factor.
///
/// `roughness` and `diameter` in meters. Stops when the relative change between two
/// iterates falls below `config.rel_tol`; running out of iterations is an error.
pub fn colebrook_white(
    roughness: f64,
    diameter: f64,
    reynolds: f64,
    config: &ColebrookConfig,
) -> SolverResult<FrictionSolution> {
    check_inputs(roughness, diameter, reynolds)?;
    if reynolds < LAMINAR_LIMIT {
        debug!(reynolds, "Colebrook-White applied to laminar Reynolds number");
    }

    let rr = roughness / (3.71 * diameter);
    let mut fd = config.seed;
    for iter in 1..=config.max_iterations {
        let next = colebrook_map(fd, rr, reynolds);
        if !next.is_finite() || next <= 0.0 {
            return Err(SolverError::OutOfRange {
                what: "friction factor",
                value: next,
            });
        }
        if relative_change(fd, next) < config.rel_tol {
            trace!(iterations = iter, factor = next, "Colebrook-White converged");
            return Ok(FrictionSolution {
                factor: next,
                iterations: iter,
            });
        }
        fd = next;
    }

    Err(SolverError::ConvergenceFailed {
        solver: "colebrook-white",
        iterations: config.max_iterations,
        last: fd,
    })
}
