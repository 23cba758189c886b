//! Scalar iterative solvers used by the loop elements.
//!
//! - Colebrook-White fixed point for the Darcy friction factor
//! - Bisection on temperature for the saturated mixture stored in a tank
//!
//! Both solvers are bounded by an iteration cap and report exhaustion as an error
//! instead of returning a partially converged value.

pub mod equilibrium;
pub mod error;
pub mod friction;

pub use equilibrium::{BisectionConfig, EquilibriumSolution, solve_phase_equilibrium};
pub use error::{SolverError, SolverResult};
pub use friction::{ColebrookConfig, FrictionSolution, colebrook_residual, colebrook_white};
