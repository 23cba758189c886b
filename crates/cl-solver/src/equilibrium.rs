//! Temperature and quality of a saturated mixture from stored mass, energy and volume.
//!
//! For a fixed specific internal energy `u = U/m`, the volume the mixture would occupy
//! at saturation temperature `T` is
//!
//! ```text
//! Q(T)      = (u - u_liq(T)) / (u_vap(T) - u_liq(T))
//! Volume(T) = m (1 - Q) / rho_liq(T) + m Q / rho_vap(T)
//! ```
//!
//! `Volume(T)` falls with `T`, so a mixture that would overflow the tank is colder than
//! the probe temperature and the lower bound moves up. The search runs on a fixed
//! bracket around the previous tank temperature.

use crate::error::{SolverError, SolverResult};
use cl_core::units::{Energy, Mass, Pressure, Temperature, Volume, k};
use cl_fluids::PropertyProvider;
use tracing::trace;

/// Slack accepted on the final quality before it is treated as out of range.
const QUALITY_SLACK: f64 = 1e-9;

/// Bisection settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BisectionConfig {
    /// Half width of the bracket around the previous temperature [K]
    pub half_width: f64,
    /// Bracket width at which the search stops [K]
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            half_width: 5.0,
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

/// Equilibrium state of the stored mixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquilibriumSolution {
    pub temperature: Temperature,
    pub quality: f64,
    pub pressure: Pressure,
    pub iterations: usize,
}

struct VolumeResidual<'a> {
    provider: &'a dyn PropertyProvider,
    mass: f64,
    specific_energy: f64,
    volume: f64,
}

impl VolumeResidual<'_> {
    /// Returns `(Volume(T) - V, Q(T))`.
    fn eval(&self, t: f64) -> SolverResult<(f64, f64)> {
        let sat = self.provider.saturation(k(t))?;
        let q = sat.quality_from_u(self.specific_energy);
        let residual = sat.mixture_volume(self.mass, q) - self.volume;
        if !residual.is_finite() {
            return Err(SolverError::OutOfRange {
                what: "mixture volume",
                value: residual,
            });
        }
        Ok((residual, q))
    }
}

/// Find `(T, Q, P)` such that `mass` with total internal energy `internal_energy` fills
/// exactly `volume` at saturation.
///
/// The bracket is `t_prev ± half_width`. When the volume residual has the same sign at
/// both ends the root lies outside it and the search fails with
/// [`SolverError::NotBracketed`].
pub fn solve_phase_equilibrium(
    provider: &dyn PropertyProvider,
    mass: Mass,
    internal_energy: Energy,
    volume: Volume,
    t_prev: Temperature,
    config: &BisectionConfig,
) -> SolverResult<EquilibriumSolution> {
    let m = mass.value;
    if !m.is_finite() || m <= 0.0 {
        return Err(SolverError::OutOfRange {
            what: "stored mass",
            value: m,
        });
    }
    if !volume.value.is_finite() || volume.value <= 0.0 {
        return Err(SolverError::OutOfRange {
            what: "tank volume",
            value: volume.value,
        });
    }
    if !internal_energy.value.is_finite() {
        return Err(SolverError::OutOfRange {
            what: "stored internal energy",
            value: internal_energy.value,
        });
    }

    let residual = VolumeResidual {
        provider,
        mass: m,
        specific_energy: internal_energy.value / m,
        volume: volume.value,
    };

    let mut low = t_prev.value - config.half_width;
    let mut high = t_prev.value + config.half_width;
    let (mut f_low, _) = residual.eval(low)?;
    let (f_high, _) = residual.eval(high)?;
    if f_low * f_high > 0.0 {
        return Err(SolverError::NotBracketed {
            low,
            high,
            f_low,
            f_high,
        });
    }

    let mut iterations = 0;
    while high - low >= config.tolerance {
        if iterations == config.max_iterations {
            return Err(SolverError::ConvergenceFailed {
                solver: "phase-equilibrium bisection",
                iterations,
                last: 0.5 * (low + high),
            });
        }
        iterations += 1;

        let mid = 0.5 * (low + high);
        if mid <= low || mid >= high {
            // Bracket is down to adjacent floats.
            break;
        }
        let (f_mid, _) = residual.eval(mid)?;
        if f_mid * f_low > 0.0 {
            low = mid;
            f_low = f_mid;
        } else {
            high = mid;
        }
    }

    let t = 0.5 * (low + high);
    let (_, q) = residual.eval(t)?;
    if !(-QUALITY_SLACK..=1.0 + QUALITY_SLACK).contains(&q) {
        return Err(SolverError::OutOfRange {
            what: "equilibrium quality",
            value: q,
        });
    }
    let q = q.clamp(0.0, 1.0);
    let pressure = provider.pressure(k(t), q)?;
    trace!(iterations, temperature = t, quality = q, "phase equilibrium solved");

    Ok(EquilibriumSolution {
        temperature: k(t),
        quality: q,
        pressure,
        iterations,
    })
}
