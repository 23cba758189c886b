//! The property-provider interface.

use crate::error::{FluidError, FluidResult};
use crate::phase::{Phase, QUALITY_UNSPECIFIED};
use crate::refrigerant::Refrigerant;
use cl_core::numeric::ensure_finite;
use cl_core::units::{Density, DynVisc, Pressure, SpecEnergy, Temperature};

/// Saturated liquid and vapor properties at one temperature.
///
/// This is what the phase-equilibrium bisection needs on every iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturationProps {
    /// Saturated liquid specific internal energy [J/kg]
    pub u_liq: SpecEnergy,
    /// Saturated vapor specific internal energy [J/kg]
    pub u_vap: SpecEnergy,
    /// Saturated liquid density [kg/m³]
    pub rho_liq: f64,
    /// Saturated vapor density [kg/m³]
    pub rho_vap: f64,
}

impl SaturationProps {
    /// Vapor mass fraction implied by a specific internal energy.
    pub fn quality_from_u(&self, u: SpecEnergy) -> f64 {
        (u - self.u_liq) / (self.u_vap - self.u_liq)
    }

    /// Volume occupied by `mass` at quality `q` [m³].
    pub fn mixture_volume(&self, mass: f64, q: f64) -> f64 {
        mass * ((1.0 - q) / self.rho_liq + q / self.rho_vap)
    }
}

/// Thermodynamic property lookups for a single refrigerant.
///
/// Saturation queries take `(T, Q)` with `Q` in [0, 1]. Single-phase queries take
/// `(T, P)` or `(h, P)`. All values are SI.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can be shared
/// across the elements of a network.
pub trait PropertyProvider: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Refrigerant this provider evaluates.
    fn refrigerant(&self) -> Refrigerant;

    /// Density on the saturation curve.
    fn density(&self, t: Temperature, q: f64) -> FluidResult<Density>;

    /// Specific internal energy on the saturation curve [J/kg].
    fn internal_energy(&self, t: Temperature, q: f64) -> FluidResult<SpecEnergy>;

    /// Saturation pressure at `(T, Q)`.
    fn pressure(&self, t: Temperature, q: f64) -> FluidResult<Pressure>;

    /// Dynamic viscosity on the saturation curve.
    fn viscosity(&self, t: Temperature, q: f64) -> FluidResult<DynVisc>;

    /// Single-phase specific enthalpy [J/kg].
    fn enthalpy(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEnergy>;

    /// Temperature from specific enthalpy and pressure.
    fn temperature_from_hp(&self, h: SpecEnergy, p: Pressure) -> FluidResult<Temperature>;

    /// Phase of a (P, T) state.
    ///
    /// Below the critical temperature and pressure, a pressure above saturation is
    /// liquid and one below is gas. Everything else is reported as `Phase::Other`,
    /// with CoolProp's names for the supercritical regions.
    fn phase(&self, p: Pressure, t: Temperature) -> FluidResult<Phase> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        let r = self.refrigerant();
        let above_tc = t.value >= r.critical_temperature();
        let above_pc = p.value >= r.critical_pressure();
        match (above_tc, above_pc) {
            (true, true) => return Ok(Phase::Other("supercritical".into())),
            (true, false) => return Ok(Phase::Other("supercritical_gas".into())),
            (false, true) => return Ok(Phase::Other("supercritical_liquid".into())),
            (false, false) => {}
        }
        let p_sat = self.pressure(t, 0.0)?.value;
        if p.value > p_sat {
            Ok(Phase::Liquid)
        } else if p.value < p_sat {
            Ok(Phase::Gas)
        } else {
            Ok(Phase::Other("twophase".into()))
        }
    }

    /// Vapor quality of a (T, P) state.
    ///
    /// A (T, P) pair cannot pin down a two-phase mixture, so single-phase and
    /// supercritical states report `QUALITY_UNSPECIFIED`.
    fn quality(&self, t: Temperature, p: Pressure) -> FluidResult<f64> {
        match self.phase(p, t)? {
            Phase::Other(name) if name == "twophase" => Err(FluidError::OutOfRange {
                what: "quality is undefined on the saturation line",
                value: p.value,
            }),
            _ => Ok(QUALITY_UNSPECIFIED),
        }
    }

    /// Saturated liquid and vapor properties at `T`.
    fn saturation(&self, t: Temperature) -> FluidResult<SaturationProps> {
        Ok(SaturationProps {
            u_liq: self.internal_energy(t, 0.0)?,
            u_vap: self.internal_energy(t, 1.0)?,
            rho_liq: self.density(t, 0.0)?.value,
            rho_vap: self.density(t, 1.0)?.value,
        })
    }
}

/// Validation helpers for provider inputs and outputs.
pub mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure a saturation quality lies in [0, 1].
    pub fn validate_quality(q: f64) -> FluidResult<()> {
        if !q.is_finite() || !(0.0..=1.0).contains(&q) {
            return Err(FluidError::OutOfRange {
                what: "saturation quality",
                value: q,
            });
        }
        Ok(())
    }

    /// Ensure a saturation temperature lies strictly between triple and critical points.
    pub fn validate_saturation_temperature(r: Refrigerant, t: Temperature) -> FluidResult<()> {
        validate_temperature(t)?;
        if t.value < r.triple_temperature() || t.value >= r.critical_temperature() {
            return Err(FluidError::OutOfRange {
                what: "saturation temperature",
                value: t.value,
            });
        }
        Ok(())
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: f64) -> FluidResult<()> {
        ensure_finite(h, "enthalpy")?;
        Ok(())
    }
}
