//! CoolProp-based property provider.

use crate::error::{FluidError, FluidResult};
use crate::model::{PropertyProvider, validation};
use crate::phase::{Phase, QUALITY_UNSPECIFIED};
use crate::refrigerant::Refrigerant;
use cl_core::units::{Density, DynVisc, Pressure, SpecEnergy, Temperature, k, kg_m3, pa, pa_s};
use rfluids::prelude::*;

/// CoolProp backend for a single pure refrigerant.
///
/// rfluids `Fluid` instances are created per query, so the model holds no mutable
/// state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct CoolPropModel {
    refrigerant: Refrigerant,
    name: String,
}

impl CoolPropModel {
    pub fn new(refrigerant: Refrigerant) -> FluidResult<Self> {
        let model = Self {
            refrigerant,
            name: format!("CoolProp ({})", refrigerant.key()),
        };
        // Probe once so an unusable backend fails at construction, not mid-run.
        let t_probe = 0.5 * (refrigerant.triple_temperature() + refrigerant.critical_temperature());
        model.saturated(k(t_probe), 0.0)?;
        Ok(model)
    }

    fn saturated(&self, t: Temperature, q: f64) -> FluidResult<Fluid> {
        validation::validate_saturation_temperature(self.refrigerant, t)?;
        validation::validate_quality(q)?;
        Fluid::from(self.refrigerant.rfluids_pure())
            .in_state(FluidInput::temperature(t.value), FluidInput::quality(q))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at T={} K, Q={}: {}", t.value, q, e),
            })
    }

    fn fluid_at_pt(&self, p: Pressure, t: Temperature) -> FluidResult<Fluid> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        Fluid::from(self.refrigerant.rfluids_pure())
            .in_state(FluidInput::pressure(p.value), FluidInput::temperature(t.value))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at P={} Pa, T={} K: {}", p.value, t.value, e),
            })
    }

    fn fluid_at_ph(&self, p: Pressure, h: SpecEnergy) -> FluidResult<Fluid> {
        validation::validate_pressure(p)?;
        validation::validate_enthalpy(h)?;
        Fluid::from(self.refrigerant.rfluids_pure())
            .in_state(FluidInput::pressure(p.value), FluidInput::enthalpy(h))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at P={} Pa, h={} J/kg: {}", p.value, h, e),
            })
    }
}

fn backend_err(what: &str, e: impl core::fmt::Display) -> FluidError {
    FluidError::Backend {
        message: format!("rfluids error getting {}: {}", what, e),
    }
}

/// CoolProp phase names without the `phase_` prefix.
fn phase_from_backend(phase: rfluids::io::Phase) -> Phase {
    match phase {
        rfluids::io::Phase::Liquid => Phase::Liquid,
        rfluids::io::Phase::Gas => Phase::Gas,
        other => {
            let name: &str = other.as_ref();
            Phase::Other(name.trim_start_matches("phase_").to_string())
        }
    }
}

fn positive(value: f64, what: &'static str) -> FluidResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FluidError::NonPhysical { what });
    }
    Ok(value)
}

impl PropertyProvider for CoolPropModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn refrigerant(&self) -> Refrigerant {
        self.refrigerant
    }

    fn density(&self, t: Temperature, q: f64) -> FluidResult<Density> {
        let mut fluid = self.saturated(t, q)?;
        let rho = fluid.density().map_err(|e| backend_err("density", e))?;
        Ok(kg_m3(positive(rho, "density must be positive and finite")?))
    }

    fn internal_energy(&self, t: Temperature, q: f64) -> FluidResult<SpecEnergy> {
        let mut fluid = self.saturated(t, q)?;
        let u = fluid
            .internal_energy()
            .map_err(|e| backend_err("internal energy", e))?;
        validation::validate_enthalpy(u)?;
        Ok(u)
    }

    fn pressure(&self, t: Temperature, q: f64) -> FluidResult<Pressure> {
        let mut fluid = self.saturated(t, q)?;
        let p = fluid.pressure().map_err(|e| backend_err("pressure", e))?;
        Ok(pa(positive(p, "pressure must be positive and finite")?))
    }

    fn viscosity(&self, t: Temperature, q: f64) -> FluidResult<DynVisc> {
        let mut fluid = self.saturated(t, q)?;
        let mu = fluid
            .dynamic_viscosity()
            .map_err(|e| backend_err("viscosity", e))?;
        Ok(pa_s(positive(mu, "viscosity must be positive and finite")?))
    }

    fn enthalpy(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEnergy> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        let h = fluid.enthalpy().map_err(|e| backend_err("enthalpy", e))?;
        validation::validate_enthalpy(h)?;
        Ok(h)
    }

    fn temperature_from_hp(&self, h: SpecEnergy, p: Pressure) -> FluidResult<Temperature> {
        let mut fluid = self.fluid_at_ph(p, h)?;
        let t = fluid
            .temperature()
            .map_err(|e| backend_err("temperature", e))?;
        Ok(k(positive(t, "temperature must be positive and finite")?))
    }

    fn phase(&self, p: Pressure, t: Temperature) -> FluidResult<Phase> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        Ok(phase_from_backend(fluid.phase()))
    }

    /// CoolProp's quality for a two-phase state, the sentinel otherwise.
    fn quality(&self, t: Temperature, p: Pressure) -> FluidResult<f64> {
        let mut fluid = self.fluid_at_pt(p, t)?;
        if fluid.phase() != rfluids::io::Phase::TwoPhase {
            return Ok(QUALITY_UNSPECIFIED);
        }
        fluid.quality().map_err(|e| backend_err("quality", e))
    }
}
