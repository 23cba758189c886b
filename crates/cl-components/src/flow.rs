//! The flow tuple passed from element to element.

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};
use cl_core::units::{MassRate, Pressure, Temperature, k, kgps, pa};

pub use cl_fluids::QUALITY_UNSPECIFIED;

/// Inbound or outbound flow of an element.
///
/// `quality` is the vapor mass fraction, or [`QUALITY_UNSPECIFIED`] when the phase
/// should be inferred from pressure and temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowState {
    pub mass_flow: MassRate,
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub quality: f64,
}

impl FlowState {
    pub fn new(
        mass_flow: MassRate,
        pressure: Pressure,
        temperature: Temperature,
        quality: f64,
    ) -> Self {
        Self {
            mass_flow,
            pressure,
            temperature,
            quality,
        }
    }

    /// Build from raw SI values (kg/s, Pa, K, -).
    pub fn from_si(mass_flow: f64, pressure: f64, temperature: f64, quality: f64) -> Self {
        Self::new(kgps(mass_flow), pa(pressure), k(temperature), quality)
    }

    /// `(kg/s, Pa, K, quality)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (
            self.mass_flow.value,
            self.pressure.value,
            self.temperature.value,
            self.quality,
        )
    }

    pub fn with_quality(self, quality: f64) -> Self {
        Self { quality, ..self }
    }

    pub fn with_pressure(self, pressure: Pressure) -> Self {
        Self { pressure, ..self }
    }

    /// Check the state before an element consumes it.
    pub fn validate(&self) -> ComponentResult<()> {
        let (mdot, p, t, q) = self.as_tuple();
        check_finite(mdot, "mass flow")?;
        check_finite(p, "pressure")?;
        check_finite(t, "temperature")?;
        check_finite(q, "quality")?;
        if mdot < 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "mass flow must be non-negative",
            });
        }
        if p <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "pressure must be positive",
            });
        }
        if t <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "temperature must be positive",
            });
        }
        Ok(())
    }
}
