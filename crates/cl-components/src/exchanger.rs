//! Heat exchanger with a fixed thermal duty.
//!
//! Liquid inflow evaporates: the duty is added to the inbound enthalpy and the outlet
//! leaves as vapor. Gas inflow condenses: the duty is removed and the outlet leaves
//! as liquid. Pressure is unchanged, and with no inflow the temperature passes
//! through. Saturated inputs are nudged 100 Pa off the saturation curve so the
//! (T, P) enthalpy query is single-phase.

use crate::common::{SATURATION_OFFSET_PA, check_finite};
use crate::error::ComponentResult;
use crate::flow::FlowState;
use crate::regime::{Regime, RegimePaths, dispatch};
use crate::traits::FlowElement;
use cl_core::units::{Power, pa};
use cl_fluids::PropertyProvider;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Exchanger {
    name: String,
    duty: Power,
}

impl Exchanger {
    pub fn new(name: impl Into<String>, duty: Power) -> ComponentResult<Self> {
        check_finite(duty.value, "exchanger duty")?;
        Ok(Self {
            name: name.into(),
            duty,
        })
    }

    pub fn duty(&self) -> Power {
        self.duty
    }

    pub fn set_duty(&mut self, duty: Power) -> ComponentResult<()> {
        check_finite(duty.value, "exchanger duty")?;
        self.duty = duty;
        Ok(())
    }

    /// Liquid in, vapor out.
    pub fn evaporate(
        &self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        let mdot = inlet.mass_flow.value;
        let mut out = inlet.with_quality(Regime::Gas.quality());
        if mdot > 0.0 {
            let p = inlet.pressure.value;
            let h_in = fluid.enthalpy(inlet.temperature, pa(p + SATURATION_OFFSET_PA))?;
            let h_out = check_finite(self.duty.value / mdot + h_in, "outlet enthalpy")?;
            out.temperature = fluid.temperature_from_hp(h_out, inlet.pressure)?;
        }
        debug!(exchanger = %self.name, t_out = out.temperature.value, "evaporation");
        Ok(out)
    }

    /// Gas in, liquid out.
    pub fn condense(
        &self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        let mdot = inlet.mass_flow.value;
        let mut out = inlet.with_quality(Regime::Liquid.quality());
        if mdot > 0.0 {
            let p = inlet.pressure.value;
            let h_in = fluid.enthalpy(inlet.temperature, inlet.pressure)?;
            let h_out = check_finite(h_in - self.duty.value / mdot, "outlet enthalpy")?;
            out.temperature = fluid.temperature_from_hp(h_out, pa(p + SATURATION_OFFSET_PA))?;
        }
        debug!(exchanger = %self.name, t_out = out.temperature.value, "condensation");
        Ok(out)
    }
}

impl RegimePaths for Exchanger {
    fn liquid_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        self.evaporate(fluid, inlet)
    }

    fn gas_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        self.condense(fluid, inlet)
    }
}

impl FlowElement for Exchanger {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        dispatch(self, fluid, inlet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cl_core::units::w;
    use cl_fluids::SaturationSurrogate;

    #[test]
    fn liquid_inflow_heats_and_evaporates() {
        let fluid = SaturationSurrogate::r744();
        let mut hx = Exchanger::new("evap", w(1000.0)).unwrap();
        let out = hx
            .update(&fluid, &FlowState::from_si(0.1, 5e6, 280.0, 0.0))
            .unwrap();
        // Subcooled liquid, cp = 2600 J/(kg K): dT = 1000 / (0.1 * 2600)
        assert_relative_eq!(out.temperature.value, 280.0 + 1000.0 / 260.0, max_relative = 1e-3);
        assert_eq!(out.quality, 1.0);
        assert_eq!(out.pressure.value, 5e6);
    }

    #[test]
    fn gas_inflow_cools_and_condenses() {
        let fluid = SaturationSurrogate::r744();
        let mut hx = Exchanger::new("cond", w(1000.0)).unwrap();
        let out = hx
            .update(&fluid, &FlowState::from_si(0.1, 3e6, 290.0, 1.0))
            .unwrap();
        assert_relative_eq!(out.temperature.value, 290.0 - 1000.0 / 190.0, max_relative = 1e-3);
        assert_eq!(out.quality, 0.0);
    }

    #[test]
    fn zero_flow_passes_temperature_through() {
        let fluid = SaturationSurrogate::r744();
        let mut hx = Exchanger::new("evap", w(5000.0)).unwrap();
        let out = hx
            .update(&fluid, &FlowState::from_si(0.0, 5e6, 280.0, 0.0))
            .unwrap();
        assert_eq!(out.temperature.value, 280.0);
        assert_eq!(out.quality, 1.0);
    }

    #[test]
    fn tiny_flow_still_carries_the_duty() {
        let fluid = SaturationSurrogate::r744();
        // Same specific duty as the 0.1 kg/s, 1 kW case.
        let mut hx = Exchanger::new("evap", w(1e-8)).unwrap();
        let out = hx
            .update(&fluid, &FlowState::from_si(1e-12, 5e6, 280.0, 0.0))
            .unwrap();
        assert_relative_eq!(out.temperature.value, 280.0 + 1000.0 / 260.0, max_relative = 1e-3);
    }

    #[test]
    fn duty_can_be_rescheduled() {
        let mut hx = Exchanger::new("evap", w(1.0)).unwrap();
        hx.set_duty(w(250.0)).unwrap();
        assert_eq!(hx.duty().value, 250.0);
        assert!(hx.set_duty(w(f64::INFINITY)).is_err());
    }
}
