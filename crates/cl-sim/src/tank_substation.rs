//! Substation tank: liquid is drawn off at a set rate.

use crate::tank::{Reservoir, TANK_PASSES, TankState};
use cl_components::common::check_finite;
use cl_components::{ComponentError, ComponentResult, FlowElement, FlowState, RegimePaths, dispatch};
use cl_core::units::{MassRate, Power, Pressure, Temperature, Time, Volume, kgps};
use cl_fluids::PropertyProvider;
use tracing::debug;

/// Outflow a substation starts with [kg/s].
pub const DEFAULT_SUBSTATION_OUTFLOW: f64 = 0.5;

/// Accumulator at the consumer side of the loop.
///
/// The outflow is imposed, not derived from a pressure difference. `duty` is heat
/// removed from the stored mixture per unit time.
#[derive(Clone, Debug)]
pub struct TankSubstation {
    tank: Reservoir,
    duty: Power,
    mass_flow_out: MassRate,
}

impl TankSubstation {
    pub fn new(
        fluid: &dyn PropertyProvider,
        name: impl Into<String>,
        quality: f64,
        temperature: Temperature,
        volume: Volume,
        time_step: Time,
        duty: Power,
    ) -> ComponentResult<Self> {
        check_finite(duty.value, "substation duty")?;
        let tank = Reservoir::charge(fluid, name.into(), quality, temperature, volume, time_step)?;
        Ok(Self {
            tank,
            duty,
            mass_flow_out: kgps(DEFAULT_SUBSTATION_OUTFLOW),
        })
    }

    pub fn state(&self) -> &TankState {
        &self.tank.state
    }

    pub fn pressure(&self) -> Pressure {
        self.tank.state.pressure
    }

    pub fn volume(&self) -> Volume {
        self.tank.volume
    }

    pub fn time_step(&self) -> Time {
        self.tank.time_step
    }

    pub fn duty(&self) -> Power {
        self.duty
    }

    pub fn set_duty(&mut self, duty: Power) -> ComponentResult<()> {
        check_finite(duty.value, "substation duty")?;
        self.duty = duty;
        Ok(())
    }

    pub fn mass_flow_out(&self) -> MassRate {
        self.mass_flow_out
    }

    pub fn set_mass_flow_out(&mut self, mass_flow: MassRate) -> ComponentResult<()> {
        let v = check_finite(mass_flow.value, "substation outflow")?;
        if v < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "substation outflow must be non-negative",
            });
        }
        self.mass_flow_out = mass_flow;
        Ok(())
    }

    /// One step of mass and energy balance for an inflow already resolved to 0 or 1 quality.
    fn absorb(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        let m0 = self.tank.state.mass.value;
        let u0 = self.tank.state.internal_energy.value;
        let dt = self.tank.time_step.value;
        let mdot_in = inlet.mass_flow.value;
        let mdot_out = self.mass_flow_out.value;
        let u_in = fluid.internal_energy(inlet.temperature, inlet.quality)?;

        for _ in 0..TANK_PASSES {
            let u_out = fluid.internal_energy(self.tank.state.temperature, 0.0)?;
            let mass = m0 + (mdot_in - mdot_out) * dt;
            let energy =
                u0 - self.duty.value * dt + mdot_in * dt * u_in - mdot_out * dt * u_out;
            self.tank.settle(fluid, mass, energy)?;
        }

        let state = &self.tank.state;
        debug!(
            tank = %self.tank.name,
            mass = state.mass.value,
            temperature = state.temperature.value,
            quality = state.quality,
            "substation step"
        );
        Ok(FlowState::new(
            self.mass_flow_out,
            state.pressure,
            state.temperature,
            0.0,
        ))
    }
}

impl RegimePaths for TankSubstation {
    fn liquid_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        self.absorb(fluid, inlet)
    }

    fn gas_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        self.absorb(fluid, inlet)
    }
}

impl FlowElement for TankSubstation {
    fn name(&self) -> &str {
        &self.tank.name
    }

    fn update(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        dispatch(self, fluid, inlet)
    }
}
