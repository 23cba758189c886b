//! Central tank: vapor leaves through the outlet pipe, driven by the pressure
//! difference to the substation tank.
//!
//! The outflow through a pipe of radius `r` and length `L` is
//!
//! ```text
//! mdot_out = sqrt(dp) 2 pi r^2 sqrt(rho r / (fd L))     (dp > 0, else 0)
//! ```
//!
//! with `rho` the saturated vapor density in the tank and `fd` from Colebrook-White
//! at a fixed roughness, iterated a fixed number of times on its own Reynolds number.

use crate::tank::{Reservoir, TANK_PASSES, TankState};
use cl_components::common::{EPSILON_MDOT, PIPE_PASSES, REYNOLDS_SEED, check_finite};
use cl_components::{
    ComponentError, ComponentResult, FlowElement, FlowState, PipeGeometry, RegimePaths, dispatch,
};
use cl_core::units::{Pressure, Temperature, Time, Volume, kgps};
use cl_fluids::PropertyProvider;
use cl_solver::{ColebrookConfig, colebrook_white};
use std::f64::consts::PI;
use tracing::debug;

/// Absolute roughness assumed for the outlet pipe [m].
pub const OUTLET_ROUGHNESS: f64 = 1e-5;

#[derive(Clone, Debug)]
pub struct TankCentral {
    tank: Reservoir,
    outlet: Option<PipeGeometry>,
    substation_pressure: Option<Pressure>,
    pub friction: ColebrookConfig,
}

impl TankCentral {
    pub fn new(
        fluid: &dyn PropertyProvider,
        name: impl Into<String>,
        quality: f64,
        temperature: Temperature,
        volume: Volume,
        time_step: Time,
    ) -> ComponentResult<Self> {
        let tank = Reservoir::charge(fluid, name.into(), quality, temperature, volume, time_step)?;
        Ok(Self {
            tank,
            outlet: None,
            substation_pressure: None,
            friction: ColebrookConfig::default(),
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

    pub fn outlet(&self) -> Option<PipeGeometry> {
        self.outlet
    }

    /// Attach the geometry of the pipe the outflow goes through.
    pub fn connect_outlet(&mut self, geometry: PipeGeometry) {
        self.outlet = Some(geometry);
    }

    /// Pressure of the substation tank for the coming step.
    pub fn set_substation_pressure(&mut self, pressure: Pressure) {
        self.substation_pressure = Some(pressure);
    }

    /// Driving pressure difference to the substation, if one has been set.
    pub fn delta_p(&self) -> Option<f64> {
        self.substation_pressure
            .map(|p| self.tank.state.pressure.value - p.value)
    }

    /// Vapor outflow through `outlet` for a pressure difference `delta_p` [Pa].
    ///
    /// `mdot_in` seeds the Reynolds number of the first pass.
    pub fn outflow(
        &self,
        fluid: &dyn PropertyProvider,
        outlet: &PipeGeometry,
        delta_p: f64,
        mdot_in: f64,
    ) -> ComponentResult<f64> {
        if delta_p <= 0.0 {
            return Ok(0.0);
        }
        let t = self.tank.state.temperature;
        let rho = fluid.density(t, 1.0)?.value;
        let mu = fluid.viscosity(t, 1.0)?.value;
        let r = outlet.radius.value;
        let length = outlet.length.value;
        let area = PI * r * r;

        let mut mdot_out = 0.0;
        for pass in 0..PIPE_PASSES {
            let basis = if pass == 0 { mdot_in } else { mdot_out };
            let reynolds = if pass == 0 && mdot_in < EPSILON_MDOT {
                REYNOLDS_SEED
            } else {
                let velocity = basis / rho / area;
                check_finite(rho * velocity * 2.0 * r / mu, "outlet Reynolds number")?
            };
            let fd = colebrook_white(OUTLET_ROUGHNESS, 2.0 * r, reynolds, &self.friction)?.factor;
            mdot_out = delta_p.sqrt() * 2.0 * PI * r * r * (rho * r / fd / length).sqrt();
        }
        check_finite(mdot_out, "central tank outflow")
    }

    fn absorb(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        let outlet = self.outlet.ok_or(ComponentError::NotWired {
            what: "central tank has no outlet pipe",
        })?;
        let delta_p = self.delta_p().ok_or(ComponentError::NotWired {
            what: "central tank has no substation pressure",
        })?;

        let m0 = self.tank.state.mass.value;
        let u0 = self.tank.state.internal_energy.value;
        let dt = self.tank.time_step.value;
        let mdot_in = inlet.mass_flow.value;
        let u_in = fluid.internal_energy(inlet.temperature, inlet.quality)?;

        let mut mdot_out = 0.0;
        for _ in 0..TANK_PASSES {
            mdot_out = self.outflow(fluid, &outlet, delta_p, mdot_in)?;
            let u_out = fluid.internal_energy(self.tank.state.temperature, 1.0)?;
            let mass = m0 + (mdot_in - mdot_out) * dt;
            let energy = u0 + mdot_in * dt * u_in - mdot_out * dt * u_out;
            self.tank.settle(fluid, mass, energy)?;
        }
        // Energy re-evaluated with the final outflow and tank temperature.
        let u_out = fluid.internal_energy(self.tank.state.temperature, 1.0)?;
        self.tank.state.internal_energy =
            cl_core::units::j(u0 + mdot_in * dt * u_in - mdot_out * dt * u_out);

        let state = &self.tank.state;
        debug!(
            tank = %self.tank.name,
            delta_p,
            mdot_out,
            temperature = state.temperature.value,
            quality = state.quality,
            "central step"
        );
        Ok(FlowState::new(
            kgps(mdot_out),
            state.pressure,
            state.temperature,
            1.0,
        ))
    }
}

impl RegimePaths for TankCentral {
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

impl FlowElement for TankCentral {
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
