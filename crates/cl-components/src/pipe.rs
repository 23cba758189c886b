//! Pipe with a Colebrook-White friction pressure drop.

use crate::common::{EPSILON_MDOT, PIPE_PASSES, REYNOLDS_SEED, check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::flow::FlowState;
use crate::regime::{RegimePaths, dispatch};
use crate::traits::FlowElement;
use cl_core::units::{Length, m, pa};
use cl_fluids::PropertyProvider;
use cl_solver::{ColebrookConfig, colebrook_white};
use std::f64::consts::PI;
use tracing::debug;

/// Radius and length of a pipe, as read by a central tank to size its outflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipeGeometry {
    pub radius: Length,
    pub length: Length,
}

/// Straight pipe: flow and temperature pass through, pressure drops by friction.
#[derive(Debug, Clone)]
pub struct Pipe {
    name: String,
    /// Pipe length
    pub length: Length,
    /// Pipe inner diameter
    pub diameter: Length,
    /// Surface roughness (absolute)
    pub roughness: Length,
    pub friction: ColebrookConfig,
    last_friction_factor: Option<f64>,
    last_inlet: Option<FlowState>,
}

impl Pipe {
    pub fn new(
        name: impl Into<String>,
        length: Length,
        diameter: Length,
        roughness: Length,
    ) -> ComponentResult<Self> {
        check_positive(length.value, "pipe length")?;
        check_positive(diameter.value, "pipe diameter")?;
        let k = check_finite(roughness.value, "pipe roughness")?;
        if k < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pipe roughness",
            });
        }
        Ok(Self {
            name: name.into(),
            length,
            diameter,
            roughness,
            friction: ColebrookConfig::default(),
            last_friction_factor: None,
            last_inlet: None,
        })
    }

    pub fn geometry(&self) -> PipeGeometry {
        PipeGeometry {
            radius: m(0.5 * self.diameter.value),
            length: self.length,
        }
    }

    /// Friction factor of the most recent update.
    pub fn last_friction_factor(&self) -> Option<f64> {
        self.last_friction_factor
    }

    /// Inlet of the most recent update.
    pub fn last_inlet(&self) -> Option<&FlowState> {
        self.last_inlet.as_ref()
    }

    /// Pressure drop [Pa] and friction factor for a flow at saturation quality `inlet.quality`.
    pub fn pressure_drop(
        &self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<(f64, f64)> {
        let mdot = inlet.mass_flow.value;
        let rho = fluid.density(inlet.temperature, inlet.quality)?.value;
        let mu = fluid.viscosity(inlet.temperature, inlet.quality)?.value;
        let d = self.diameter.value;
        let r = 0.5 * d;
        let area = PI * r * r;

        let mut fd = self.friction.seed;
        for _ in 0..PIPE_PASSES {
            let velocity = mdot / (rho * area);
            let reynolds = if mdot < EPSILON_MDOT {
                REYNOLDS_SEED
            } else {
                check_finite(rho * velocity * d / mu, "Reynolds number")?
            };
            fd = colebrook_white(self.roughness.value, d, reynolds, &self.friction)?.factor;
        }

        let drop = mdot * mdot * fd * self.length.value / (4.0 * PI * rho * r.powi(5));
        Ok((check_finite(drop, "pressure drop")?, fd))
    }

    fn flow_through(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        let (drop, fd) = self.pressure_drop(fluid, inlet)?;
        let p_in = inlet.pressure.value;
        let p_out = p_in - drop;
        if p_out <= 0.0 {
            return Err(ComponentError::NonPositivePressure { p_in, drop });
        }
        debug!(pipe = %self.name, drop, friction_factor = fd, "pipe update");
        self.last_friction_factor = Some(fd);
        self.last_inlet = Some(*inlet);
        Ok(inlet.with_pressure(pa(p_out)))
    }
}

impl RegimePaths for Pipe {
    fn liquid_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        self.flow_through(fluid, inlet)
    }

    fn gas_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState> {
        self.flow_through(fluid, inlet)
    }
}

impl FlowElement for Pipe {
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
