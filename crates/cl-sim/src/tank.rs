//! Stored state shared by both accumulator tanks.

use cl_components::common::check_positive;
use cl_components::{ComponentError, ComponentResult};
use cl_core::units::{Energy, Mass, Pressure, Temperature, Time, Volume, j, kg};
use cl_fluids::PropertyProvider;
use cl_solver::{BisectionConfig, EquilibriumSolution, solve_phase_equilibrium};

/// Inner refinement passes per tank step.
pub const TANK_PASSES: usize = 5;

/// Mass, energy and the saturated state they imply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankState {
    pub mass: Mass,
    pub internal_energy: Energy,
    pub temperature: Temperature,
    pub pressure: Pressure,
    /// True vapor mass fraction of the stored mixture
    pub quality: f64,
}

/// Lumped two-phase reservoir.
#[derive(Clone, Debug)]
pub(crate) struct Reservoir {
    pub name: String,
    pub volume: Volume,
    pub time_step: Time,
    pub state: TankState,
    pub bisection: BisectionConfig,
}

impl Reservoir {
    /// Fill `volume` with saturated mixture at `(temperature, quality)`.
    pub fn charge(
        fluid: &dyn PropertyProvider,
        name: String,
        quality: f64,
        temperature: Temperature,
        volume: Volume,
        time_step: Time,
    ) -> ComponentResult<Self> {
        check_positive(volume.value, "tank volume")?;
        check_positive(time_step.value, "tank time step")?;
        if !(0.0..=1.0).contains(&quality) {
            return Err(ComponentError::InvalidArg {
                what: "tank quality must lie in [0, 1]",
            });
        }

        let mass = fluid.density(temperature, quality)?.value * volume.value;
        let pressure = fluid.pressure(temperature, quality)?;
        let u = fluid.internal_energy(temperature, quality)?;
        Ok(Self {
            name,
            volume,
            time_step,
            state: TankState {
                mass: kg(mass),
                internal_energy: j(u * mass),
                temperature,
                pressure,
                quality,
            },
            bisection: BisectionConfig::default(),
        })
    }

    /// Set mass and energy, then recover `(T, p, quality)` around the current temperature.
    pub fn settle(
        &mut self,
        fluid: &dyn PropertyProvider,
        mass: f64,
        internal_energy: f64,
    ) -> ComponentResult<EquilibriumSolution> {
        self.state.mass = kg(mass);
        self.state.internal_energy = j(internal_energy);
        let sol = solve_phase_equilibrium(
            fluid,
            self.state.mass,
            self.state.internal_energy,
            self.volume,
            self.state.temperature,
            &self.bisection,
        )?;
        self.state.temperature = sol.temperature;
        self.state.pressure = sol.pressure;
        self.state.quality = sol.quality;
        Ok(sol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cl_core::units::{k, m3, s};
    use cl_fluids::SaturationSurrogate;

    #[test]
    fn charge_fills_volume_at_saturation() {
        let fluid = SaturationSurrogate::r744();
        let r = Reservoir::charge(&fluid, "t".into(), 0.0, k(280.0), m3(0.1), s(1.0)).unwrap();
        assert_relative_eq!(r.state.mass.value, 88.3, max_relative = 1e-12);
        assert_relative_eq!(r.state.pressure.value, 4.16e6, max_relative = 1e-12);
        assert_relative_eq!(r.state.internal_energy.value, 206.0e3 * 88.3, max_relative = 1e-12);
    }

    #[test]
    fn charge_rejects_bad_parameters() {
        let fluid = SaturationSurrogate::r744();
        assert!(Reservoir::charge(&fluid, "t".into(), 1.5, k(280.0), m3(0.1), s(1.0)).is_err());
        assert!(Reservoir::charge(&fluid, "t".into(), 0.5, k(280.0), m3(0.0), s(1.0)).is_err());
        assert!(Reservoir::charge(&fluid, "t".into(), 0.5, k(280.0), m3(0.1), s(0.0)).is_err());
    }

    #[test]
    fn settle_on_unchanged_contents_is_stationary() {
        let fluid = SaturationSurrogate::r744();
        let mut r =
            Reservoir::charge(&fluid, "t".into(), 0.5, k(280.0), m3(0.1), s(1.0)).unwrap();
        let (m, u) = (r.state.mass.value, r.state.internal_energy.value);
        r.settle(&fluid, m, u).unwrap();
        assert_relative_eq!(r.state.temperature.value, 280.0, epsilon = 1e-9);
        assert_relative_eq!(r.state.quality, 0.5, epsilon = 1e-9);
    }
}
