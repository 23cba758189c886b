//! Analytic saturation surrogate.
//!
//! A closed-form two-phase model for offline runs and deterministic tests. It is
//! calibrated near one reference saturation temperature and is only meant to be
//! qualitatively right in a band around it:
//!
//! - saturated densities and internal energies vary linearly with temperature
//! - saturation pressure follows Clausius-Clapeyron, `P = P0 exp(B (1/T0 - 1/T))`
//! - single-phase enthalpy extends linearly from the saturated value at `Tsat(P)`
//!   with a frozen cp on each side

use crate::error::{FluidError, FluidResult};
use crate::model::{PropertyProvider, validation};
use crate::refrigerant::Refrigerant;
use cl_core::units::{Density, DynVisc, Pressure, SpecEnergy, Temperature, k, kg_m3, pa, pa_s};

/// Linearized saturation model around a reference temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationSurrogate {
    pub refrigerant: Refrigerant,
    /// Reference saturation temperature [K]
    pub t_ref: f64,
    /// Saturation queries are accepted within `t_ref ± band` [K]
    pub band: f64,
    /// Saturation pressure at `t_ref` [Pa]
    pub p_ref: f64,
    /// Clausius-Clapeyron slope `h_fg / R_specific` [K]
    pub clapeyron_b: f64,
    /// Saturated liquid density at `t_ref` and its slope [kg/m³], [kg/m³/K]
    pub rho_liq: (f64, f64),
    /// Saturated vapor density at `t_ref` and its slope
    pub rho_vap: (f64, f64),
    /// Saturated liquid internal energy at `t_ref` and its slope [J/kg], [J/kg/K]
    pub u_liq: (f64, f64),
    /// Saturated vapor internal energy at `t_ref` and its slope
    pub u_vap: (f64, f64),
    /// Liquid and vapor dynamic viscosity [Pa·s]
    pub mu: (f64, f64),
    /// Frozen cp of subcooled liquid and superheated vapor [J/(kg·K)]
    pub cp: (f64, f64),
}

impl SaturationSurrogate {
    /// R744 calibrated around 280 K.
    pub fn r744() -> Self {
        Self {
            refrigerant: Refrigerant::R744,
            t_ref: 280.0,
            band: 20.0,
            p_ref: 4.16e6,
            clapeyron_b: 1978.0,
            rho_liq: (883.0, -7.0),
            rho_vap: (115.0, 5.0),
            u_liq: (206.0e3, 2.7e3),
            u_vap: (392.0e3, -0.6e3),
            mu: (9.9e-5, 1.7e-5),
            cp: (2.6e3, 1.9e3),
        }
    }

    fn check_band(&self, t: Temperature) -> FluidResult<f64> {
        validation::validate_saturation_temperature(self.refrigerant, t)?;
        let dt = t.value - self.t_ref;
        if dt.abs() > self.band {
            return Err(FluidError::OutOfRange {
                what: "surrogate saturation temperature",
                value: t.value,
            });
        }
        Ok(dt)
    }

    fn check_saturation(&self, t: Temperature, q: f64) -> FluidResult<f64> {
        let dt = self.check_band(t)?;
        validation::validate_quality(q)?;
        Ok(dt)
    }

    fn p_sat(&self, t: f64) -> f64 {
        self.p_ref * (self.clapeyron_b * (1.0 / self.t_ref - 1.0 / t)).exp()
    }

    fn t_sat(&self, p: f64) -> f64 {
        1.0 / (1.0 / self.t_ref - (p / self.p_ref).ln() / self.clapeyron_b)
    }

    fn line(coeffs: (f64, f64), dt: f64) -> f64 {
        coeffs.0 + coeffs.1 * dt
    }

    /// Saturated liquid and vapor enthalpy at pressure `p`, plus `Tsat(p)`.
    fn saturated_enthalpies(&self, p: f64) -> FluidResult<(f64, f64, f64)> {
        let t_sat = self.t_sat(p);
        let dt = self.check_band(k(t_sat))?;
        let h_liq = Self::line(self.u_liq, dt) + p / Self::line(self.rho_liq, dt);
        let h_vap = Self::line(self.u_vap, dt) + p / Self::line(self.rho_vap, dt);
        Ok((t_sat, h_liq, h_vap))
    }
}

impl Default for SaturationSurrogate {
    fn default() -> Self {
        Self::r744()
    }
}

impl PropertyProvider for SaturationSurrogate {
    fn name(&self) -> &str {
        "saturation surrogate"
    }

    fn refrigerant(&self) -> Refrigerant {
        self.refrigerant
    }

    fn density(&self, t: Temperature, q: f64) -> FluidResult<Density> {
        let dt = self.check_saturation(t, q)?;
        let v = (1.0 - q) / Self::line(self.rho_liq, dt) + q / Self::line(self.rho_vap, dt);
        if !v.is_finite() || v <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "surrogate specific volume",
            });
        }
        Ok(kg_m3(1.0 / v))
    }

    fn internal_energy(&self, t: Temperature, q: f64) -> FluidResult<SpecEnergy> {
        let dt = self.check_saturation(t, q)?;
        Ok((1.0 - q) * Self::line(self.u_liq, dt) + q * Self::line(self.u_vap, dt))
    }

    fn pressure(&self, t: Temperature, q: f64) -> FluidResult<Pressure> {
        self.check_saturation(t, q)?;
        Ok(pa(self.p_sat(t.value)))
    }

    fn viscosity(&self, t: Temperature, q: f64) -> FluidResult<DynVisc> {
        self.check_saturation(t, q)?;
        Ok(pa_s((1.0 - q) * self.mu.0 + q * self.mu.1))
    }

    fn enthalpy(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEnergy> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        let (t_sat, h_liq, h_vap) = self.saturated_enthalpies(p.value)?;
        if t.value < t_sat {
            Ok(h_liq + self.cp.0 * (t.value - t_sat))
        } else {
            Ok(h_vap + self.cp.1 * (t.value - t_sat))
        }
    }

    fn temperature_from_hp(&self, h: SpecEnergy, p: Pressure) -> FluidResult<Temperature> {
        validation::validate_pressure(p)?;
        validation::validate_enthalpy(h)?;
        let (t_sat, h_liq, h_vap) = self.saturated_enthalpies(p.value)?;
        let t = if h <= h_liq {
            t_sat + (h - h_liq) / self.cp.0
        } else if h >= h_vap {
            t_sat + (h - h_vap) / self.cp.1
        } else {
            t_sat
        };
        if t <= 0.0 {
            return Err(FluidError::OutOfRange {
                what: "temperature from (h, P)",
                value: t,
            });
        }
        Ok(k(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{Phase, QUALITY_UNSPECIFIED};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn reference_point_reproduced() {
        let s = SaturationSurrogate::r744();
        assert_relative_eq!(s.pressure(k(280.0), 0.0).unwrap().value, 4.16e6);
        assert_relative_eq!(s.density(k(280.0), 0.0).unwrap().value, 883.0, epsilon = 1e-9);
        assert_relative_eq!(s.density(k(280.0), 1.0).unwrap().value, 115.0, epsilon = 1e-9);
        assert_relative_eq!(s.internal_energy(k(280.0), 1.0).unwrap(), 392.0e3);
    }

    #[test]
    fn saturation_pressure_rises_with_temperature() {
        let s = SaturationSurrogate::r744();
        let p1 = s.pressure(k(270.0), 0.0).unwrap().value;
        let p2 = s.pressure(k(280.0), 0.0).unwrap().value;
        let p3 = s.pressure(k(290.0), 0.0).unwrap().value;
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn tsat_inverts_psat() {
        let s = SaturationSurrogate::r744();
        let p = s.p_sat(275.0);
        assert_relative_eq!(s.t_sat(p), 275.0, epsilon = 1e-9);
    }

    #[test]
    fn enthalpy_inverts_on_both_sides() {
        let s = SaturationSurrogate::r744();
        let p = pa(5e6);
        for t in [270.0, 282.0, 292.0, 300.0] {
            let h = s.enthalpy(k(t), p).unwrap();
            let back = s.temperature_from_hp(h, p).unwrap().value;
            assert_relative_eq!(back, t, epsilon = 1e-9);
        }
    }

    #[test]
    fn two_phase_enthalpy_maps_to_saturation_temperature() {
        let s = SaturationSurrogate::r744();
        let p = pa(4.16e6);
        let (t_sat, h_liq, h_vap) = s.saturated_enthalpies(p.value).unwrap();
        let t = s.temperature_from_hp(0.5 * (h_liq + h_vap), p).unwrap().value;
        assert_relative_eq!(t, t_sat);
    }

    #[test]
    fn phase_from_pressure_and_temperature() {
        let s = SaturationSurrogate::r744();
        let p_sat = s.p_sat(280.0);
        assert_eq!(s.phase(pa(p_sat + 1e5), k(280.0)).unwrap(), Phase::Liquid);
        assert_eq!(s.phase(pa(p_sat - 1e5), k(280.0)).unwrap(), Phase::Gas);
        assert!(matches!(
            s.phase(pa(8e6), k(310.0)).unwrap(),
            Phase::Other(_)
        ));
        assert_eq!(s.quality(k(280.0), pa(p_sat + 1e5)).unwrap(), QUALITY_UNSPECIFIED);
    }

    #[test]
    fn compressed_state_above_critical_pressure_is_not_liquid() {
        let s = SaturationSurrogate::r744();
        assert_eq!(
            s.phase(pa(8.0e6), k(290.0)).unwrap(),
            Phase::Other("supercritical_liquid".into())
        );
        assert_eq!(
            s.phase(pa(6.0e6), k(310.0)).unwrap(),
            Phase::Other("supercritical_gas".into())
        );
        assert_eq!(s.phase(pa(7.0e6), k(290.0)).unwrap(), Phase::Liquid);
    }

    #[test]
    fn saturated_volume_falls_with_temperature_at_fixed_u() {
        let s = SaturationSurrogate::r744();
        let u = s.internal_energy(k(280.0), 0.5).unwrap();
        let vol = |t: f64| {
            let sat = s.saturation(k(t)).unwrap();
            sat.mixture_volume(1.0, sat.quality_from_u(u))
        };
        assert!(vol(278.0) > vol(280.0));
        assert!(vol(280.0) > vol(282.0));
    }

    proptest! {
        #[test]
        fn enthalpy_round_trips_off_saturation(
            t in 262.0f64..300.0,
            p in 3.5e6f64..5.5e6,
        ) {
            let s = SaturationSurrogate::r744();
            let t_sat = s.t_sat(p);
            prop_assume!((t - t_sat).abs() > 1e-6);
            let h = s.enthalpy(k(t), pa(p)).unwrap();
            let back = s.temperature_from_hp(h, pa(p)).unwrap().value;
            prop_assert!((back - t).abs() < 1e-6, "t = {t}, back = {back}");
        }
    }

    #[test]
    fn out_of_window_is_rejected() {
        let s = SaturationSurrogate::r744();
        assert!(s.density(k(320.0), 0.0).is_err());
        assert!(s.density(k(250.0), 1.0).is_err());
        assert!(s.density(k(280.0), -1.0).is_err());
    }
}
