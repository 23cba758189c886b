//! Phase-equilibrium bisection against the CoolProp backend.

use cl_core::units::{Energy, k, kg, m3};
use cl_fluids::{CoolPropModel, PropertyProvider, Refrigerant};
use cl_solver::{BisectionConfig, solve_phase_equilibrium};
use uom::si::energy::joule;

#[test]
fn recovers_r744_mixture_at_280k() {
    let model = CoolPropModel::new(Refrigerant::R744).unwrap();
    let v = 0.1;
    let rho = model.density(k(280.0), 0.5).unwrap().value;
    let u = model.internal_energy(k(280.0), 0.5).unwrap();
    let m = rho * v;

    let sol = solve_phase_equilibrium(
        &model,
        kg(m),
        Energy::new::<joule>(u * m),
        m3(v),
        k(282.0),
        &BisectionConfig::default(),
    )
    .unwrap();

    assert!((sol.temperature.value - 280.0).abs() < 1e-3, "T = {}", sol.temperature.value);
    assert!((sol.quality - 0.5).abs() < 1e-3, "Q = {}", sol.quality);
    assert!(sol.pressure.value > 4.0e6 && sol.pressure.value < 4.3e6);
}
