//! Element scenarios against the CoolProp backend.

use cl_components::{Exchanger, FlowElement, FlowState, Pipe};
use cl_core::units::{m, w};
use cl_fluids::{CoolPropModel, QUALITY_UNSPECIFIED, Refrigerant};

fn co2() -> CoolPropModel {
    CoolPropModel::new(Refrigerant::R744).unwrap()
}

#[test]
fn pipe_reference_scenario() {
    let fluid = co2();
    let mut pipe = Pipe::new("p1", m(5.0), m(0.02), m(1e-5)).unwrap();
    let inlet = FlowState::from_si(0.1, 5e6, 280.0, 0.0);
    let out = pipe.update(&fluid, &inlet).unwrap();

    assert!(out.pressure.value < 5e6, "p_out = {}", out.pressure.value);
    // A few hundred Pa to a few kPa for this geometry.
    assert!(out.pressure.value > 4.99e6);
    assert_eq!(out.temperature, inlet.temperature);
    assert_eq!(out.quality, inlet.quality);
    assert_eq!(out.mass_flow, inlet.mass_flow);
}

#[test]
fn pipe_resolves_unspecified_quality() {
    let fluid = co2();
    let mut pipe = Pipe::new("p1", m(5.0), m(0.02), m(1e-5)).unwrap();
    // 60 bar at 280 K is subcooled liquid.
    let out = pipe
        .update(&fluid, &FlowState::from_si(0.1, 6e6, 280.0, QUALITY_UNSPECIFIED))
        .unwrap();
    assert_eq!(out.quality, 0.0);
    assert!(out.pressure.value < 6e6);
}

#[test]
fn evaporator_raises_temperature_of_subcooled_liquid() {
    let fluid = co2();
    let mut hx = Exchanger::new("evap", w(500.0)).unwrap();
    let out = hx
        .update(&fluid, &FlowState::from_si(0.1, 6e6, 280.0, 0.0))
        .unwrap();
    assert!(out.temperature.value > 280.0);
    assert_eq!(out.quality, 1.0);
}
