//! Per-step values for exchanger or substation duty and substation outflow.

use crate::element::{Element, ElementKind};
use crate::error::{SimError, SimResult};
use crate::network::Network;
use cl_core::ElementId;
use cl_core::units::{kgps, w};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleTarget {
    /// Thermal duty [W] of an exchanger or substation tank
    Duty,
    /// Imposed outflow [kg/s] of a substation tank
    Outflow,
}

impl ScheduleTarget {
    fn accepts(self, kind: ElementKind) -> bool {
        match self {
            ScheduleTarget::Duty => {
                matches!(kind, ElementKind::Exchanger | ElementKind::TankSubstation)
            }
            ScheduleTarget::Outflow => kind == ElementKind::TankSubstation,
        }
    }
}

/// Values applied at the start of successive steps. The last value holds once the
/// list is exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    pub element: ElementId,
    pub target: ScheduleTarget,
    values: Vec<f64>,
}

impl Schedule {
    pub fn new(element: ElementId, target: ScheduleTarget, values: Vec<f64>) -> SimResult<Self> {
        if values.is_empty() {
            return Err(SimError::InvalidArg {
                what: "schedule has no values",
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "schedule values must be finite",
            });
        }
        if target == ScheduleTarget::Outflow && values.iter().any(|v| *v < 0.0) {
            return Err(SimError::InvalidArg {
                what: "outflow schedule values must be non-negative",
            });
        }
        Ok(Self {
            element,
            target,
            values,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value_at(&self, step: usize) -> f64 {
        match self.values.get(step) {
            Some(v) => *v,
            None => self.values[self.values.len() - 1],
        }
    }

    /// Check the target element exists and has the scheduled quantity.
    pub fn check(&self, network: &Network) -> SimResult<()> {
        let element = network.get(self.element).ok_or_else(|| {
            SimError::configuration(format!("schedule refers to missing element {}", self.element))
        })?;
        if !self.target.accepts(element.kind()) {
            return Err(SimError::configuration(format!(
                "{:?} schedule cannot drive {} '{}'",
                self.target,
                element.kind(),
                element.name()
            )));
        }
        Ok(())
    }

    pub fn apply(&self, network: &mut Network, step: usize) -> SimResult<()> {
        self.check(network)?;
        let value = self.value_at(step);
        match (network.get_mut(self.element), self.target) {
            (Some(Element::Exchanger(hx)), ScheduleTarget::Duty) => hx.set_duty(w(value))?,
            (Some(Element::TankSubstation(t)), ScheduleTarget::Duty) => t.set_duty(w(value))?,
            (Some(Element::TankSubstation(t)), ScheduleTarget::Outflow) => {
                t.set_mass_flow_out(kgps(value))?
            }
            _ => {
                return Err(SimError::configuration("schedule target changed kind"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_components::{Exchanger, Pipe};
    use cl_core::units::m;
    use proptest::prelude::*;

    fn id(i: usize) -> ElementId {
        ElementId::from_index(i).unwrap()
    }

    fn network() -> Network {
        Network::new(vec![
            Pipe::new("p1", m(5.0), m(0.02), m(1e-5)).unwrap().into(),
            Exchanger::new("hx", w(0.0)).unwrap().into(),
        ])
        .unwrap()
    }

    #[test]
    fn last_value_holds() {
        let s = Schedule::new(id(1), ScheduleTarget::Duty, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.value_at(0), 1.0);
        assert_eq!(s.value_at(2), 3.0);
        assert_eq!(s.value_at(40), 3.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Schedule::new(id(1), ScheduleTarget::Duty, vec![]).is_err());
        assert!(Schedule::new(id(1), ScheduleTarget::Duty, vec![f64::NAN]).is_err());
        assert!(Schedule::new(id(1), ScheduleTarget::Outflow, vec![0.5, -0.1]).is_err());
    }

    #[test]
    fn applies_exchanger_duty() {
        let mut net = network();
        let s = Schedule::new(id(1), ScheduleTarget::Duty, vec![100.0, 250.0]).unwrap();
        s.apply(&mut net, 1).unwrap();
        match net.get(id(1)) {
            Some(Element::Exchanger(hx)) => assert_eq!(hx.duty().value, 250.0),
            _ => panic!("expected exchanger"),
        }
    }

    #[test]
    fn wrong_target_is_a_configuration_error() {
        let net = network();
        let on_pipe = Schedule::new(id(0), ScheduleTarget::Duty, vec![1.0]).unwrap();
        assert!(matches!(
            on_pipe.check(&net),
            Err(SimError::Configuration { .. })
        ));
        let outflow_on_hx = Schedule::new(id(1), ScheduleTarget::Outflow, vec![1.0]).unwrap();
        assert!(outflow_on_hx.check(&net).is_err());
        let missing = Schedule::new(id(9), ScheduleTarget::Duty, vec![1.0]).unwrap();
        assert!(missing.check(&net).is_err());
    }

    proptest! {
        #[test]
        fn value_at_indexes_then_holds_last(
            values in prop::collection::vec(-1.0e4f64..1.0e4, 1..8),
            step in 0usize..20,
        ) {
            let s = Schedule::new(id(1), ScheduleTarget::Duty, values.clone()).unwrap();
            let expected = values[step.min(values.len() - 1)];
            prop_assert_eq!(s.value_at(step), expected);
        }
    }
}
