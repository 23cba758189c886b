//! Ordered element roster with peer wiring.
//!
//! A central tank needs the geometry of the loop's pipe and the pressure of the
//! substation tank. Both peers are resolved once when the network is built; the
//! roster must then hold exactly one of each.

use crate::element::{Element, ElementKind};
use crate::error::{SimError, SimResult, StepFailure};
use crate::trace::{TraceSample, TraceSink};
use cl_components::FlowState;
use cl_core::ElementId;
use cl_core::units::Pressure;
use cl_fluids::PropertyProvider;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Network {
    elements: Vec<Element>,
    ids: Vec<ElementId>,
    /// Roster index of the substation a central tank reads, when one is wired
    substation: Option<usize>,
}

fn unique_peer(elements: &[Element], kind: ElementKind) -> SimResult<usize> {
    let found: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind() == kind)
        .map(|(i, _)| i)
        .collect();
    match found.as_slice() {
        [index] => Ok(*index),
        [] => Err(SimError::configuration(format!(
            "central tank requires a {} but the network has none",
            kind
        ))),
        many => Err(SimError::configuration(format!(
            "central tank requires exactly one {} but the network has {}",
            kind,
            many.len()
        ))),
    }
}

impl Network {
    pub fn new(mut elements: Vec<Element>) -> SimResult<Self> {
        if elements.is_empty() {
            return Err(SimError::configuration("network has no elements"));
        }
        let ids = (0..elements.len())
            .map(ElementId::from_index)
            .collect::<Option<Vec<_>>>()
            .ok_or(SimError::InvalidArg {
                what: "too many elements",
            })?;

        let has_central = elements
            .iter()
            .any(|e| e.kind() == ElementKind::TankCentral);
        let mut substation = None;
        if has_central {
            let pipe = unique_peer(&elements, ElementKind::Pipe)?;
            let sub = unique_peer(&elements, ElementKind::TankSubstation)?;
            let geometry = match &elements[pipe] {
                Element::Pipe(p) => p.geometry(),
                _ => return Err(SimError::configuration("pipe lookup mismatch")),
            };
            for element in &mut elements {
                if let Element::TankCentral(tank) = element {
                    tank.connect_outlet(geometry);
                }
            }
            substation = Some(sub);
        }

        Ok(Self {
            elements,
            ids,
            substation,
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    /// First element with the given name.
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.name() == name)
            .map(|i| self.ids[i])
    }

    fn substation_pressure(&self) -> Option<Pressure> {
        match self.substation.map(|i| &self.elements[i]) {
            Some(Element::TankSubstation(t)) => Some(t.pressure()),
            _ => None,
        }
    }

    /// Run every element once, in roster order, starting from `inlet`.
    ///
    /// Samples reach `sink` only if the whole step succeeds. On failure, elements
    /// before the failing one have already been updated; callers that continue must
    /// restore a snapshot.
    pub fn step(
        &mut self,
        fluid: &dyn PropertyProvider,
        step: usize,
        inlet: FlowState,
        sink: &mut dyn TraceSink,
    ) -> Result<FlowState, StepFailure> {
        let mut samples = Vec::with_capacity(self.elements.len());
        let mut flow = inlet;

        for index in 0..self.elements.len() {
            let id = self.ids[index];
            let p_sub = self.substation_pressure();
            let element = &mut self.elements[index];
            if let (Element::TankCentral(tank), Some(p)) = (&mut *element, p_sub) {
                tank.set_substation_pressure(p);
            }

            match element.as_flow_element_mut().update(fluid, &flow) {
                Ok(out) => {
                    debug!(
                        step,
                        element = %element.name(),
                        kind = %element.kind(),
                        "element updated"
                    );
                    samples.push(TraceSample {
                        step,
                        element: id,
                        name: element.name().to_string(),
                        kind: element.kind(),
                        inlet: flow,
                        outlet: out,
                        tank: element.tank_state(),
                    });
                    flow = out;
                }
                Err(e) => {
                    return Err(StepFailure {
                        step,
                        element: id,
                        element_name: element.name().to_string(),
                        kind: e.kind(),
                        inlet: flow,
                        message: e.to_string(),
                    });
                }
            }
        }

        for sample in samples {
            sink.record(sample);
        }
        Ok(flow)
    }
}
