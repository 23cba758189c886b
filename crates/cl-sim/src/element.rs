//! The closed set of element kinds a loop is built from.

use crate::tank::TankState;
use crate::tank_central::TankCentral;
use crate::tank_substation::TankSubstation;
use cl_components::{Exchanger, FlowElement, Pipe};
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Pipe,
    Exchanger,
    TankCentral,
    TankSubstation,
}

impl ElementKind {
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Pipe => "pipe",
            ElementKind::Exchanger => "exchanger",
            ElementKind::TankCentral => "tank-central",
            ElementKind::TankSubstation => "tank-substation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug)]
pub enum Element {
    Pipe(Pipe),
    Exchanger(Exchanger),
    TankCentral(TankCentral),
    TankSubstation(TankSubstation),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Pipe(_) => ElementKind::Pipe,
            Element::Exchanger(_) => ElementKind::Exchanger,
            Element::TankCentral(_) => ElementKind::TankCentral,
            Element::TankSubstation(_) => ElementKind::TankSubstation,
        }
    }

    pub fn name(&self) -> &str {
        self.as_flow_element().name()
    }

    pub fn as_flow_element(&self) -> &dyn FlowElement {
        match self {
            Element::Pipe(e) => e,
            Element::Exchanger(e) => e,
            Element::TankCentral(e) => e,
            Element::TankSubstation(e) => e,
        }
    }

    pub fn as_flow_element_mut(&mut self) -> &mut dyn FlowElement {
        match self {
            Element::Pipe(e) => e,
            Element::Exchanger(e) => e,
            Element::TankCentral(e) => e,
            Element::TankSubstation(e) => e,
        }
    }

    /// Stored state, for the two tank kinds.
    pub fn tank_state(&self) -> Option<TankState> {
        match self {
            Element::TankCentral(t) => Some(*t.state()),
            Element::TankSubstation(t) => Some(*t.state()),
            Element::Pipe(_) | Element::Exchanger(_) => None,
        }
    }
}

impl From<Pipe> for Element {
    fn from(e: Pipe) -> Self {
        Element::Pipe(e)
    }
}

impl From<Exchanger> for Element {
    fn from(e: Exchanger) -> Self {
        Element::Exchanger(e)
    }
}

impl From<TankCentral> for Element {
    fn from(e: TankCentral) -> Self {
        Element::TankCentral(e)
    }
}

impl From<TankSubstation> for Element {
    fn from(e: TankSubstation) -> Self {
        Element::TankSubstation(e)
    }
}
