//! cl-components: flow elements of the refrigeration loop.
//!
//! Provides:
//! - `FlowState`, the (mass flow, pressure, temperature, quality) tuple passed between elements
//! - The regime dispatcher shared by every element
//! - `Pipe` with a Colebrook-White pressure drop
//! - `Exchanger` applying a fixed thermal duty
//!
//! # Example
//!
//! ```no_run
//! use cl_components::{FlowElement, FlowState, Pipe};
//! use cl_core::units::m;
//! use cl_fluids::{CoolPropModel, Refrigerant};
//!
//! let fluid = CoolPropModel::new(Refrigerant::R744).unwrap();
//! let mut pipe = Pipe::new("supply", m(5.0), m(0.02), m(1e-5)).unwrap();
//! let inlet = FlowState::from_si(0.1, 5e6, 280.0, 0.0);
//! let outlet = pipe.update(&fluid, &inlet).unwrap();
//! println!("Outlet pressure: {} Pa", outlet.pressure.value);
//! ```

pub mod common;
pub mod error;
pub mod exchanger;
pub mod flow;
pub mod pipe;
pub mod regime;
pub mod traits;

pub use error::{ComponentError, ComponentResult};
pub use exchanger::Exchanger;
pub use flow::FlowState;
pub use pipe::{Pipe, PipeGeometry};
pub use regime::{REGIME_TOLERANCE, Regime, RegimePaths, classify, dispatch};
pub use traits::FlowElement;
