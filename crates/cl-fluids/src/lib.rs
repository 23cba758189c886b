//! cl-fluids: refrigerant property evaluation for co2loop.
//!
//! Provides:
//! - Refrigerant catalog (R744 and a few pure alternatives)
//! - `PropertyProvider` trait: the only way the rest of the workspace sees the fluid
//! - CoolProp backend for real-fluid properties
//! - `SaturationSurrogate`, an analytic backend for offline runs and deterministic tests
//!
//! # Architecture
//!
//! Every element of the loop queries properties as functions of two state variables
//! (`T`+quality on the saturation curve, `T`+`P` or `h`+`P` off it). The
//! `PropertyProvider` trait keeps those queries behind one interface so that the
//! solvers, elements and tanks never name a backend.
//!
//! # Example
//!
//! ```no_run
//! use cl_core::units::k;
//! use cl_fluids::{CoolPropModel, PropertyProvider, Refrigerant};
//!
//! let model = CoolPropModel::new(Refrigerant::R744).unwrap();
//! let rho_liq = model.density(k(280.0), 0.0).unwrap();
//! println!("Saturated liquid density: {} kg/m³", rho_liq.value);
//! ```

pub mod coolprop;
pub mod error;
pub mod model;
pub mod phase;
pub mod refrigerant;
pub mod surrogate;

pub use coolprop::CoolPropModel;
pub use error::{FluidError, FluidResult};
pub use model::{PropertyProvider, SaturationProps};
pub use phase::{Phase, QUALITY_UNSPECIFIED};
pub use refrigerant::Refrigerant;
pub use surrogate::SaturationSurrogate;
