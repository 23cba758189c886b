//! cl-core: shared foundation for co2loop.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, open-interval and convergence helpers, finiteness checks)
//! - ids (compact element ids for the roster)
//! - error (shared error type and the failure taxonomy)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{ClError, ClResult, FailureKind};
pub use ids::*;
pub use numeric::*;
pub use units::*;
