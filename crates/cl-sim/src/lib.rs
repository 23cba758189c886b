//! Time stepping of the refrigeration loop.
//!
//! Provides:
//! - Central and substation accumulator tanks (mass + internal energy storage)
//! - `Network`: ordered element roster with peer wiring resolved once
//! - Per-step schedules for exchanger duty and substation outflow
//! - Trace sinks that observe every element update
//! - `run_sim`: the fixed-step loop with halt or skip failure policies

pub mod element;
pub mod error;
pub mod network;
pub mod schedule;
pub mod sim;
pub mod tank;
pub mod tank_central;
pub mod tank_substation;
pub mod trace;

pub use element::{Element, ElementKind};
pub use error::{SimError, SimResult, StepFailure};
pub use network::Network;
pub use schedule::{Schedule, ScheduleTarget};
pub use sim::{FailurePolicy, SimOptions, SimReport, run_sim};
pub use tank::TankState;
pub use tank_central::TankCentral;
pub use tank_substation::TankSubstation;
pub use trace::{NullSink, TraceRecorder, TraceSample, TraceSink};
