//! Core trait for flow elements.

use crate::error::ComponentResult;
use crate::flow::FlowState;
use cl_fluids::PropertyProvider;

/// An element that turns an inbound flow into an outbound flow each step.
///
/// Implementors are expected to route through [`crate::regime::dispatch`] so the
/// inbound quality is classified the same way for every element.
pub trait FlowElement {
    /// Element name for logging and reports.
    fn name(&self) -> &str;

    /// Advance one step: `(mdot, p, T, quality)` in, `(mdot, p, T, quality)` out.
    fn update(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState>;
}
