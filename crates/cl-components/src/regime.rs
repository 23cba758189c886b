//! Regime classification and dispatch shared by every element.
//!
//! An inbound quality within `REGIME_TOLERANCE` of 0 is liquid, within it of 1 is gas.
//! The sentinel `QUALITY_UNSPECIFIED` defers to the provider's phase at `(P, T)`.
//! Anything else (an explicit two-phase quality such as 0.5) has no element path.

use crate::error::{ComponentError, ComponentResult};
use crate::flow::{FlowState, QUALITY_UNSPECIFIED};
use cl_core::numeric::within_open;
use cl_fluids::{Phase, PropertyProvider};

/// Absolute tolerance around 0 and 1 for the liquid and gas regimes (open interval).
pub const REGIME_TOLERANCE: f64 = 1e-4;

/// Single-phase regime an element computes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    Liquid,
    Gas,
}

impl Regime {
    /// Quality handed to the element path once the regime is resolved.
    pub fn quality(self) -> f64 {
        match self {
            Regime::Liquid => 0.0,
            Regime::Gas => 1.0,
        }
    }
}

/// Resolve the regime of an inbound flow.
pub fn classify(fluid: &dyn PropertyProvider, inlet: &FlowState) -> ComponentResult<Regime> {
    let q = inlet.quality;
    if within_open(q, 0.0, REGIME_TOLERANCE) {
        return Ok(Regime::Liquid);
    }
    if within_open(q, 1.0, REGIME_TOLERANCE) {
        return Ok(Regime::Gas);
    }
    if q == QUALITY_UNSPECIFIED {
        return match fluid.phase(inlet.pressure, inlet.temperature)? {
            Phase::Liquid => Ok(Regime::Liquid),
            Phase::Gas => Ok(Regime::Gas),
            Phase::Other(phase) => Err(ComponentError::UnresolvedPhase { phase }),
        };
    }
    Err(ComponentError::UnhandledRegime { quality: q })
}

/// The two computations an element offers, one per regime.
pub trait RegimePaths {
    fn liquid_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState>;

    fn gas_path(
        &mut self,
        fluid: &dyn PropertyProvider,
        inlet: &FlowState,
    ) -> ComponentResult<FlowState>;
}

/// Validate `inlet`, classify it and run the matching path.
///
/// The path sees the inlet with its quality replaced by the resolved regime's (0 or 1).
pub fn dispatch<E: RegimePaths + ?Sized>(
    element: &mut E,
    fluid: &dyn PropertyProvider,
    inlet: &FlowState,
) -> ComponentResult<FlowState> {
    inlet.validate()?;
    let regime = classify(fluid, inlet)?;
    let resolved = inlet.with_quality(regime.quality());
    match regime {
        Regime::Liquid => element.liquid_path(fluid, &resolved),
        Regime::Gas => element.gas_path(fluid, &resolved),
    }
}
