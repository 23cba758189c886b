use core::fmt;
use thiserror::Error;

pub type ClResult<T> = Result<T, ClError>;

#[derive(Error, Debug)]
pub enum ClError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },
}

impl ClError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NonFinite { .. } | Self::NotPositive { .. } => FailureKind::PhysicalRange,
        }
    }
}

/// Failure classes reported for a simulation step or a setup problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// Missing or duplicate peer element, invalid construction parameters.
    Configuration,
    /// An iterative solver ran out of iterations or lost its bracket.
    Convergence,
    /// Out-of-domain property input or non-physical intermediate.
    PhysicalRange,
    /// Inbound quality is neither liquid, gas, nor a resolvable sentinel.
    UnhandledRegime,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Convergence => "convergence",
            Self::PhysicalRange => "physical-range",
            Self::UnhandledRegime => "unhandled-regime",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
