//! Phase labels and the quality sentinel.

use core::fmt;

/// Quality value meaning "not specified, infer the phase from (P, T)".
///
/// Matches what CoolProp reports as the quality of a single-phase state.
pub const QUALITY_UNSPECIFIED: f64 = -1.0;

/// Phase reported by a provider for a (P, T) state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Gas,
    /// Anything else the backend reports (two-phase, supercritical, critical point...).
    Other(String),
}

impl Phase {
    pub fn label(&self) -> &str {
        match self {
            Phase::Liquid => "liquid",
            Phase::Gas => "gas",
            Phase::Other(name) => name,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
