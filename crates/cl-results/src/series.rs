//! Per-element series extracted from a stored trace.

use crate::types::TraceRecord;
use crate::ResultsError;
use std::fmt;
use std::str::FromStr;

/// Quantity read from each trace record's outlet (or tank state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesVariable {
    MassFlow,
    Pressure,
    Temperature,
    Quality,
    /// Stored tank mass; absent for pipes and exchangers
    TankMass,
}

impl SeriesVariable {
    pub const ALL: [SeriesVariable; 5] = [
        Self::MassFlow,
        Self::Pressure,
        Self::Temperature,
        Self::Quality,
        Self::TankMass,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::MassFlow => "mass_flow",
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
            Self::Quality => "quality",
            Self::TankMass => "tank_mass",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::MassFlow => "kg/s",
            Self::Pressure => "Pa",
            Self::Temperature => "K",
            Self::Quality => "-",
            Self::TankMass => "kg",
        }
    }

    fn read(self, record: &TraceRecord) -> Option<f64> {
        let out = &record.outlet;
        match self {
            Self::MassFlow => Some(out.mass_flow_kg_s),
            Self::Pressure => Some(out.pressure_pa),
            Self::Temperature => Some(out.temperature_k),
            Self::Quality => Some(out.quality),
            Self::TankMass => record.tank.map(|t| t.mass_kg),
        }
    }
}

impl fmt::Display for SeriesVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SeriesVariable {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(v) = Self::ALL.into_iter().find(|v| v.key() == s) {
            return Ok(v);
        }
        // Short aliases.
        match s {
            "mdot_kg_s" => Ok(Self::MassFlow),
            "p_pa" => Ok(Self::Pressure),
            "t_k" => Ok(Self::Temperature),
            "x" => Ok(Self::Quality),
            "m_kg" => Ok(Self::TankMass),
            other => Err(ResultsError::UnknownVariable {
                name: other.to_string(),
            }),
        }
    }
}

/// `(step, value)` pairs for one element, in step order.
pub fn extract_series(
    records: &[TraceRecord],
    element_id: &str,
    variable: SeriesVariable,
) -> Vec<(usize, f64)> {
    records
        .iter()
        .filter(|r| r.element_id == element_id)
        .filter_map(|r| variable.read(r).map(|v| (r.step, v)))
        .collect()
}
