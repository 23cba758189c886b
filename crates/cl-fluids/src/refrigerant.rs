//! Refrigerant catalog.

use core::fmt;
use core::str::FromStr;

use crate::error::FluidError;

/// Pure refrigerants the loop can be filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Refrigerant {
    /// Carbon dioxide (R744)
    #[default]
    R744,
    /// 1,1,1,2-Tetrafluoroethane
    R134a,
    /// Ammonia (R717)
    R717,
    /// Propane (R290)
    R290,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 4] = [
        Refrigerant::R744,
        Refrigerant::R134a,
        Refrigerant::R717,
        Refrigerant::R290,
    ];

    /// ASHRAE designation, used as the key in project files.
    pub fn key(&self) -> &'static str {
        match self {
            Refrigerant::R744 => "R744",
            Refrigerant::R134a => "R134a",
            Refrigerant::R717 => "R717",
            Refrigerant::R290 => "R290",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Refrigerant::R744 => "Carbon Dioxide",
            Refrigerant::R134a => "R134a",
            Refrigerant::R717 => "Ammonia",
            Refrigerant::R290 => "Propane",
        }
    }

    /// Critical temperature [K]. Above it there is no saturation curve.
    pub fn critical_temperature(&self) -> f64 {
        match self {
            Refrigerant::R744 => 304.1282,
            Refrigerant::R134a => 374.21,
            Refrigerant::R717 => 405.40,
            Refrigerant::R290 => 369.89,
        }
    }

    /// Critical pressure [Pa].
    pub fn critical_pressure(&self) -> f64 {
        match self {
            Refrigerant::R744 => 7.3773e6,
            Refrigerant::R134a => 4.0593e6,
            Refrigerant::R717 => 11.333e6,
            Refrigerant::R290 => 4.2512e6,
        }
    }

    /// Triple-point temperature [K].
    pub fn triple_temperature(&self) -> f64 {
        match self {
            Refrigerant::R744 => 216.592,
            Refrigerant::R134a => 169.85,
            Refrigerant::R717 => 195.495,
            Refrigerant::R290 => 85.525,
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Refrigerant::R744 => Pure::CarbonDioxide,
            Refrigerant::R134a => Pure::R134a,
            Refrigerant::R717 => Pure::Ammonia,
            Refrigerant::R290 => Pure::nPropane,
        }
    }
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Refrigerant {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "R744" | "CO2" | "CARBONDIOXIDE" => Ok(Refrigerant::R744),
            "R134A" => Ok(Refrigerant::R134a),
            "R717" | "NH3" | "AMMONIA" => Ok(Refrigerant::R717),
            "R290" | "PROPANE" => Ok(Refrigerant::R290),
            _ => Err(FluidError::NotSupported {
                what: "unknown refrigerant",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("R744".parse::<Refrigerant>().unwrap(), Refrigerant::R744);
        assert_eq!("co2".parse::<Refrigerant>().unwrap(), Refrigerant::R744);
        assert_eq!("r134a".parse::<Refrigerant>().unwrap(), Refrigerant::R134a);
        assert_eq!("NH3".parse::<Refrigerant>().unwrap(), Refrigerant::R717);
        assert!("R22".parse::<Refrigerant>().is_err());
    }

    #[test]
    fn keys_round_trip() {
        for r in Refrigerant::ALL {
            assert_eq!(r.key().parse::<Refrigerant>().unwrap(), r);
        }
    }

    #[test]
    fn triple_below_critical() {
        for r in Refrigerant::ALL {
            assert!(r.triple_temperature() < r.critical_temperature());
        }
    }
}
