//! Unit handling
//!
//! CAM sources declare either metric or imperial coordinates. Loaders
//! normalize every primitive to millimetres and record the source units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Coordinate units declared by a CAM source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimetres
    Metric,
    /// Inches
    Imperial,
}

impl Default for Units {
    fn default() -> Self {
        Self::Metric
    }
}

impl Units {
    /// Scale factor converting a value in these units to millimetres.
    pub fn mm_scale(self) -> f64 {
        match self {
            Self::Metric => 1.0,
            Self::Imperial => MM_PER_INCH,
        }
    }

    /// Convert a value in these units to millimetres.
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.mm_scale()
    }

    /// Unit label ("mm" or "in").
    pub fn label(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mm() {
        assert_eq!(Units::Metric.to_mm(10.5), 10.5);
        assert!((Units::Imperial.to_mm(1.0) - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("MM".parse::<Units>().unwrap(), Units::Metric);
        assert_eq!("inch".parse::<Units>().unwrap(), Units::Imperial);
        assert!("furlong".parse::<Units>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Units::Imperial).unwrap(), "\"imperial\"");
        let units: Units = serde_json::from_str("\"metric\"").unwrap();
        assert_eq!(units, Units::Metric);
    }
}
