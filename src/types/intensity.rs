use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mangrove health/density reported alongside a location
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown intensity {0:?}, expected low, medium or high")]
pub struct UnknownIntensity(pub String);

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Intensity::Low => "Sparse, unhealthy",
            Intensity::Medium => "Moderate coverage",
            Intensity::High => "Dense, healthy",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = UnknownIntensity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intensity::ALL
            .into_iter()
            .find(|intensity| intensity.as_str() == s)
            .ok_or_else(|| UnknownIntensity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_the_three_values() {
        assert_eq!("low".parse(), Ok(Intensity::Low));
        assert_eq!("medium".parse(), Ok(Intensity::Medium));
        assert_eq!("high".parse(), Ok(Intensity::High));
        assert_eq!(
            "High".parse::<Intensity>(),
            Err(UnknownIntensity("High".to_string()))
        );
        assert!("".parse::<Intensity>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Intensity::High).unwrap(), "\"high\"");
        let parsed: Intensity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Intensity::Medium);
        assert!(serde_json::from_str::<Intensity>("\"extreme\"").is_err());
    }
}
