use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarType {
    #[serde(alias = "Hatch")]
    Hatchback,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RideType {
    Shared,
    Exclusive,
}

impl FromStr for CarType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hatch" | "hatchback" => Ok(Self::Hatchback),
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            other => Err(Error::invalid_input(format!("unknown car type: '{other}'"))),
        }
    }
}

impl FromStr for RideType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "exclusive" => Ok(Self::Exclusive),
            other => Err(Error::invalid_input(format!("unknown ride type: '{other}'"))),
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hatchback => write!(f, "Hatchback"),
            Self::Sedan => write!(f, "Sedan"),
            Self::Suv => write!(f, "SUV"),
        }
    }
}

impl fmt::Display for RideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "Shared"),
            Self::Exclusive => write!(f, "Exclusive"),
        }
    }
}

/// Rounds to two decimal places, the precision every fare is reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
