use super::extract::extract_number_value;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies a car for the specs lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarQuery {
    pub car_name: String,
    pub model: String,
    pub year: String,
    pub fuel_type: String,
    pub variant: String,
}

/// Specs as returned by the lookup service: free text or numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCarSpecs {
    #[serde(default)]
    pub original_price: Value,
    #[serde(default)]
    pub company_claimed_mileage: Value,
    #[serde(default)]
    pub engine: Value,
    #[serde(default)]
    pub max_power: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarSpecs {
    pub original_price: f64,
    pub claimed_mileage_kmpl: f64,
    pub engine_cc: f64,
    pub max_power_bhp: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LookupResponse {
    Failure { error: String },
    Success { result: RawCarSpecs },
}

impl CarQuery {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("car_name", &self.car_name),
            ("model", &self.model),
            ("year", &self.year),
            ("fuel_type", &self.fuel_type),
            ("variant", &self.variant),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_input(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

impl TryFrom<RawCarSpecs> for CarSpecs {
    type Error = Error;

    fn try_from(raw: RawCarSpecs) -> Result<Self> {
        let field = |value: &Value, name: &str| {
            extract_number_value(value).ok_or_else(|| Error::missing_spec(name))
        };

        Ok(Self {
            original_price: field(&raw.original_price, "original_price")?,
            claimed_mileage_kmpl: field(&raw.company_claimed_mileage, "company_claimed_mileage")?,
            engine_cc: field(&raw.engine, "engine")?,
            max_power_bhp: field(&raw.max_power, "max_power")?,
        })
    }
}
