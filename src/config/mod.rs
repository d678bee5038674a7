mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from(&config_path).await?;

    if let Ok(model_path) = env::var("MODEL_PATH") {
        debug!("Model artifact path overridden by MODEL_PATH: {}", model_path);
        config.model.artifact_path = model_path;
    }

    Ok(config)
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

/// Parses and validates a YAML configuration document.
pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let fare = &self.fare;
        if !fare.mileage_floor.is_finite() || !fare.mileage_ceiling.is_finite() {
            return Err(Error::config("fare mileage band must be finite"));
        }
        if !(fare.mileage_floor > 0.0) {
            return Err(Error::config("fare.mileage_floor must be positive"));
        }
        if fare.mileage_floor > fare.mileage_ceiling {
            return Err(Error::config(format!(
                "fare.mileage_floor ({}) exceeds fare.mileage_ceiling ({})",
                fare.mileage_floor, fare.mileage_ceiling
            )));
        }
        if !(fare.minimum_fare >= 0.0) || !fare.minimum_fare.is_finite() {
            return Err(Error::config(
                "fare.minimum_fare must be finite and not negative",
            ));
        }

        let depreciation = &self.depreciation;
        if !(depreciation.resale_discount > 0.0) {
            return Err(Error::config(
                "depreciation.resale_discount must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&depreciation.default_ratio) {
            return Err(Error::config(
                "depreciation.default_ratio must be within [0, 1]",
            ));
        }
        let floors = &depreciation.floors;
        for (name, floor) in [
            ("hatchback", floors.hatchback),
            ("sedan", floors.sedan),
            ("suv", floors.suv),
        ] {
            if !(floor > 0.0) {
                return Err(Error::config(format!(
                    "depreciation.floors.{name} must be positive"
                )));
            }
        }

        if let Some(lookup) = &self.specs_lookup {
            if lookup.url.trim().is_empty() {
                return Err(Error::config("specs_lookup.url must not be empty"));
            }
        }

        Ok(())
    }
}
