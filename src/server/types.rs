use crate::{estimator::PoolFareEstimate, specs::CarQuery};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PredictFareRequest {
    pub trip_distance_km: f64,
    #[serde(default)]
    pub claimed_mileage_kmpl: Option<f64>,
    pub fuel_price_per_litre: f64,
    pub vehicle_age: u32,
    #[serde(default)]
    pub car_type: Option<String>,
    #[serde(default)]
    pub ride_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PoolFareRequest {
    pub trip_distance_km: f64,
    pub fuel_price_per_litre: f64,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default = "default_fare_modifier")]
    pub fare_modifier: f64,
    #[serde(default)]
    pub depreciation_ratio: Option<f64>,
    #[serde(default)]
    pub car_type: Option<String>,
    pub predicted_price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub claimed_mileage_kmpl: Option<f64>,
    #[serde(default)]
    pub car: Option<CarQuery>,
}

#[derive(Debug, Serialize)]
pub struct PoolFareResponse {
    pub car_type: Option<String>,
    pub depreciation_ratio: f64,
    #[serde(flatten)]
    pub estimate: PoolFareEstimate,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub loaded: bool,
    pub source: String,
    pub layout: String,
    pub features: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn default_passengers() -> u32 {
    1
}

fn default_fare_modifier() -> f64 {
    1.0
}
