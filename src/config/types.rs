use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub fare: FareConfig,
    #[serde(default)]
    pub depreciation: DepreciationConfig,
    #[serde(default)]
    pub specs_lookup: Option<SpecsLookupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub source: ModelSource,
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,
    #[serde(default)]
    pub layout: FeatureLayout,
    #[serde(default)]
    pub factors: FactorConfig,
}

/// Where the mileage regression comes from at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// A persisted JSON artifact.
    #[default]
    Artifact,
    /// Fit in-process against the built-in synthetic dataset.
    Synthetic,
}

/// Order and meaning of the features handed to the regression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLayout {
    /// `[vehicle_age, traffic, ride_type, car_type, weather]`
    #[default]
    Categorical,
    /// `[trip_distance_km, claimed_mileage_kmpl, fuel_price_per_litre, vehicle_age]`
    Claimed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorConfig {
    #[serde(default)]
    pub car_type: CarTypeFactors,
    #[serde(default)]
    pub ride_type: RideTypeFactors,
    #[serde(default = "default_traffic_factor")]
    pub traffic: f64,
    #[serde(default = "default_weather_factor")]
    pub weather: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarTypeFactors {
    #[serde(default = "default_hatchback_factor")]
    pub hatchback: f64,
    #[serde(default = "default_sedan_factor")]
    pub sedan: f64,
    #[serde(default = "default_suv_factor")]
    pub suv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideTypeFactors {
    #[serde(default = "default_shared_factor")]
    pub shared: f64,
    #[serde(default = "default_exclusive_factor")]
    pub exclusive: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareConfig {
    #[serde(default = "default_mileage_floor")]
    pub mileage_floor: f64,
    #[serde(default = "default_mileage_ceiling")]
    pub mileage_ceiling: f64,
    #[serde(default = "default_minimum_fare")]
    pub minimum_fare: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationConfig {
    #[serde(default = "default_resale_discount")]
    pub resale_discount: f64,
    #[serde(default = "default_depreciation_ratio")]
    pub default_ratio: f64,
    #[serde(default)]
    pub floors: CategoryFloorConfig,
}

/// Minimum plausible mileage (km/l) per vehicle class after depreciation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFloorConfig {
    #[serde(default = "default_hatchback_floor")]
    pub hatchback: f64,
    #[serde(default = "default_sedan_floor")]
    pub sedan: f64,
    #[serde(default = "default_suv_floor")]
    pub suv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecsLookupConfig {
    pub url: String,
    #[serde(default = "default_lookup_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            source: ModelSource::default(),
            artifact_path: default_artifact_path(),
            layout: FeatureLayout::default(),
            factors: FactorConfig::default(),
        }
    }
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            car_type: CarTypeFactors::default(),
            ride_type: RideTypeFactors::default(),
            traffic: default_traffic_factor(),
            weather: default_weather_factor(),
        }
    }
}

impl Default for CarTypeFactors {
    fn default() -> Self {
        Self {
            hatchback: default_hatchback_factor(),
            sedan: default_sedan_factor(),
            suv: default_suv_factor(),
        }
    }
}

impl Default for RideTypeFactors {
    fn default() -> Self {
        Self {
            shared: default_shared_factor(),
            exclusive: default_exclusive_factor(),
        }
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            mileage_floor: default_mileage_floor(),
            mileage_ceiling: default_mileage_ceiling(),
            minimum_fare: default_minimum_fare(),
        }
    }
}

impl Default for DepreciationConfig {
    fn default() -> Self {
        Self {
            resale_discount: default_resale_discount(),
            default_ratio: default_depreciation_ratio(),
            floors: CategoryFloorConfig::default(),
        }
    }
}

impl Default for CategoryFloorConfig {
    fn default() -> Self {
        Self {
            hatchback: default_hatchback_floor(),
            sedan: default_sedan_floor(),
            suv: default_suv_floor(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_artifact_path() -> String {
    "fare_model.json".to_string()
}

fn default_traffic_factor() -> f64 {
    1.2
}

fn default_weather_factor() -> f64 {
    1.0
}

fn default_hatchback_factor() -> f64 {
    1.0
}

fn default_sedan_factor() -> f64 {
    1.1
}

fn default_suv_factor() -> f64 {
    1.2
}

fn default_shared_factor() -> f64 {
    1.0
}

fn default_exclusive_factor() -> f64 {
    1.2
}

fn default_mileage_floor() -> f64 {
    8.0
}

fn default_mileage_ceiling() -> f64 {
    25.0
}

fn default_minimum_fare() -> f64 {
    40.0
}

fn default_resale_discount() -> f64 {
    0.9
}

fn default_depreciation_ratio() -> f64 {
    1.0
}

fn default_hatchback_floor() -> f64 {
    23.0
}

fn default_sedan_floor() -> f64 {
    20.0
}

fn default_suv_floor() -> f64 {
    16.0
}

fn default_lookup_timeout_secs() -> u64 {
    10
}
