use axum::Router;
use fare_estimator::{
    Result,
    config::{self, Config, FeatureLayout},
    model::{LinearModel, MileageModel, synthetic},
    server::{self, AppState},
    specs::{CarQuery, CarSpecsLookup},
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8000
  logs:
    level: "debug"

model:
  source: synthetic
  layout: categorical

fare:
  mileage_floor: 8
  mileage_ceiling: 22
  minimum_fare: 40

depreciation:
  resale_discount: 0.9
  default_ratio: 1.0
  floors:
    hatchback: 23
    sedan: 20
    suv: 16

specs_lookup:
  url: "http://127.0.0.1:8001/get-car-info"
  timeout_secs: 5
"#;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    config::parse(
        r#"
server:
  host: "127.0.0.1"
  port: 8000
"#,
    )
    .expect("test config must parse")
}

/// A linear model that always predicts `mileage`, whatever the features.
pub fn constant_model(mileage: f64) -> Arc<dyn MileageModel> {
    Arc::new(
        LinearModel::new(FeatureLayout::Categorical, mileage, vec![0.0; 5])
            .expect("constant model is valid"),
    )
}

/// Build the application router around the given collaborators.
pub fn create_test_app(
    config: &Config,
    model: Option<Arc<dyn MileageModel>>,
    specs: Option<Arc<dyn CarSpecsLookup>>,
) -> Router {
    server::router(AppState::new(config, model, specs))
}

/// Router with a constant 10 km/l model and no specs lookup.
pub fn create_default_app() -> Router {
    create_test_app(&create_test_config(), Some(constant_model(10.0)), None)
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Fit a synthetic model and persist it as an artifact in `dir`.
pub async fn create_model_artifact(dir: &TempDir, layout: FeatureLayout) -> Result<String> {
    let path = dir.path().join("fare_model.json");
    let samples = synthetic::dataset(layout);
    LinearModel::fit(layout, &samples)?.save(&path).await?;
    Ok(path.to_string_lossy().to_string())
}

pub fn sample_car_query() -> CarQuery {
    CarQuery {
        car_name: "Maruti".to_string(),
        model: "Dzire".to_string(),
        year: "2022".to_string(),
        fuel_type: "petrol".to_string(),
        variant: "ZXI".to_string(),
    }
}
