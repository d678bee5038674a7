mod features;
mod linear;
pub mod synthetic;

pub use features::*;
pub use linear::*;

use crate::{
    Result,
    config::{FeatureLayout, ModelConfig, ModelSource},
};
use std::sync::Arc;
use tracing::info;

/// An opaque, read-only mileage regression.
#[cfg_attr(test, mockall::automock)]
pub trait MileageModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;

    fn layout(&self) -> FeatureLayout;
}

/// Builds the process-wide model once at startup.
pub async fn load(config: &ModelConfig) -> Result<Arc<dyn MileageModel>> {
    let model = match config.source {
        ModelSource::Artifact => LinearModel::load(&config.artifact_path).await?,
        ModelSource::Synthetic => {
            info!(
                "Fitting {:?} mileage model against synthetic dataset",
                config.layout
            );
            LinearModel::fit(config.layout, &synthetic::dataset(config.layout))?
        }
    };

    if model.layout != config.layout {
        return Err(crate::Error::model(format!(
            "artifact was fit for the {:?} layout but {:?} is configured",
            model.layout, config.layout
        )));
    }

    Ok(Arc::new(model))
}
