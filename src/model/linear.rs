use super::MileageModel;
use crate::{Error, Result, config::FeatureLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A fitted sample: feature vector and observed mileage.
pub type Sample = (Vec<f64>, f64);

/// Ordinary least squares regression, persisted as a JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub layout: FeatureLayout,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(layout: FeatureLayout, intercept: f64, coefficients: Vec<f64>) -> Result<Self> {
        let model = Self {
            layout,
            intercept,
            coefficients,
        };
        model.check()?;
        Ok(model)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading mileage model artifact from: {}", path.display());

        let raw = tokio::fs::read_to_string(path).await?;
        let model: Self = serde_json::from_str(&raw)?;
        model.check()?;

        info!(
            "Loaded {:?} mileage model with {} coefficients",
            model.layout,
            model.coefficients.len()
        );
        Ok(model)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }

    /// Fits intercept and coefficients by solving the normal equations.
    pub fn fit(layout: FeatureLayout, samples: &[Sample]) -> Result<Self> {
        let width = layout.width();
        if samples.len() <= width {
            return Err(Error::model(format!(
                "need more than {} samples to fit {} features, got {}",
                width,
                width,
                samples.len()
            )));
        }

        // Column 0 is the intercept.
        let dim = width + 1;
        let mut gram = vec![vec![0.0; dim]; dim];
        let mut moment = vec![0.0; dim];

        for (features, target) in samples {
            if features.len() != width {
                return Err(Error::model(format!(
                    "sample has {} features, expected {}",
                    features.len(),
                    width
                )));
            }
            let row: Vec<f64> = std::iter::once(1.0).chain(features.iter().copied()).collect();
            for i in 0..dim {
                moment[i] += row[i] * target;
                for j in 0..dim {
                    gram[i][j] += row[i] * row[j];
                }
            }
        }

        let solution = solve(gram, moment)?;
        debug!("Fitted linear mileage model: {:?}", solution);

        Self::new(layout, solution[0], solution[1..].to_vec())
    }

    fn check(&self) -> Result<()> {
        if self.coefficients.len() != self.layout.width() {
            return Err(Error::model(format!(
                "{:?} layout expects {} coefficients, artifact has {}",
                self.layout,
                self.layout.width(),
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::model("artifact contains non-finite parameters"));
        }
        Ok(())
    }
}

impl MileageModel for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(Error::model(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }

    fn layout(&self) -> FeatureLayout {
        self.layout
    }
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = (0..n).map(|i| a[i][i].abs()).fold(0.0, f64::max);
    let tolerance = scale.max(1.0) * 1e-10;
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < tolerance {
            return Err(Error::model(
                "training features are collinear; cannot fit model",
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
