use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::phonetics::FeatureVector;

/// Assets bundled into the binary: the default model artifact and the
/// labeled training corpus.
pub(crate) static DATA_DIR: Dir = include_dir!("src/data");

/// Keeps normalization finite for zero-variance feature columns.
pub(crate) const STD_EPSILON: f64 = 1e-10;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("model artifact describes {got} features, expected {expected}")]
    Dimension { expected: usize, got: usize },
}

/// A trained single-layer classifier plus the feature scaling captured at
/// training time.
///
/// Scores are sigmoid probabilities: 1.0 means trivially pronounceable,
/// 0.0 means a tongue twister.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptronModel {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub feature_means: Vec<f64>,
    pub feature_stds: Vec<f64>,
}

impl PerceptronModel {
    /// Parse the artifact bundled with the crate.
    pub fn embedded_default() -> Self {
        let file = DATA_DIR
            .get_file("default_model.json")
            .expect("Default model not found");

        let raw = file
            .contents_utf8()
            .expect("Unable to interpret default model as a string");

        let model: Self =
            serde_json::from_str(raw).expect("Unable to deserialize default model json");
        model
            .validate()
            .expect("Bundled default model has the wrong feature count");

        model
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let model: Self = serde_json::from_slice(&bytes)?;
        model.validate()?;
        log::info!("loaded model artifact from {}", path.display());
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ModelError> {
        for len in [
            self.weights.len(),
            self.feature_means.len(),
            self.feature_stds.len(),
        ] {
            if len != FeatureVector::DIM {
                return Err(ModelError::Dimension {
                    expected: FeatureVector::DIM,
                    got: len,
                });
            }
        }
        Ok(())
    }

    /// Probability in (0, 1) that the word is easy to pronounce.
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        let values = features.to_array();
        let mut activation = self.bias;
        for i in 0..FeatureVector::DIM {
            let normalized = (values[i] - self.feature_means[i]) / (self.feature_stds[i] + STD_EPSILON);
            activation += self.weights[i] * normalized;
        }
        sigmoid(activation)
    }

    /// Relative share of the decision each feature carries.
    pub fn feature_importance(&self) -> Vec<(&'static str, f64)> {
        let total: f64 = self.weights.iter().map(|weight| weight.abs()).sum();

        FeatureVector::NAMES
            .iter()
            .zip(&self.weights)
            .map(|(name, weight)| {
                let share = if total > 0.0 {
                    weight.abs() / total
                } else {
                    1.0 / FeatureVector::DIM as f64
                };
                (*name, share)
            })
            .collect()
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
