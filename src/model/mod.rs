//! Pre-trained regression models loaded from a JSON artifact.
//!
//! The artifact is a tagged object (`"kind": "linear" | "tree" | "forest"`).
//! Every kind may publish the ordered feature names it was fitted on in
//! `feature_names_in`; when that is missing the caller has no schema to align
//! against.

pub mod linear;
pub mod tree;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PredictorError, Result};
use crate::types::FeatureVector;

pub use linear::LinearModel;
pub use tree::{ForestModel, TreeModel, TreeNode};

/// What the predictor needs from a trained model.
pub trait Regressor: Send + Sync {
    /// Predict a single value for one row of features.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Ordered feature names the model was fitted on, if it recorded them.
    fn expected_feature_names(&self) -> Option<&[String]>;

    /// Input width the model was fitted on.
    fn n_features(&self) -> Option<usize>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Tree(TreeModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::Tree(_) => "tree",
            ModelArtifact::Forest(_) => "forest",
        }
    }

    fn inner(&self) -> &dyn Regressor {
        match self {
            ModelArtifact::Linear(m) => m,
            ModelArtifact::Tree(m) => m,
            ModelArtifact::Forest(m) => m,
        }
    }

    /// Structural checks that would otherwise only show up at predict time.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            ModelArtifact::Linear(m) => m.validate()?,
            ModelArtifact::Tree(m) => m.validate()?,
            ModelArtifact::Forest(m) => m.validate()?,
        }

        if let (Some(names), Some(width)) = (self.expected_feature_names(), self.n_features()) {
            if names.len() != width {
                return Err(format!(
                    "feature_names_in lists {} names but the model was fitted on {} features",
                    names.len(),
                    width
                ));
            }
        }
        Ok(())
    }
}

impl Regressor for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        self.inner().predict(features)
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        self.inner().expected_feature_names()
    }

    fn n_features(&self) -> Option<usize> {
        self.inner().n_features()
    }
}

/// Parse an artifact from JSON text and validate it.
pub fn parse_model(json: &str) -> std::result::Result<ModelArtifact, String> {
    let artifact: ModelArtifact = serde_json::from_str(json).map_err(|e| e.to_string())?;
    artifact.validate()?;
    Ok(artifact)
}

/// Load the model artifact at `path`. Any failure is reported as
/// [`PredictorError::ModelUnavailable`].
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let shown = path.display().to_string();
    debug!(path = %shown, "reading model artifact");

    let content = fs::read_to_string(path).map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            "model file not found".to_string()
        } else {
            format!("failed to read model file: {}", e)
        };
        PredictorError::model_unavailable(&shown, reason)
    })?;

    let artifact = parse_model(&content)
        .map_err(|e| PredictorError::model_unavailable(&shown, format!("invalid model artifact: {}", e)))?;

    info!(
        path = %shown,
        kind = artifact.kind(),
        n_features = ?artifact.n_features(),
        has_feature_names = artifact.expected_feature_names().is_some(),
        "model artifact loaded"
    );
    Ok(artifact)
}

/// Shared input checks: width, feature names and finiteness.
pub(crate) fn check_input(
    features: &FeatureVector,
    width: usize,
    feature_names: Option<&[String]>,
) -> Result<Vec<f64>> {
    if features.len() != width {
        return Err(PredictorError::prediction_failure(
            format!(
                "X has {} features, but the model is expecting {} features as input",
                features.len(),
                width
            ),
            features.len(),
            Some(width),
        ));
    }

    if let Some(names) = feature_names {
        let mismatch = features
            .names()
            .iter()
            .zip(names)
            .position(|(got, want)| *got != want.as_str());
        if let Some(i) = mismatch {
            return Err(PredictorError::prediction_failure(
                format!(
                    "feature names must match those seen at fit time: column {} is '{}', expected '{}'",
                    i,
                    features.names()[i],
                    names[i]
                ),
                features.len(),
                Some(width),
            ));
        }
    }

    let values = features.values();
    if let Some((name, value)) = features.columns().iter().find(|(_, v)| !v.is_finite()) {
        return Err(PredictorError::prediction_failure(
            format!("input contains a non-finite value {} in column '{}'", value, name),
            features.len(),
            Some(width),
        ));
    }
    Ok(values)
}

/// Reject NaN or infinite model output.
pub(crate) fn check_output(prediction: f64, features: &FeatureVector, width: usize) -> Result<f64> {
    if prediction.is_finite() {
        Ok(prediction)
    } else {
        Err(PredictorError::prediction_failure(
            format!("model produced a non-finite prediction ({})", prediction),
            features.len(),
            Some(width),
        ))
    }
}
