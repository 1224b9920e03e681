use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    /// The model artifact could not be located or loaded. Prediction is
    /// disabled but the form keeps working.
    #[error("Model unavailable ({path}): {reason}")]
    ModelUnavailable { path: String, reason: String },

    /// The model rejected the feature vector it was given.
    #[error("Prediction failed: {message}")]
    PredictionFailure {
        message: String,
        /// Shape of the vector handed to the model, as (rows, columns).
        input_shape: (usize, usize),
        /// Number of features the model expects, when it can tell us.
        expected_features: Option<usize>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictorError {
    pub fn model_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        PredictorError::ModelUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Failure for a single-row vector of `columns` features.
    pub fn prediction_failure(
        message: impl Into<String>,
        columns: usize,
        expected_features: Option<usize>,
    ) -> Self {
        PredictorError::PredictionFailure {
            message: message.into(),
            input_shape: (1, columns),
            expected_features,
        }
    }

    /// Debug lines shown next to a failed prediction.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            PredictorError::PredictionFailure {
                input_shape,
                expected_features,
                ..
            } => vec![
                format!("Input shape: ({}, {})", input_shape.0, input_shape.1),
                format!(
                    "Model expects: {} features",
                    expected_features
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "Unknown".to_string())
                ),
            ],
            _ => Vec::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_failure_reports_shape_and_expected_count() {
        let err = PredictorError::prediction_failure("width mismatch", 4, Some(7));
        assert_eq!(
            err.diagnostics(),
            vec![
                "Input shape: (1, 4)".to_string(),
                "Model expects: 7 features".to_string()
            ]
        );
    }

    #[test]
    fn unknown_expected_count_is_spelled_out() {
        let err = PredictorError::prediction_failure("bad", 2, None);
        assert_eq!(err.diagnostics()[1], "Model expects: Unknown features");
    }

    #[test]
    fn model_unavailable_has_no_diagnostics() {
        let err = PredictorError::model_unavailable("machine_model.json", "not found");
        assert!(err.diagnostics().is_empty());
        assert!(err.to_string().contains("machine_model.json"));
    }
}
