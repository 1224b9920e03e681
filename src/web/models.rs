use axum::http::StatusCode;
use serde::Serialize;

use crate::error::PredictorError;
use crate::predictor::ModelStatus;

/// A failed prediction as shown on the form page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureView {
    pub title: String,
    pub message: String,
    pub diagnostics: Vec<String>,
}

impl From<&PredictorError> for FailureView {
    fn from(err: &PredictorError) -> Self {
        let title = match err {
            PredictorError::ModelUnavailable { .. } => "Model not available",
            PredictorError::PredictionFailure { .. } => "Something went wrong with the prediction",
            _ => "Unexpected error",
        };
        Self {
            title: title.to_string(),
            message: err.to_string(),
            diagnostics: err.diagnostics(),
        }
    }
}

impl FailureView {
    /// A submission that could not be parsed into a [`crate::types::RawInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            title: "Invalid input".to_string(),
            message: message.into(),
            diagnostics: Vec::new(),
        }
    }
}

/// JSON error body for `/api/predict`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl ApiError {
    pub fn from_predictor_error(err: &PredictorError) -> (StatusCode, Self) {
        let (status, kind) = match err {
            PredictorError::ModelUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable")
            }
            PredictorError::PredictionFailure { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "prediction_failure")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        (
            status,
            Self {
                error: kind,
                message: err.to_string(),
                diagnostics: err.diagnostics(),
            },
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: ModelStatus,
}
