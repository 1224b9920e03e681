//! Bodies of the `predict` and `schema` subcommands. They return the lines to
//! print so `main` only handles I/O and the exit status.

use tracing::error;

use crate::error::{PredictorError, Result};
use crate::predictor::{ModelStatus, PopulationPredictor, PredictionReport};
use crate::types::RawInput;

pub struct PredictOutcome {
    pub lines: Vec<String>,
    pub result: Result<PredictionReport>,
}

/// Startup banner when the model could not be loaded.
pub fn status_lines(predictor: &PopulationPredictor) -> Vec<String> {
    match predictor.status() {
        ModelStatus::Ready { .. } => Vec::new(),
        ModelStatus::Unavailable { path, reason } => vec![
            format!("❌ Model not available ({}): {}", path, reason),
            format!("   Make sure '{}' is in the working directory.", path),
        ],
    }
}

pub fn run_predict(predictor: &PopulationPredictor, input: &RawInput) -> PredictOutcome {
    let mut lines = vec!["🔍 Your Input".to_string()];
    for (label, value) in input.echo() {
        lines.push(format!("   {}: {}", label, value));
    }

    let result = predictor.predict(input);
    match &result {
        Ok(report) => {
            lines.push(String::new());
            lines.push("🎉 Prediction Complete!".to_string());
            lines.push(format!("🏘️  Predicted Population: {}", report.formatted));
            lines.push(format!("💡 {}", report.summary));
        }
        Err(err) => {
            error!("prediction failed: {}", err);
            lines.push(String::new());
            lines.push(format!("❌ Something went wrong with the prediction: {}", err));
            if matches!(err, PredictorError::PredictionFailure { .. }) {
                lines.push("Debug Info:".to_string());
                lines.extend(err.diagnostics().into_iter().map(|d| format!("   - {}", d)));
            }
        }
    }

    PredictOutcome { lines, result }
}

pub fn schema_lines(predictor: &PopulationPredictor) -> Vec<String> {
    let schema = predictor.schema();
    if schema.is_empty() {
        return vec!["Model publishes no feature names; inputs are passed unaligned.".to_string()];
    }
    let mut lines = vec![format!("Model expects {} features:", schema.len())];
    lines.extend(schema.names().iter().map(|name| format!("   {}", name)));
    lines
}
