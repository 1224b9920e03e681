use askama::Template;

use super::models::FailureView;
use crate::constants::{ExampleCountry, EXAMPLE_COUNTRIES, MAX_YEAR, MIN_YEAR};
use crate::predictor::{ModelStatus, PopulationPredictor, PredictionReport};
use crate::types::RawInput;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub input: RawInput,
    pub model_ready: bool,
    pub model_error: Option<String>,
    pub schema_features: usize,
    pub report: Option<PredictionReport>,
    pub failure: Option<FailureView>,
    pub examples: Vec<ExampleCountry>,
    pub min_year: i64,
    pub max_year: i64,
}

impl IndexTemplate {
    pub fn new(predictor: &PopulationPredictor, input: RawInput) -> Self {
        let (model_ready, model_error, schema_features) = match predictor.status() {
            ModelStatus::Ready { schema_features, .. } => (true, None, schema_features),
            ModelStatus::Unavailable { path, reason } => {
                (false, Some(format!("{} ({})", reason, path)), 0)
            }
        };
        Self {
            input,
            model_ready,
            model_error,
            schema_features,
            report: None,
            failure: None,
            examples: EXAMPLE_COUNTRIES.to_vec(),
            min_year: MIN_YEAR,
            max_year: MAX_YEAR,
        }
    }

    pub fn with_report(mut self, report: PredictionReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_failure(mut self, failure: FailureView) -> Self {
        self.failure = Some(failure);
        self
    }
}
