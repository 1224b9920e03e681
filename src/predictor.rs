use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::{PredictorError, Result};
use crate::features::align_or_passthrough;
use crate::metrics;
use crate::model::{load_model, Regressor};
use crate::types::{FeatureSchema, RawInput};

/// A model that loaded successfully, with its schema read once up front.
struct LoadedModel {
    regressor: Arc<dyn Regressor>,
    schema: FeatureSchema,
}

enum ModelState {
    Ready(LoadedModel),
    Unavailable { path: String, reason: String },
}

/// Whether predictions are possible, for status banners and health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModelStatus {
    Ready {
        /// Number of named features, 0 when the model publishes no schema.
        schema_features: usize,
        n_features: Option<usize>,
    },
    Unavailable { path: String, reason: String },
}

/// Everything shown to the user after a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub input: RawInput,
    pub prediction: f64,
    /// The estimate truncated toward zero.
    pub population: i64,
    /// `population` with thousands separators.
    pub formatted: String,
    pub summary: String,
    /// False when the model had no schema and the raw encoding was used.
    pub aligned: bool,
}

/// Owns the trained model for the lifetime of the process. Built once at
/// start-up and shared read-only between requests.
pub struct PopulationPredictor {
    state: ModelState,
}

impl PopulationPredictor {
    /// Load the artifact at `path`. Never fails: a load error is kept and
    /// every later prediction reports it as `ModelUnavailable`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match load_model(path) {
            Ok(model) => Self::from_regressor(Arc::new(model)),
            Err(PredictorError::ModelUnavailable { path, reason }) => {
                error!(%path, %reason, "model unavailable; prediction disabled");
                Self {
                    state: ModelState::Unavailable { path, reason },
                }
            }
            Err(other) => {
                let path = path.display().to_string();
                error!(%path, error = %other, "model unavailable; prediction disabled");
                Self {
                    state: ModelState::Unavailable {
                        path,
                        reason: other.to_string(),
                    },
                }
            }
        }
    }

    pub fn from_regressor(regressor: Arc<dyn Regressor>) -> Self {
        let schema = match regressor.expected_feature_names() {
            Some(names) => FeatureSchema::new(names.to_vec()),
            None => {
                warn!("model does not publish feature names; inputs will be passed unaligned");
                FeatureSchema::empty()
            }
        };
        info!(schema_features = schema.len(), "predictor ready");
        Self {
            state: ModelState::Ready(LoadedModel { regressor, schema }),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn status(&self) -> ModelStatus {
        match &self.state {
            ModelState::Ready(model) => ModelStatus::Ready {
                schema_features: model.schema.len(),
                n_features: model.regressor.n_features(),
            },
            ModelState::Unavailable { path, reason } => ModelStatus::Unavailable {
                path: path.clone(),
                reason: reason.clone(),
            },
        }
    }

    /// The cached feature schema; empty when unavailable.
    pub fn schema(&self) -> FeatureSchema {
        match &self.state {
            ModelState::Ready(model) => model.schema.clone(),
            ModelState::Unavailable { .. } => FeatureSchema::empty(),
        }
    }

    /// Align the input to the model's schema and predict.
    pub fn predict(&self, raw: &RawInput) -> Result<PredictionReport> {
        let model = match &self.state {
            ModelState::Ready(model) => model,
            ModelState::Unavailable { path, reason } => {
                metrics::record_model_unavailable();
                return Err(PredictorError::model_unavailable(path.clone(), reason));
            }
        };

        let _timing = metrics::time_operation(metrics::PREDICTION_DURATION_SECONDS);

        let (vector, aligned) = align_or_passthrough(raw, &model.schema);
        if !aligned {
            metrics::record_alignment_fallback();
        }

        let prediction = match model.regressor.predict(&vector) {
            Ok(prediction) => prediction,
            Err(err) => {
                metrics::record_prediction_failure();
                let err = with_expected_count(err, model);
                warn!(
                    error = %err,
                    shape = ?vector.shape(),
                    aligned,
                    "prediction failed"
                );
                return Err(err);
            }
        };

        let population = match whole_population(prediction) {
            Some(population) => population,
            None => {
                metrics::record_prediction_failure();
                let err = with_expected_count(
                    PredictorError::prediction_failure(
                        format!("estimate {} does not fit in a 64-bit integer", prediction),
                        vector.len(),
                        None,
                    ),
                    model,
                );
                warn!(error = %err, "prediction out of range");
                return Err(err);
            }
        };

        metrics::record_prediction();
        let formatted = format_population(population);
        info!(
            country_code = %raw.country_code,
            year = raw.year,
            population,
            "prediction complete"
        );

        Ok(PredictionReport {
            summary: summary_sentence(raw, &formatted),
            input: raw.clone(),
            prediction,
            population,
            formatted,
            aligned,
        })
    }
}

/// Prefer the schema length for "expected features"; fall back to whatever
/// the model reported.
fn with_expected_count(err: PredictorError, model: &LoadedModel) -> PredictorError {
    match err {
        PredictorError::PredictionFailure {
            message,
            input_shape,
            expected_features,
        } => PredictorError::PredictionFailure {
            message,
            input_shape,
            expected_features: if model.schema.is_empty() {
                expected_features.or_else(|| model.regressor.n_features())
            } else {
                Some(model.schema.len())
            },
        },
        other => other,
    }
}

/// Truncate toward zero; `None` when the result falls outside `i64`.
fn whole_population(prediction: f64) -> Option<i64> {
    // 2^63 is exactly representable, so the bounds are exact.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let whole = prediction.trunc();
    (whole >= -LIMIT && whole < LIMIT).then(|| whole as i64)
}

pub fn summary_sentence(raw: &RawInput, formatted: &str) -> String {
    format!(
        "The model predicts that {} will have approximately {} people in {}.",
        raw.country_name, formatted, raw.year
    )
}

/// Format an integer with comma thousands separators: `47564296` becomes
/// `47,564,296`.
pub fn format_population(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearModel, ModelArtifact};

    fn linear(names: Option<Vec<&str>>, coefficients: Vec<f64>, intercept: f64) -> Arc<dyn Regressor> {
        Arc::new(ModelArtifact::Linear(LinearModel {
            feature_names_in: names.map(|n| n.into_iter().map(String::from).collect()),
            coefficients,
            intercept,
        }))
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(47_564_296), "47,564,296");
        assert_eq!(format_population(-1200), "-1,200");
        assert_eq!(format_population(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn predicts_with_aligned_features() {
        let predictor = PopulationPredictor::from_regressor(linear(
            Some(vec!["date", "countryiso3code_KEN", "countryiso3code_USA"]),
            vec![1000.0, 40_000_000.0, 300_000_000.0],
            -2_000_000.0,
        ));
        let report = predictor.predict(&RawInput::default()).unwrap();
        assert!(report.aligned);
        assert_eq!(report.population, 40_020_000);
        assert_eq!(report.formatted, "40,020,000");
        assert_eq!(
            report.summary,
            "The model predicts that Kenya will have approximately 40,020,000 people in 2020."
        );
    }

    #[test]
    fn truncates_toward_zero() {
        let predictor = PopulationPredictor::from_regressor(linear(Some(vec!["date"]), vec![0.0], -12.9));
        assert_eq!(predictor.predict(&RawInput::default()).unwrap().population, -12);
    }

    #[test]
    fn estimates_beyond_i64_are_rejected_not_clamped() {
        // 1e16 * 2020 = 2.02e19, past i64::MAX.
        let predictor = PopulationPredictor::from_regressor(linear(Some(vec!["date"]), vec![1e16], 0.0));
        let err = predictor.predict(&RawInput::default()).unwrap_err();
        match err {
            PredictorError::PredictionFailure {
                message,
                input_shape,
                expected_features,
            } => {
                assert!(message.contains("64-bit"), "{}", message);
                assert_eq!(input_shape, (1, 1));
                assert_eq!(expected_features, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn whole_population_bounds() {
        assert_eq!(whole_population(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(whole_population(9_223_372_036_854_775_808.0), None);
        assert_eq!(whole_population(1.0e18 + 0.5), Some(1_000_000_000_000_000_000));
    }

    #[test]
    fn unaligned_fallback_surfaces_as_prediction_failure() {
        let predictor = PopulationPredictor::from_regressor(linear(None, vec![1.0, 1.0], 0.0));
        assert!(predictor.schema().is_empty());
        let err = predictor.predict(&RawInput::default()).unwrap_err();
        match err {
            PredictorError::PredictionFailure {
                input_shape,
                expected_features,
                ..
            } => {
                assert_eq!(input_shape, (1, 4));
                assert_eq!(expected_features, Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Still usable afterwards.
        assert!(predictor.is_ready());
    }

    #[test]
    fn unaligned_fallback_can_still_succeed() {
        let predictor = PopulationPredictor::from_regressor(linear(None, vec![1.0, 0.0, 0.0, 0.0], 0.0));
        let report = predictor.predict(&RawInput::default()).unwrap();
        assert!(!report.aligned);
        assert_eq!(report.population, 2020);
    }

    #[test]
    fn missing_model_disables_prediction() {
        let predictor = PopulationPredictor::load("/no/such/dir/machine_model.json");
        assert!(!predictor.is_ready());
        assert!(matches!(predictor.status(), ModelStatus::Unavailable { .. }));
        let err = predictor.predict(&RawInput::default()).unwrap_err();
        assert!(matches!(err, PredictorError::ModelUnavailable { .. }));
    }
}
