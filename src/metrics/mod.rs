//! Prediction metrics, exported in Prometheus text format at `/metrics`.

pub mod core;

pub use self::core::{time_operation, TimingGuard};

use std::sync::{Once, OnceLock};
use tracing::{info, warn};

pub const PREDICTIONS_TOTAL: &str = "predictor_predictions_total";
pub const PREDICTION_FAILURES_TOTAL: &str = "predictor_prediction_failures_total";
pub const MODEL_UNAVAILABLE_TOTAL: &str = "predictor_model_unavailable_total";
pub const ALIGNMENT_FALLBACKS_TOTAL: &str = "predictor_alignment_fallbacks_total";
pub const PREDICTION_DURATION_SECONDS: &str = "predictor_prediction_duration_seconds";

static INIT: Once = Once::new();
static HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Idempotent; later calls are no-ops.
pub fn init_metrics() {
    INIT.call_once(|| {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                if HANDLE.set(handle).is_err() {
                    warn!("Prometheus handle was already set");
                }
                register_metrics();
                info!("Prometheus recorder installed");
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder: {}", e);
            }
        }
    });
}

/// Render the current snapshot, if a recorder is installed.
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

fn register_metrics() {
    ::metrics::describe_counter!(PREDICTIONS_TOTAL, "Successful population predictions");
    ::metrics::describe_counter!(
        PREDICTION_FAILURES_TOTAL,
        "Feature vectors rejected by the model"
    );
    ::metrics::describe_counter!(
        MODEL_UNAVAILABLE_TOTAL,
        "Prediction requests made while no model was loaded"
    );
    ::metrics::describe_counter!(
        ALIGNMENT_FALLBACKS_TOTAL,
        "Requests passed to the model unaligned because it has no feature schema"
    );
    ::metrics::describe_histogram!(
        PREDICTION_DURATION_SECONDS,
        ::metrics::Unit::Seconds,
        "Time spent aligning and predicting a single request"
    );
}

pub fn record_prediction() {
    ::metrics::counter!(PREDICTIONS_TOTAL).increment(1);
}

pub fn record_prediction_failure() {
    ::metrics::counter!(PREDICTION_FAILURES_TOTAL).increment(1);
}

pub fn record_model_unavailable() {
    ::metrics::counter!(MODEL_UNAVAILABLE_TOTAL).increment(1);
}

pub fn record_alignment_fallback() {
    ::metrics::counter!(ALIGNMENT_FALLBACKS_TOTAL).increment(1);
}
