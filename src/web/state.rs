use std::sync::Arc;

use crate::predictor::PopulationPredictor;

/// Shared handler state. The predictor is loaded once in `main` and only
/// ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PopulationPredictor>,
}

impl AppState {
    pub fn new(predictor: PopulationPredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}
