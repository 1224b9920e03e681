pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod types;
pub mod web;

pub use error::{PredictorError, Result};
pub use features::{align, encode, AlignmentError};
pub use predictor::{PopulationPredictor, PredictionReport};
pub use types::{FeatureSchema, FeatureVector, RawInput};
