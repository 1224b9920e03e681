use serde::{Deserialize, Serialize};

use super::{check_input, check_output, Regressor};
use crate::error::Result;
use crate::types::FeatureVector;

/// Ordinary linear regression: `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("linear model has no coefficients".to_string());
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("linear model has non-finite parameters".to_string());
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let width = self.coefficients.len();
        let x = check_input(features, width, self.feature_names_in.as_deref())?;

        let prediction = self.intercept
            + self
                .coefficients
                .iter()
                .zip(&x)
                .map(|(coef, value)| coef * value)
                .sum::<f64>();

        check_output(prediction, features, width)
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}
