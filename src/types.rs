use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    DEFAULT_COUNTRY_CODE, DEFAULT_COUNTRY_ID, DEFAULT_COUNTRY_NAME, DEFAULT_YEAR,
};

/// One user submission. Nothing here is validated: an odd code or name
/// simply ends up as an unseen category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub country_code: String,
    pub year: i64,
    pub country_id: String,
    pub country_name: String,
}

impl RawInput {
    pub fn new(
        country_code: impl Into<String>,
        year: i64,
        country_id: impl Into<String>,
        country_name: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            year,
            country_id: country_id.into(),
            country_name: country_name.into(),
        }
    }

    /// Labelled fields in display order, used to echo the submission back.
    pub fn echo(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Country Code", self.country_code.clone()),
            ("Year", self.year.to_string()),
            ("Country ID", self.country_id.clone()),
            ("Country Name", self.country_name.clone()),
        ]
    }
}

impl Default for RawInput {
    fn default() -> Self {
        Self::new(
            DEFAULT_COUNTRY_CODE,
            DEFAULT_YEAR,
            DEFAULT_COUNTRY_ID,
            DEFAULT_COUNTRY_NAME,
        )
    }
}

/// Ordered feature names a trained model expects. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema(Vec<String>);

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSchema {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Ordered `(name, value)` columns for a single row of model input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    columns: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.columns.push((name.into(), value));
    }

    /// Value of the first column called `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, value)| *value).collect()
    }

    pub fn columns(&self) -> &[(String, f64)] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Shape of the vector as a one-row matrix.
    pub fn shape(&self) -> (usize, usize) {
        (1, self.columns.len())
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
