use thiserror::Error;
use tracing::{debug, warn};

use super::one_hot::encode;
use crate::types::{FeatureSchema, FeatureVector, RawInput};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// The model did not publish its feature names. Carries the raw one-hot
    /// vector so the caller can still try it unaligned.
    #[error("feature schema unavailable; passing {} encoded columns through unaligned", .encoded.len())]
    SchemaUnavailable { encoded: FeatureVector },
}

impl AlignmentError {
    pub fn into_encoded(self) -> FeatureVector {
        match self {
            AlignmentError::SchemaUnavailable { encoded } => encoded,
        }
    }
}

/// Encode `raw` and line it up with `schema`.
///
/// Schema names missing from the encoding are filled with 0, encoded columns
/// the schema does not know are dropped, and the result follows schema order
/// exactly. An empty schema cannot be aligned against and returns
/// [`AlignmentError::SchemaUnavailable`] holding the unmodified encoding.
pub fn align(raw: &RawInput, schema: &FeatureSchema) -> Result<FeatureVector, AlignmentError> {
    let encoded = encode(raw);

    if schema.is_empty() {
        return Err(AlignmentError::SchemaUnavailable { encoded });
    }

    let mut aligned = FeatureVector::with_capacity(schema.len());
    let mut zero_filled = 0usize;
    for name in schema.names() {
        let value = match encoded.get(name) {
            Some(value) => value,
            None => {
                zero_filled += 1;
                0.0
            }
        };
        aligned.push(name.as_str(), value);
    }

    let dropped = encoded
        .names()
        .into_iter()
        .filter(|name| !schema.names().iter().any(|s| s.as_str() == *name))
        .count();
    debug!(
        schema_len = schema.len(),
        zero_filled, dropped, "aligned feature vector to model schema"
    );

    Ok(aligned)
}

/// Best-effort alignment: on an empty schema, log and fall back to the raw
/// encoding. Returns the vector and whether it was aligned.
pub fn align_or_passthrough(raw: &RawInput, schema: &FeatureSchema) -> (FeatureVector, bool) {
    match align(raw, schema) {
        Ok(vector) => (vector, true),
        Err(err) => {
            warn!("{}", err);
            (err.into_encoded(), false)
        }
    }
}
