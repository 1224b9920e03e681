use crate::constants::{
    one_hot_column, COUNTRY_CODE_COLUMN, COUNTRY_ID_COLUMN, COUNTRY_NAME_COLUMN, DATE_COLUMN,
};
use crate::types::{FeatureVector, RawInput};

/// One-hot encode a submission the same way the training data was encoded.
///
/// The numeric `date` column comes first, followed by one indicator column per
/// categorical field in field order. Each field yields exactly one column set
/// to 1; every other category of that field is implicitly 0.
pub fn encode(raw: &RawInput) -> FeatureVector {
    let mut vector = FeatureVector::with_capacity(4);
    vector.push(DATE_COLUMN, raw.year as f64);

    for (prefix, value) in categorical_fields(raw) {
        vector.push(one_hot_column(prefix, value), 1.0);
    }

    vector
}

fn categorical_fields(raw: &RawInput) -> [(&'static str, &str); 3] {
    [
        (COUNTRY_CODE_COLUMN, raw.country_code.as_str()),
        (COUNTRY_ID_COLUMN, raw.country_id.as_str()),
        (COUNTRY_NAME_COLUMN, raw.country_name.as_str()),
    ]
}
