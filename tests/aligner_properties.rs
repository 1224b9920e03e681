use population_predictor::{align, encode, AlignmentError, FeatureSchema, RawInput};

fn kenya() -> RawInput {
    RawInput::new("KEN", 2020, "KE", "Kenya")
}

fn schema(names: &[&str]) -> FeatureSchema {
    names.iter().copied().collect()
}

/// A schema shaped like one fitted on a handful of countries.
fn training_schema() -> FeatureSchema {
    let mut names = vec!["date".to_string()];
    for code in ["BRA", "CHN", "IND", "KEN", "USA"] {
        names.push(format!("countryiso3code_{}", code));
    }
    for id in ["BR", "CN", "IN", "KE", "US"] {
        names.push(format!("country.id_{}", id));
    }
    for name in ["Brazil", "China", "India", "Kenya", "United States"] {
        names.push(format!("country.value_{}", name));
    }
    FeatureSchema::new(names)
}

#[test]
fn kenya_against_its_own_columns() {
    let s = schema(&["date", "countryiso3code_KEN", "country.id_KE", "country.value_Kenya"]);
    let v = align(&kenya(), &s).unwrap();
    assert_eq!(
        v.names(),
        vec!["date", "countryiso3code_KEN", "country.id_KE", "country.value_Kenya"]
    );
    assert_eq!(v.values(), vec![2020.0, 1.0, 1.0, 1.0]);
}

#[test]
fn kenya_against_usa_only_schema() {
    let v = align(&kenya(), &schema(&["date", "countryiso3code_USA"])).unwrap();
    assert_eq!(v.names(), vec!["date", "countryiso3code_USA"]);
    assert_eq!(v.values(), vec![2020.0, 0.0]);
}

#[test]
fn known_categories_yield_exact_schema_keys_and_order() {
    let s = training_schema();
    for (code, id, name) in [
        ("BRA", "BR", "Brazil"),
        ("CHN", "CN", "China"),
        ("IND", "IN", "India"),
        ("KEN", "KE", "Kenya"),
        ("USA", "US", "United States"),
    ] {
        let v = align(&RawInput::new(code, 1999, id, name), &s).unwrap();
        let names: Vec<&str> = s.names().iter().map(String::as_str).collect();
        assert_eq!(v.names(), names);

        let ones = v.values().iter().filter(|x| **x == 1.0).count();
        assert_eq!(ones, 3, "one indicator per categorical field for {}", code);
        assert_eq!(v.get("date"), Some(1999.0));
    }
}

#[test]
fn unseen_category_zeroes_its_field_only() {
    let s = training_schema();
    let raw = RawInput::new("ATL", 2020, "KE", "Atlantis");
    let v = align(&raw, &s).unwrap();

    assert_eq!(v.len(), s.len());
    for (name, value) in v.columns() {
        if name.starts_with("countryiso3code_") || name.starts_with("country.value_") {
            assert_eq!(*value, 0.0, "{} should be zero", name);
        }
    }
    assert_eq!(v.get("country.id_KE"), Some(1.0));
}

#[test]
fn out_of_range_year_passes_through_unchecked() {
    let v = align(&RawInput::new("KEN", 1066, "KE", "Kenya"), &training_schema()).unwrap();
    assert_eq!(v.get("date"), Some(1066.0));
}

#[test]
fn alignment_is_idempotent() {
    let s = training_schema();
    let raw = RawInput::new("IND", 2030, "XX", "India");
    assert_eq!(align(&raw, &s), align(&raw, &s));
}

#[test]
fn empty_schema_hands_back_the_raw_encoding() {
    match align(&kenya(), &FeatureSchema::empty()) {
        Err(AlignmentError::SchemaUnavailable { encoded }) => assert_eq!(encoded, encode(&kenya())),
        other => panic!("expected SchemaUnavailable, got {:?}", other),
    }
}
