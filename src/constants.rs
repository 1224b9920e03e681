/// Column names used by the training-time one-hot encoding.
/// `date` carries the raw year; the other three are one-hot prefixes.
pub const DATE_COLUMN: &str = "date";
pub const COUNTRY_CODE_COLUMN: &str = "countryiso3code";
pub const COUNTRY_ID_COLUMN: &str = "country.id";
pub const COUNTRY_NAME_COLUMN: &str = "country.value";

/// Separator between a one-hot prefix and the category value.
pub const ONE_HOT_SEPARATOR: &str = "_";

/// The model artifact is looked up under this fixed local filename unless
/// configuration says otherwise.
pub const DEFAULT_MODEL_PATH: &str = "machine_model.json";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Bounds for the year widget only; the aligner never checks them.
pub const MIN_YEAR: i64 = 1960;
pub const MAX_YEAR: i64 = 2030;

// Form defaults
pub const DEFAULT_COUNTRY_CODE: &str = "KEN";
pub const DEFAULT_YEAR: i64 = 2020;
pub const DEFAULT_COUNTRY_ID: &str = "KE";
pub const DEFAULT_COUNTRY_NAME: &str = "Kenya";

/// A country shown in the examples panel next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleCountry {
    pub flag: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub id: &'static str,
}

pub const EXAMPLE_COUNTRIES: [ExampleCountry; 5] = [
    ExampleCountry { flag: "🇰🇪", name: "Kenya", code: "KEN", id: "KE" },
    ExampleCountry { flag: "🇺🇸", name: "USA", code: "USA", id: "US" },
    ExampleCountry { flag: "🇨🇳", name: "China", code: "CHN", id: "CN" },
    ExampleCountry { flag: "🇮🇳", name: "India", code: "IND", id: "IN" },
    ExampleCountry { flag: "🇧🇷", name: "Brazil", code: "BRA", id: "BR" },
];

/// Build a one-hot column name such as `countryiso3code_KEN`.
pub fn one_hot_column(prefix: &str, value: &str) -> String {
    format!("{}{}{}", prefix, ONE_HOT_SEPARATOR, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_column_joins_prefix_and_value() {
        assert_eq!(one_hot_column(COUNTRY_ID_COLUMN, "KE"), "country.id_KE");
        assert_eq!(one_hot_column(COUNTRY_NAME_COLUMN, "Kenya"), "country.value_Kenya");
    }

    #[test]
    fn default_year_is_inside_widget_bounds() {
        assert!((MIN_YEAR..=MAX_YEAR).contains(&DEFAULT_YEAR));
    }
}
