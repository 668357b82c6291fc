use serde::{Deserialize, Serialize};

/// The inferred type of a measurement value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Numeric,
    Boolean,
    String,
}

impl ValueType {
    /// Classify a raw textual value.
    ///
    /// The rule order is authoritative: a value that parses as a finite real
    /// number is `Numeric` before the boolean literals are ever consulted,
    /// and only the exact literals `"true"` and `"false"` are `Boolean`.
    /// Everything else, including non-finite spellings such as `"NaN"` or
    /// `"inf"`, is `String`.
    pub fn infer(value: &str) -> ValueType {
        if value.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
            return ValueType::Numeric;
        }

        if value == "true" || value == "false" {
            return ValueType::Boolean;
        }

        ValueType::String
    }
}
