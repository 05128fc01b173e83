use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FieldType;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2}Z?)?$").expect("valid ISO date regex")
});

/// Loose numeric check in the spirit of a spreadsheet cell: surrounding
/// whitespace is ignored, decimal and exponent forms are accepted, as are
/// `Infinity` and `0x`/`0o`/`0b` integer literals. `NaN` is not a number.
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return trimmed.len() - unsigned.len() <= 1;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return !digits.is_empty() && u128::from_str_radix(digits, radix).is_ok();
        }
    }

    // Rust accepts "inf"/"nan" spellings that a spreadsheet would not.
    if unsigned.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return false;
    }

    trimmed.parse::<f64>().map(|v| !v.is_nan()).unwrap_or(false)
}

pub fn is_iso_date(value: &str) -> bool {
    ISO_DATE.is_match(value)
}

/// Classifies a column from its sample values. Empty values are ignored.
pub fn infer_type<S: AsRef<str>>(values: &[S]) -> FieldType {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.as_ref())
        .filter(|v| !v.is_empty())
        .collect();

    let Some(first) = values.first() else {
        return FieldType::String;
    };

    if values.iter().all(|v| is_numeric(v)) {
        return FieldType::Number;
    }

    if values.iter().all(|v| is_iso_date(v)) {
        return if first.contains('T') {
            FieldType::DateTime
        } else {
            FieldType::Date
        };
    }

    if first.starts_with('[') && first.ends_with(']') {
        return FieldType::Array;
    }

    FieldType::String
}
