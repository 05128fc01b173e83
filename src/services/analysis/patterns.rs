use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FieldType;

use super::profile::ColumnProfile;

static ID_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+-\d+$").expect("valid id regex"));
static CAPITALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("valid capitalized regex"));

/// Share above which a single value is called out as dominant.
const DOMINANT_PERCENT: f64 = 70.0;
const ENUMERABLE_LIMIT: usize = 5;

/// Rounded percentage, halves rounding up.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0).round()
}

/// Human-readable notes describing a column's values.
pub fn describe(profile: &ColumnProfile) -> Vec<String> {
    let Some(first) = profile.sample_values.first() else {
        return Vec::new();
    };

    let mut patterns = Vec::new();

    match profile.field_type {
        FieldType::Number => {
            if profile.sample_values.iter().any(|v| v.contains('.')) {
                patterns.push("Numeric values with decimal places".to_string());
            } else {
                patterns.push("Integer values".to_string());
            }
        }
        FieldType::Date => patterns.push("ISO-8601 date format (YYYY-MM-DD)".to_string()),
        FieldType::DateTime => patterns.push("ISO-8601 datetime format".to_string()),
        FieldType::String => {
            if first.contains('@') {
                patterns.push("Valid email format".to_string());
            } else if profile.name.to_lowercase().contains("id") && ID_FORMAT.is_match(first) {
                let prefix = first.split('-').next().unwrap_or_default();
                patterns.push(format!("Format: {}-XXXXX where X is a digit", prefix));
            } else if CAPITALIZED.is_match(first) {
                patterns.push("Capitalized first letter".to_string());
            }
        }
        FieldType::Array => patterns.push("JSON array format".to_string()),
    }

    let unique = &profile.unique_values;
    if !unique.is_empty() && unique.len() <= ENUMERABLE_LIMIT {
        patterns.push(format!(
            "Limited to {} possible values: {}",
            unique.len(),
            unique.join(", ")
        ));

        let total: usize = profile.value_distribution.values().sum();
        if let Some((value, count)) = dominant(&profile.value_distribution) {
            let share = percent(count, total);
            if share > DOMINANT_PERCENT {
                patterns.push(format!("Predominantly \"{}\" ({}% of values)", value, share));
            }
        }
    }

    patterns
}

/// Most frequent entry; the earliest one wins ties.
pub fn dominant<'a, I>(distribution: I) -> Option<(&'a str, usize)>
where
    I: IntoIterator<Item = (&'a String, &'a usize)>,
{
    distribution
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (value, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value.as_str(), count)),
        })
}
