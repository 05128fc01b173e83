use crate::models::{Correlation, Field, FieldType};

const STRONG_CORRELATION: f64 = 0.8;

/// Narrative summary sentences. The order is fixed by the checks below.
pub fn summarize(fields: &[Field], correlations: &[Correlation], namespace: &str) -> Vec<String> {
    let mut insights = vec!["Data appears to follow a consistent structure".to_string()];

    let count_type = |wanted: FieldType| fields.iter().filter(|f| f.field_type == wanted).count();

    let date_fields = count_type(FieldType::Date) + count_type(FieldType::DateTime);
    if date_fields > 0 {
        insights.push(format!("{} date fields detected with ISO-8601 format", date_fields));
    }

    if count_type(FieldType::Number) > 0 {
        insights.push("Numeric fields contain potential outliers that require attention".to_string());
    }

    let names: Vec<String> = fields.iter().map(|f| f.name.to_lowercase()).collect();
    if names.iter().any(|n| n.contains("customer") && n.contains("id")) {
        insights.push("Customer ID field follows standard format pattern".to_string());
    }
    if names.iter().any(|n| n.contains("amount")) {
        insights.push("Transaction amounts follow expected distribution".to_string());
    }

    let outliers = fields.iter().filter(|f| f.is_outlier).count();
    if outliers > 0 {
        insights.push(format!("Detected {} field(s) with potential data quality issues", outliers));
    }

    let unmapped = fields.iter().filter(|f| f.standard_mapping.is_none()).count();
    if unmapped > 0 {
        insights.push(format!("{} field(s) require manual mapping to standards", unmapped));
    }

    let externally_mapped = fields.iter().filter(|f| f.external_model_mapping.is_some()).count();
    if externally_mapped > 0 {
        insights.push(format!(
            "{} field(s) mapped to {} Data Model with high confidence",
            externally_mapped, namespace
        ));
    }

    if correlations.is_empty() {
        return insights;
    }

    insights.push(format!(
        "Discovered {} significant relationships between fields",
        correlations.len()
    ));

    if let Some(strong) = correlations.iter().find(|c| c.strength > STRONG_CORRELATION) {
        insights.push(format!("Strong relationship detected: {}", strong.rule));
    }

    if correlations
        .iter()
        .any(|c| c.description.contains("First letter") || c.description.contains("starts with"))
    {
        insights.push(
            "Detected patterns where field values are derived from first letters of other fields"
                .to_string(),
        );
    }

    if correlations.iter().any(|c| c.description.contains("contained within")) {
        insights.push("Found fields that contain values from other fields as substrings".to_string());
    }

    insights
}
