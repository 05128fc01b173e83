
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of non-empty raw values kept per field for display.
pub const SAMPLE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Number,
    Date,
    DateTime,
    Array,
    String,
}

impl FieldType {
    pub fn is_temporal(self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMapping {
    pub field: String,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub completeness: f64,
    pub is_outlier: bool,
    pub standard_mapping: Option<String>,
    pub external_model_mapping: Option<ExternalMapping>,
    pub patterns: Vec<String>,
    pub sample_values: SmallVec<[String; SAMPLE_SIZE]>,
    pub unique_values: Vec<String>,
    pub value_distribution: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationType {
    Categorical,
    Numerical,
    Temporal,
    Conditional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationExample {
    pub condition: String,
    pub result: String,
}

impl CorrelationExample {
    pub fn new(condition: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            result: result.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub source_field: String,
    pub target_field: String,
    pub correlation_type: CorrelationType,
    pub strength: f64,
    pub description: String,
    pub rule: String,
    pub examples: Vec<CorrelationExample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_id: String,
    pub file_name: String,
    pub status: AnalysisStatus,
    pub progress: f64,
    pub completeness: f64,
    pub fields: Vec<Field>,
    pub correlations: Vec<Correlation>,
    pub insights: Vec<String>,
}

/// A validated upload, already split into a header row and sample rows.
#[derive(Debug, Clone)]
pub struct CsvUpload {
    pub file_name: String,
    pub file_type: String,
    pub headers: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
}
