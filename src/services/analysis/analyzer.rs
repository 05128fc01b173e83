use crate::error::AppError;
use crate::models::{AnalysisResult, AnalysisStatus, CsvUpload, Field};

use super::correlation::{default_detectors, detect_correlations, CorrelationDetector};
use super::external::map_external;
use super::insights::summarize;
use super::patterns::describe;
use super::profile::{profile_columns, ColumnProfile};
use super::random::RandomSource;
use super::standard::map_standard;

pub const INITIAL_PROGRESS: f64 = 15.0;
pub const INITIAL_COMPLETENESS: f64 = 25.0;

/// Builds an [`AnalysisResult`] from an upload's header and sample rows.
pub struct CsvAnalyzer {
    namespace: String,
    detectors: Vec<Box<dyn CorrelationDetector>>,
}

impl CsvAnalyzer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_detectors(namespace, default_detectors())
    }

    pub fn with_detectors(
        namespace: impl Into<String>,
        detectors: Vec<Box<dyn CorrelationDetector>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            detectors,
        }
    }

    pub fn analyze(
        &self,
        file_id: String,
        upload: &CsvUpload,
        rng: &mut dyn RandomSource,
    ) -> Result<AnalysisResult, AppError> {
        if upload.headers.is_empty() {
            return Err(AppError::EmptyFile);
        }

        let start = std::time::Instant::now();
        tracing::info!(
            "Analyzing {} ({}, {} columns, {} sample rows)",
            upload.file_name,
            upload.file_type,
            upload.headers.len(),
            upload.sample_rows.len()
        );

        let profiles = profile_columns(&upload.headers, &upload.sample_rows);
        let outlier_index = rng.below(profiles.len());

        let fields: Vec<Field> = profiles
            .iter()
            .enumerate()
            .map(|(idx, profile)| self.build_field(profile, idx == outlier_index, rng))
            .collect();

        let correlations = detect_correlations(&profiles, &upload.sample_rows, &self.detectors, rng);
        let insights = summarize(&fields, &correlations, &self.namespace);

        tracing::info!(
            "Analysis of {} finished in {:?}: {} fields, {} correlations, outlier {:?}",
            upload.file_name,
            start.elapsed(),
            fields.len(),
            correlations.len(),
            fields[outlier_index].name
        );

        Ok(AnalysisResult {
            file_id,
            file_name: upload.file_name.clone(),
            status: AnalysisStatus::InProgress,
            progress: INITIAL_PROGRESS,
            completeness: INITIAL_COMPLETENESS,
            fields,
            correlations,
            insights,
        })
    }

    fn build_field(&self, profile: &ColumnProfile, is_outlier: bool, rng: &mut dyn RandomSource) -> Field {
        let completeness = 70.0 + rng.offset(30) as f64;

        // The outlier is the field nobody could place in the standard schema.
        let standard_mapping = if is_outlier {
            None
        } else {
            map_standard(&profile.name, profile.field_type, rng)
        };

        let external_model_mapping =
            map_external(&profile.name, profile.field_type, is_outlier, &self.namespace, rng);

        Field {
            name: profile.name.clone(),
            field_type: profile.field_type,
            completeness,
            is_outlier,
            standard_mapping,
            external_model_mapping,
            patterns: describe(profile),
            sample_values: profile.sample_values.clone(),
            unique_values: profile.unique_values.clone(),
            value_distribution: profile.value_distribution.clone(),
        }
    }
}
