use crate::models::{AnalysisResult, AnalysisStatus};

use super::random::RandomSource;

const PROGRESS_STEP: f64 = 5.0;
const COMPLETENESS_STEP: f64 = 3.0;
const FIELD_COMPLETENESS_STEP: f64 = 5.0;
const DONE: f64 = 100.0;

/// One tick of the presentational progress simulation. Values only grow and
/// are capped at 100; a complete result is left as is.
pub fn advance(result: &mut AnalysisResult, rng: &mut dyn RandomSource) {
    if result.status == AnalysisStatus::Complete {
        return;
    }

    result.progress = (result.progress + PROGRESS_STEP).min(DONE);
    if result.progress >= DONE {
        result.status = AnalysisStatus::Complete;
    }
    result.completeness = (result.completeness + COMPLETENESS_STEP).min(DONE);

    for field in &mut result.fields {
        field.completeness = (field.completeness + rng.next_f64() * FIELD_COMPLETENESS_STEP).min(DONE);
    }
}

/// Returns a copy of `result` advanced `ticks` times.
pub fn simulate(result: &AnalysisResult, ticks: u32, rng: &mut dyn RandomSource) -> AnalysisResult {
    let mut snapshot = result.clone();
    for _ in 0..ticks {
        advance(&mut snapshot, rng);
    }
    snapshot
}
