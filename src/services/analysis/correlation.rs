//! Pairwise relationship detection between columns.
//!
//! Every ordered pair of distinct columns is offered to each registered
//! [`CorrelationDetector`]; each detector reports at most one [`Correlation`]
//! per pair. The pooled results are ranked by strength and only the strongest
//! [`MAX_CORRELATIONS`] are kept.

use indexmap::IndexMap;

use crate::models::{Correlation, CorrelationExample, CorrelationType, FieldType};

use super::inference::is_numeric;
use super::patterns::{dominant, percent};
use super::profile::{column_cells, column_values, ColumnProfile};
use super::random::RandomSource;

pub const MAX_CORRELATIONS: usize = 5;

const MATCH_RATE_THRESHOLD: f64 = 0.7;
const MIN_ROWS: usize = 3;
const MAX_EXAMPLES: usize = 2;

/// One ordered (source, target) column pair and the rows they came from.
#[derive(Debug, Clone, Copy)]
pub struct ColumnPair<'a> {
    pub source: &'a ColumnProfile,
    pub target: &'a ColumnProfile,
    pub source_index: usize,
    pub target_index: usize,
    pub rows: &'a [Vec<String>],
}

impl<'a> ColumnPair<'a> {
    fn source_cells(&self) -> Vec<&'a str> {
        column_cells(self.rows, self.source_index)
    }

    fn target_cells(&self) -> Vec<&'a str> {
        column_cells(self.rows, self.target_index)
    }

    fn source_values(&self) -> Vec<&'a str> {
        column_values(self.rows, self.source_index)
    }

    fn target_values(&self) -> Vec<&'a str> {
        column_values(self.rows, self.target_index)
    }

    fn correlation(
        &self,
        correlation_type: CorrelationType,
        strength: f64,
        description: String,
        rule: String,
        examples: Vec<CorrelationExample>,
    ) -> Correlation {
        Correlation {
            source_field: self.source.name.clone(),
            target_field: self.target.name.clone(),
            correlation_type,
            strength,
            description,
            rule,
            examples,
        }
    }
}

pub trait CorrelationDetector: Send + Sync {
    fn name(&self) -> &'static str;

    fn detect(&self, pair: &ColumnPair<'_>, rng: &mut dyn RandomSource) -> Option<Correlation>;
}

/// Detectors in the order they are consulted for each pair.
pub fn default_detectors() -> Vec<Box<dyn CorrelationDetector>> {
    vec![
        Box::new(ConditionalDetector),
        Box::new(TemporalDetector::default()),
        Box::new(NumericalDetector::default()),
        Box::new(FirstLetterDetector),
        Box::new(SubstringDetector),
    ]
}

/// Runs every detector over every ordered pair and keeps the strongest results.
pub fn detect_correlations(
    profiles: &[ColumnProfile],
    rows: &[Vec<String>],
    detectors: &[Box<dyn CorrelationDetector>],
    rng: &mut dyn RandomSource,
) -> Vec<Correlation> {
    let mut found = Vec::new();

    for (i, source) in profiles.iter().enumerate() {
        for (j, target) in profiles.iter().enumerate() {
            if i == j {
                continue;
            }

            let pair = ColumnPair {
                source,
                target,
                source_index: i,
                target_index: j,
                rows,
            };

            for detector in detectors {
                if let Some(correlation) = detector.detect(&pair, rng) {
                    tracing::debug!(
                        "{} detector: {} -> {} ({:.2})",
                        detector.name(),
                        correlation.source_field,
                        correlation.target_field,
                        correlation.strength
                    );
                    found.push(correlation);
                }
            }
        }
    }

    rank(found)
}

/// Sorts by descending strength (stable for equal strengths) and truncates.
pub fn rank(mut correlations: Vec<Correlation>) -> Vec<Correlation> {
    correlations.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    correlations.truncate(MAX_CORRELATIONS);
    correlations
}

/// Low-cardinality source columns whose values pin down the target's value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionalDetector;

struct ConditionalPattern<'a> {
    source_value: &'a str,
    target_pattern: String,
}

impl CorrelationDetector for ConditionalDetector {
    fn name(&self) -> &'static str {
        "conditional"
    }

    fn detect(&self, pair: &ColumnPair<'_>, rng: &mut dyn RandomSource) -> Option<Correlation> {
        if pair.source.unique_values.len() > 5 {
            return None;
        }

        let source_cells = pair.source_cells();
        let target_cells = pair.target_cells();

        let mut unique_sources: Vec<&str> = Vec::new();
        for &value in source_cells.iter().filter(|v| !v.is_empty()) {
            if !unique_sources.contains(&value) {
                unique_sources.push(value);
            }
        }
        if unique_sources.len() < 2 || unique_sources.len() > 5 {
            return None;
        }

        let mut patterns: Vec<ConditionalPattern<'_>> = Vec::new();
        for &source_value in &unique_sources {
            let matching: Vec<&str> = source_cells
                .iter()
                .zip(&target_cells)
                .filter(|(source, _)| **source == source_value)
                .map(|(_, target)| *target)
                .collect();

            if matching.len() < 2 {
                continue;
            }

            let mut counts: IndexMap<String, usize> = IndexMap::new();
            for value in &matching {
                *counts.entry((*value).to_string()).or_insert(0) += 1;
            }

            if counts.len() == 1 {
                patterns.push(ConditionalPattern {
                    source_value,
                    target_pattern: matching[0].to_string(),
                });
            } else if (counts.len() as f64) < matching.len() as f64 / 2.0 {
                if let Some((value, count)) = dominant(&counts) {
                    let share = percent(count, matching.len());
                    if share > MATCH_RATE_THRESHOLD * 100.0 {
                        patterns.push(ConditionalPattern {
                            source_value,
                            target_pattern: format!("{} ({}% of the time)", value, share),
                        });
                    }
                }
            }
        }

        let first = patterns.first()?;
        let source = &pair.source.name;
        let target = &pair.target.name;

        let rule = if patterns.len() == unique_sources.len() {
            format!("{} value is determined by {}", target, source)
        } else if patterns.len() > 1 {
            format!("{} shows strong patterns based on {} values", target, source)
        } else {
            format!(
                "When {} is \"{}\", {} is typically \"{}\"",
                source, first.source_value, target, first.target_pattern
            )
        };

        let examples = patterns
            .iter()
            .take(MAX_EXAMPLES)
            .map(|p| {
                CorrelationExample::new(
                    format!("{} = \"{}\"", source, p.source_value),
                    format!("{} = \"{}\"", target, p.target_pattern),
                )
            })
            .collect();

        Some(pair.correlation(
            CorrelationType::Conditional,
            0.7 + rng.next_f64() * 0.3,
            format!("{} values show patterns based on {} values", target, source),
            rule,
            examples,
        ))
    }
}

/// Date columns against numeric-or-empty targets. Stands in for trend
/// detection: it fires with `fire_chance` and picks a direction at random.
#[derive(Debug, Clone, Copy)]
pub struct TemporalDetector {
    pub fire_chance: f64,
}

impl Default for TemporalDetector {
    fn default() -> Self {
        Self { fire_chance: 0.3 }
    }
}

impl CorrelationDetector for TemporalDetector {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn detect(&self, pair: &ColumnPair<'_>, rng: &mut dyn RandomSource) -> Option<Correlation> {
        if !pair.source.field_type.is_temporal() {
            return None;
        }
        if !pair.target_cells().iter().all(|v| v.is_empty() || is_numeric(v)) {
            return None;
        }
        if !rng.chance(self.fire_chance) {
            return None;
        }

        let increasing = rng.chance(0.5);
        let strength = 0.6 + rng.next_f64() * 0.3;
        let source = &pair.source.name;
        let target = &pair.target.name;
        let (trend, verb, earlier, recent) = if increasing {
            ("increasing", "increase", "Lower", "Higher")
        } else {
            ("decreasing", "decrease", "Higher", "Lower")
        };

        Some(pair.correlation(
            CorrelationType::Temporal,
            strength,
            format!("{} shows a {} trend over time", target, trend),
            format!("{} tends to {} over time", target, verb),
            vec![
                CorrelationExample::new(format!("Earlier {}", source), format!("{} {}", earlier, target)),
                CorrelationExample::new(format!("Recent {}", source), format!("{} {}", recent, target)),
            ],
        ))
    }
}

/// Numeric column pairs with at least three complete rows. Stands in for a
/// correlation coefficient the same way [`TemporalDetector`] stands in for
/// trend detection.
#[derive(Debug, Clone, Copy)]
pub struct NumericalDetector {
    pub fire_chance: f64,
    pub proportional_chance: f64,
}

impl Default for NumericalDetector {
    fn default() -> Self {
        Self {
            fire_chance: 0.3,
            proportional_chance: 0.3,
        }
    }
}

impl CorrelationDetector for NumericalDetector {
    fn name(&self) -> &'static str {
        "numerical"
    }

    fn detect(&self, pair: &ColumnPair<'_>, rng: &mut dyn RandomSource) -> Option<Correlation> {
        if pair.source.field_type != FieldType::Number || pair.target.field_type != FieldType::Number {
            return None;
        }

        let complete_rows = pair
            .source_cells()
            .iter()
            .zip(pair.target_cells())
            .filter(|(s, t)| !s.is_empty() && !t.is_empty() && is_numeric(s) && is_numeric(t))
            .count();
        if complete_rows < MIN_ROWS {
            return None;
        }

        if !rng.chance(self.fire_chance) {
            return None;
        }

        let positive = rng.chance(0.5);
        let proportional = rng.chance(self.proportional_chance);
        let source = &pair.source.name;
        let target = &pair.target.name;

        let rule = if proportional {
            let factor = rng.next_f64() * 5.0 + 1.0;
            if positive {
                format!("{} ≈ {:.2} × {}", target, factor, source)
            } else {
                format!("{} ≈ {:.2} × (1/{})", target, factor, source)
            }
        } else {
            format!(
                "{} tends to {} as {} increases",
                target,
                if positive { "increase" } else { "decrease" },
                source
            )
        };

        let (higher, lower) = if positive { ("Higher", "Lower") } else { ("Lower", "Higher") };
        let direction = if positive { "positive" } else { "negative" };

        Some(pair.correlation(
            CorrelationType::Numerical,
            0.6 + rng.next_f64() * 0.3,
            format!("{} shows a {} correlation with {}", target, direction, source),
            rule,
            vec![
                CorrelationExample::new(format!("Higher {}", source), format!("{} {}", higher, target)),
                CorrelationExample::new(format!("Lower {}", source), format!("{} {}", lower, target)),
            ],
        ))
    }
}

/// Target values whose first character appears inside the source value,
/// e.g. a tier code derived from a plan name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLetterDetector;

impl CorrelationDetector for FirstLetterDetector {
    fn name(&self) -> &'static str {
        "first-letter"
    }

    fn detect(&self, pair: &ColumnPair<'_>, _rng: &mut dyn RandomSource) -> Option<Correlation> {
        let sources = pair.source_values();
        let targets = pair.target_values();
        if sources.len() < MIN_ROWS || targets.len() < MIN_ROWS {
            return None;
        }

        let source = &pair.source.name;
        let target = &pair.target.name;
        let compared = sources.len().min(targets.len());
        let mut matches = 0;
        let mut examples = Vec::new();

        for (source_value, target_value) in sources.iter().zip(&targets) {
            let Some(first) = target_value.chars().next() else {
                continue;
            };
            if source_value.contains(first) {
                matches += 1;
                if examples.len() < MAX_EXAMPLES {
                    examples.push(CorrelationExample::new(
                        format!("{} = \"{}\"", source, source_value),
                        format!("{} starts with \"{}\" (found in {})", target, first, source),
                    ));
                }
            }
        }

        let rate = matches as f64 / compared as f64;
        if rate <= MATCH_RATE_THRESHOLD {
            return None;
        }

        Some(pair.correlation(
            CorrelationType::Conditional,
            0.6 + rate * 0.3,
            format!("First letter of {} is often found within {}", target, source),
            format!("{} typically starts with a letter contained in {}", target, source),
            examples,
        ))
    }
}

/// One column's values contained (case-insensitively) in the other's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringDetector;

impl CorrelationDetector for SubstringDetector {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn detect(&self, pair: &ColumnPair<'_>, _rng: &mut dyn RandomSource) -> Option<Correlation> {
        let sources = pair.source_values();
        let targets = pair.target_values();
        if sources.len() < MIN_ROWS || targets.len() < MIN_ROWS {
            return None;
        }

        let source = &pair.source.name;
        let target = &pair.target.name;
        let compared = sources.len().min(targets.len());
        let mut source_in_target = 0;
        let mut target_in_source = 0;
        let mut examples = Vec::new();

        for (source_value, target_value) in sources.iter().zip(&targets) {
            let source_lower = source_value.to_lowercase();
            let target_lower = target_value.to_lowercase();

            if source_lower.chars().count() > 2 && target_lower.contains(&source_lower) {
                source_in_target += 1;
                if examples.len() < MAX_EXAMPLES {
                    examples.push(CorrelationExample::new(
                        format!("{} = \"{}\"", source, source_value),
                        format!("{} contains \"{}\"", target, source_value),
                    ));
                }
            }

            if target_lower.chars().count() > 2 && source_lower.contains(&target_lower) {
                target_in_source += 1;
                if examples.len() < MAX_EXAMPLES {
                    examples.push(CorrelationExample::new(
                        format!("{} contains \"{}\"", source, target_value),
                        format!("{} = \"{}\"", target, target_value),
                    ));
                }
            }
        }

        let source_in_target_rate = source_in_target as f64 / compared as f64;
        let target_in_source_rate = target_in_source as f64 / compared as f64;

        if source_in_target_rate > MATCH_RATE_THRESHOLD {
            return Some(pair.correlation(
                CorrelationType::Conditional,
                0.6 + source_in_target_rate * 0.3,
                format!("{} is often contained within {}", source, target),
                format!("{} typically contains the full value of {}", target, source),
                examples,
            ));
        }

        if target_in_source_rate > MATCH_RATE_THRESHOLD {
            return Some(pair.correlation(
                CorrelationType::Conditional,
                0.6 + target_in_source_rate * 0.3,
                format!("{} is often contained within {}", target, source),
                format!("{} typically contains the full value of {}", source, target),
                examples,
            ));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::profile::profile_columns;
    use crate::services::analysis::random::ScriptedSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(headers: &[&str], rows: &[&[&str]]) -> (Vec<ColumnProfile>, Vec<Vec<String>>) {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        (profile_columns(&headers, &rows), rows)
    }

    fn detect_pair(
        detector: &dyn CorrelationDetector,
        profiles: &[ColumnProfile],
        rows: &[Vec<String>],
        source_index: usize,
        target_index: usize,
        rng: &mut dyn RandomSource,
    ) -> Option<Correlation> {
        let pair = ColumnPair {
            source: &profiles[source_index],
            target: &profiles[target_index],
            source_index,
            target_index,
            rows,
        };
        detector.detect(&pair, rng)
    }

    #[test]
    fn conditional_finds_determined_target() {
        let (profiles, rows) = table(
            &["tier", "discount"],
            &[&["gold", "20"], &["silver", "10"], &["gold", "20"], &["silver", "10"]],
        );
        let found = detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.5))
            .expect("tier determines discount");

        assert_eq!(found.correlation_type, CorrelationType::Conditional);
        assert_eq!(found.rule, "discount value is determined by tier");
        assert!((found.strength - 0.85).abs() < 1e-9);
        assert_eq!(found.examples.len(), 2);
        assert_eq!(found.examples[0].condition, "tier = \"gold\"");
        assert_eq!(found.examples[0].result, "discount = \"20\"");
    }

    #[test]
    fn conditional_single_rule_sentence() {
        let (profiles, rows) = table(
            &["region", "manager"],
            &[&["north", "Ann"], &["north", "Ann"], &["south", "Bo"], &["east", "Cy"]],
        );
        let found = detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0))
            .unwrap();
        assert_eq!(found.rule, "When region is \"north\", manager is typically \"Ann\"");
    }

    #[test]
    fn conditional_reports_dominant_share() {
        let (profiles, rows) = table(
            &["s", "t"],
            &[
                &["a", "x"],
                &["a", "x"],
                &["a", "y"],
                &["a", "x"],
                &["a", "x"],
                &["a", "x"],
                &["a", "x"],
                &["a", "y"],
                &["a", "x"],
                &["a", "x"],
                &["b", "z"],
                &["b", "z"],
            ],
        );
        let found = detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.5))
            .expect("a mostly maps to x");

        assert_eq!(found.rule, "t value is determined by s");
        assert_eq!(found.examples[0].condition, "s = \"a\"");
        assert_eq!(found.examples[0].result, "t = \"x (80% of the time)\"");
        assert_eq!(found.examples[1].result, "t = \"z\"");
    }

    #[test]
    fn conditional_dominance_needs_few_distinct_targets() {
        // Two distinct targets over three matches is too scattered to call.
        let (profiles, rows) = table(
            &["s", "t"],
            &[&["a", "x"], &["a", "x"], &["a", "y"], &["b", "z"], &["b", "z"]],
        );
        let found = detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.5))
            .unwrap();
        assert_eq!(found.rule, "When s is \"b\", t is typically \"z\"");
        assert_eq!(found.examples.len(), 1);
    }

    #[test]
    fn conditional_partial_rules_show_strong_patterns() {
        let (profiles, rows) = table(
            &["s", "t"],
            &[&["a", "x"], &["a", "x"], &["b", "y"], &["b", "z"], &["c", "w"], &["c", "w"]],
        );
        let found = detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.5))
            .unwrap();

        assert_eq!(found.rule, "t shows strong patterns based on s values");
        assert_eq!(found.examples.len(), 2);
        assert_eq!(found.examples[0].result, "t = \"x\"");
        assert_eq!(found.examples[1].condition, "s = \"c\"");
    }

    #[test]
    fn conditional_needs_two_to_five_source_values() {
        let (profiles, rows) = table(&["flag", "value"], &[&["y", "1"], &["y", "2"], &["y", "3"]]);
        assert!(detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0)).is_none());

        let (profiles, rows) = table(
            &["code", "value"],
            &[&["a", "1"], &["b", "1"], &["c", "1"], &["d", "1"], &["e", "1"], &["f", "1"]],
        );
        assert!(detect_pair(&ConditionalDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0)).is_none());
    }

    #[test]
    fn temporal_requires_date_source_and_numeric_target() {
        let (profiles, rows) = table(
            &["day", "sales", "note"],
            &[&["2024-01-01", "10", "x"], &["2024-01-02", "", "y"]],
        );
        let detector = TemporalDetector::default();

        let found = detect_pair(&detector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.1))
            .expect("fires below the chance threshold");
        assert_eq!(found.correlation_type, CorrelationType::Temporal);
        assert_eq!(found.rule, "sales tends to increase over time");
        assert_eq!(found.examples[0].result, "Lower sales");

        assert!(detect_pair(&detector, &profiles, &rows, 0, 2, &mut ScriptedSource::constant(0.1)).is_none());
        assert!(detect_pair(&detector, &profiles, &rows, 1, 0, &mut ScriptedSource::constant(0.1)).is_none());
        assert!(detect_pair(&detector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.9)).is_none());
    }

    #[test]
    fn temporal_decreasing_branch() {
        let (profiles, rows) = table(&["day", "sales"], &[&["2024-01-01", "10"]]);
        let mut source = ScriptedSource::new(vec![0.1, 0.9, 0.5]);
        let found = detect_pair(&TemporalDetector::default(), &profiles, &rows, 0, 1, &mut source).unwrap();
        assert_eq!(found.description, "sales shows a decreasing trend over time");
        assert_eq!(found.examples[1].result, "Lower sales");
    }

    #[test]
    fn numerical_rule_shapes() {
        let (profiles, rows) = table(&["qty", "total"], &[&["1", "2"], &["2", "4"], &["3", "6"]]);
        let detector = NumericalDetector::default();

        // fire, positive, proportional, factor = 0.5 * 5 + 1
        let mut source = ScriptedSource::new(vec![0.1, 0.1, 0.1, 0.5, 0.5]);
        let found = detect_pair(&detector, &profiles, &rows, 0, 1, &mut source).unwrap();
        assert_eq!(found.rule, "total ≈ 3.50 × qty");
        assert_eq!(found.correlation_type, CorrelationType::Numerical);

        // fire, negative, monotonic
        let mut source = ScriptedSource::new(vec![0.1, 0.9, 0.9, 0.5]);
        let found = detect_pair(&detector, &profiles, &rows, 0, 1, &mut source).unwrap();
        assert_eq!(found.rule, "total tends to decrease as qty increases");
        assert_eq!(found.description, "total shows a negative correlation with qty");
    }

    #[test]
    fn numerical_needs_three_complete_rows() {
        let (profiles, rows) = table(&["qty", "total"], &[&["1", "2"], &["2", ""], &["3", "6"]]);
        let found = detect_pair(&NumericalDetector::default(), &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0));
        assert!(found.is_none());
    }

    #[test]
    fn first_letter_match() {
        let (profiles, rows) = table(
            &["plan", "tier"],
            &[&["Gold", "G"], &["Silver", "S"], &["Bronze", "B"], &["Gold", "G"]],
        );
        let found = detect_pair(&FirstLetterDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0))
            .unwrap();
        assert!((found.strength - 0.9).abs() < 1e-9);
        assert_eq!(found.description, "First letter of tier is often found within plan");
        assert_eq!(found.examples.len(), 2);
        assert_eq!(found.examples[0].result, "tier starts with \"G\" (found in plan)");
    }

    #[test]
    fn first_letter_needs_three_values() {
        let (profiles, rows) = table(&["plan", "tier"], &[&["Gold", "G"], &["Silver", "S"]]);
        assert!(detect_pair(&FirstLetterDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0)).is_none());
    }

    #[test]
    fn substring_checks_source_in_target_first() {
        let (profiles, rows) = table(
            &["city", "address"],
            &[
                &["Paris", "1 Rue, PARIS"],
                &["Oslo", "2 Gate, oslo"],
                &["Rome", "3 Via, Rome"],
            ],
        );
        let found = detect_pair(&SubstringDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0))
            .unwrap();
        assert_eq!(found.description, "city is often contained within address");
        assert_eq!(found.rule, "address typically contains the full value of city");
        assert!((found.strength - 0.9).abs() < 1e-9);

        let reversed = detect_pair(&SubstringDetector, &profiles, &rows, 1, 0, &mut ScriptedSource::constant(0.0))
            .unwrap();
        assert_eq!(reversed.description, "city is often contained within address");
        assert_eq!(reversed.rule, "address typically contains the full value of city");
    }

    #[test]
    fn substring_ignores_short_values() {
        let (profiles, rows) = table(
            &["code", "label"],
            &[&["ab", "abc"], &["cd", "cde"], &["ef", "efg"]],
        );
        assert!(detect_pair(&SubstringDetector, &profiles, &rows, 0, 1, &mut ScriptedSource::constant(0.0)).is_none());
    }

    #[test]
    fn ranking_is_descending_and_capped() {
        let (profiles, rows) = table(
            &["plan", "tier", "code", "label", "region", "manager"],
            &[
                &["Gold", "G", "Gold-1", "gold", "north", "Ann"],
                &["Silver", "S", "Silver-2", "silver", "north", "Ann"],
                &["Bronze", "B", "Bronze-3", "bronze", "south", "Bo"],
                &["Gold", "G", "Gold-4", "gold", "south", "Bo"],
            ],
        );
        let mut rng = StdRng::seed_from_u64(11);
        let correlations = detect_correlations(&profiles, &rows, &default_detectors(), &mut rng);

        assert!(correlations.len() <= MAX_CORRELATIONS);
        assert!(!correlations.is_empty());
        assert!(correlations.windows(2).all(|w| w[0].strength >= w[1].strength));
        assert!(correlations.iter().all(|c| c.strength > 0.0 && c.strength <= 1.0));
        assert!(correlations.iter().all(|c| c.source_field != c.target_field));
    }

    #[test]
    fn rank_keeps_order_of_equal_strengths() {
        let make = |name: &str, strength: f64| Correlation {
            source_field: name.to_string(),
            target_field: "t".to_string(),
            correlation_type: CorrelationType::Conditional,
            strength,
            description: String::new(),
            rule: String::new(),
            examples: Vec::new(),
        };
        let ranked = rank(vec![make("a", 0.7), make("b", 0.9), make("c", 0.7)]);
        let names: Vec<&str> = ranked.iter().map(|c| c.source_field.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
