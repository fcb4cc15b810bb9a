use grandprix_core::Dataset;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Ceiling of the preprocessing task score.
pub const PREPROCESSING_MAX_SCORE: f64 = 30.0;

const NO_NULLS_WEIGHT: f64 = 10.0;
const ALL_NUMERIC_WEIGHT: f64 = 10.0;
// Losing standardization costs 5, not 10: partial credit for a transform
// that encoded everything but scaled it badly.
const STANDARDIZATION_PENALTY: f64 = 5.0;

const CHECK_NO_NULLS: &str = "No null values";
const CHECK_ALL_NUMERIC: &str = "All columns are numeric";
const CHECK_STANDARDIZED: &str = "Numeric columns are standardized";

/// Mean must sit within this distance of zero for a column to count as
/// standardized.
const MEAN_TOLERANCE: f64 = 0.5;
/// Sample standard deviation must stay below this bound.
const STD_CEILING: f64 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub score: f64,
    pub checks_passed: Vec<String>,
}

impl ValidationOutcome {
    pub fn details(&self) -> serde_json::Value {
        json!({ "checks_passed": self.checks_passed })
    }
}

/// Scores a transformed dataset against the preprocessing checks (task 0).
#[derive(Debug, Clone, Default)]
pub struct PreprocessingValidator;

impl PreprocessingValidator {
    pub fn new() -> Self {
        Self
    }

    /// Sum the independently weighted checks, starting from the ceiling and
    /// deducting per failed check. The original dataset is accepted for
    /// parity with the evaluation call shape; the checks only inspect the
    /// transformed table.
    pub fn validate(&self, _original: &Dataset, transformed: &Dataset) -> ValidationOutcome {
        let mut score = PREPROCESSING_MAX_SCORE;
        let mut checks_passed = Vec::new();

        if transformed.has_nulls() {
            score -= NO_NULLS_WEIGHT;
        } else {
            checks_passed.push(CHECK_NO_NULLS.to_string());
        }

        if transformed.all_columns_numeric() {
            checks_passed.push(CHECK_ALL_NUMERIC.to_string());
        } else {
            score -= ALL_NUMERIC_WEIGHT;
        }

        if self.is_standardized(transformed) {
            checks_passed.push(CHECK_STANDARDIZED.to_string());
        } else {
            score -= STANDARDIZATION_PENALTY;
        }

        let outcome = ValidationOutcome {
            score: score.max(0.0),
            checks_passed,
        };

        tracing::debug!(
            score = outcome.score,
            checks = ?outcome.checks_passed,
            "Preprocessing validation complete"
        );

        outcome
    }

    /// Every numeric column must jointly satisfy |mean| < 0.5 and
    /// sample std < 2.0. A numeric column with too few values to produce
    /// stats fails the check.
    fn is_standardized(&self, dataset: &Dataset) -> bool {
        dataset.numeric_columns().iter().all(|&idx| {
            let stats = dataset.column_stats(idx);
            match (stats.mean, stats.std_dev) {
                (Some(mean), Some(std_dev)) => {
                    mean.abs() < MEAN_TOLERANCE && std_dev < STD_CEILING
                }
                _ => false,
            }
        })
    }
}
