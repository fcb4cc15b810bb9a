use grandprix_core::{Dataset, Value};
use grandprix_metrics::{PreprocessingValidator, PREPROCESSING_MAX_SCORE};
use pretty_assertions::assert_eq;

fn num(v: f64) -> Value {
    Value::Number(v)
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// Standardized two-column table: per-column mean 0, sample std 1.
fn standardized() -> Dataset {
    Dataset::new(
        vec!["a".into(), "b".into()],
        vec![
            vec![num(-1.0), num(1.0)],
            vec![num(0.0), num(0.0)],
            vec![num(1.0), num(-1.0)],
        ],
    )
    .unwrap()
}

fn original() -> Dataset {
    Dataset::new(
        vec!["a".into(), "b".into()],
        vec![
            vec![num(10.0), text("x")],
            vec![num(20.0), text("y")],
            vec![num(30.0), text("z")],
        ],
    )
    .unwrap()
}

#[test]
fn perfect_transform_scores_the_full_thirty() {
    let outcome = PreprocessingValidator::new().validate(&original(), &standardized());

    assert_eq!(outcome.score, PREPROCESSING_MAX_SCORE);
    assert_eq!(
        outcome.checks_passed,
        vec![
            "No null values".to_string(),
            "All columns are numeric".to_string(),
            "Numeric columns are standardized".to_string(),
        ]
    );
}

#[test]
fn remaining_nulls_cost_exactly_ten() {
    let mut transformed = standardized();
    transformed.rows[1][0] = Value::Null;

    let outcome = PreprocessingValidator::new().validate(&original(), &transformed);

    // Null column stays numeric and the surviving values still standardize,
    // so only the null check fails.
    assert_eq!(outcome.score, 20.0);
    assert!(!outcome
        .checks_passed
        .iter()
        .any(|c| c == "No null values"));
}

#[test]
fn text_column_costs_exactly_ten() {
    let mut transformed = standardized();
    transformed.rows[0][1] = text("still categorical");
    transformed.rows[1][1] = text("oops");
    transformed.rows[2][1] = text("oops");

    let outcome = PreprocessingValidator::new().validate(&original(), &transformed);

    // Only the remaining numeric column is judged for standardization and
    // it still passes, so just the all-numeric check fails.
    assert_eq!(outcome.score, 20.0);
}

#[test]
fn unstandardized_columns_cost_only_five() {
    let transformed = Dataset::new(
        vec!["a".into()],
        vec![vec![num(100.0)], vec![num(200.0)], vec![num(300.0)]],
    )
    .unwrap();

    let outcome = PreprocessingValidator::new().validate(&original(), &transformed);

    // Partial credit: -5, never -10, for a bad scale alone.
    assert_eq!(outcome.score, 25.0);
    assert_eq!(
        outcome.checks_passed,
        vec![
            "No null values".to_string(),
            "All columns are numeric".to_string(),
        ]
    );
}

#[test]
fn mean_within_half_and_std_below_two_is_required_jointly() {
    // Mean fine, std too large.
    let wide = Dataset::new(
        vec!["a".into()],
        vec![vec![num(-3.0)], vec![num(0.0)], vec![num(3.0)]],
    )
    .unwrap();
    let outcome = PreprocessingValidator::new().validate(&original(), &wide);
    assert_eq!(outcome.score, 25.0);

    // Std fine, mean off-center.
    let shifted = Dataset::new(
        vec!["a".into()],
        vec![vec![num(0.9)], vec![num(1.0)], vec![num(1.1)]],
    )
    .unwrap();
    let outcome = PreprocessingValidator::new().validate(&original(), &shifted);
    assert_eq!(outcome.score, 25.0);
}

#[test]
fn every_check_failing_floors_at_five() {
    let transformed = Dataset::new(
        vec!["a".into(), "b".into()],
        vec![
            vec![Value::Null, text("raw")],
            vec![num(500.0), text("raw")],
            vec![num(900.0), text("raw")],
        ],
    )
    .unwrap();

    let outcome = PreprocessingValidator::new().validate(&original(), &transformed);

    // 30 - 10 - 10 - 5; the floor at 0 is never reached with these weights.
    assert_eq!(outcome.score, 5.0);
    assert!(outcome.checks_passed.is_empty());
}

#[test]
fn all_text_table_passes_standardization_vacuously() {
    let transformed = Dataset::new(
        vec!["a".into()],
        vec![vec![text("x")], vec![text("y")]],
    )
    .unwrap();

    let outcome = PreprocessingValidator::new().validate(&original(), &transformed);

    // No numeric columns to judge: nulls pass, numeric fails, standardization
    // passes vacuously.
    assert_eq!(outcome.score, 20.0);
}

#[test]
fn details_shape_lists_passed_checks() {
    let outcome = PreprocessingValidator::new().validate(&original(), &standardized());
    let details = outcome.details();
    assert_eq!(details["checks_passed"].as_array().unwrap().len(), 3);
}
