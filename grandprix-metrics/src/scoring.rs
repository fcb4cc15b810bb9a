use serde_json::json;

/// Normalize a raw supervised metric into a leaderboard score: clamp into
/// [0, 1], then round to 4 decimal places. Clamping is intentionally lossy:
/// a negative R² reports as 0, because leaderboard semantics assume
/// non-negative scores.
pub fn normalize_supervised_score(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    round4(raw.clamp(0.0, 1.0))
}

/// Round to 4 decimal places, half away from zero.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Details recorded alongside a successful supervised evaluation.
pub fn supervised_details(model_type: &str, metric_name: &str) -> serde_json::Value {
    json!({
        "model_type": model_type,
        "metric_name": metric_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negative_raw_metric_to_zero() {
        assert_eq!(normalize_supervised_score(-3.7), 0.0);
    }

    #[test]
    fn clamps_above_one() {
        assert_eq!(normalize_supervised_score(1.2), 1.0);
    }

    #[test]
    fn rounds_to_four_places() {
        assert_eq!(normalize_supervised_score(0.123456), 0.1235);
        assert_eq!(normalize_supervised_score(0.99995), 1.0);
    }

    #[test]
    fn non_finite_raw_metric_scores_zero() {
        assert_eq!(normalize_supervised_score(f64::NAN), 0.0);
        assert_eq!(normalize_supervised_score(f64::INFINITY), 0.0);
    }
}
