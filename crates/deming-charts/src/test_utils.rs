//! Dataset fixtures for chart tests.

use crate::Dataset;

/// Three weekly ticket counts rising by two each week
#[must_use]
pub fn weekly_tickets() -> Dataset {
    Dataset::new()
        .with_column("week", vec!["2024-07-01", "2024-07-08", "2024-07-15"])
        .and_then(|d| d.with_column("tickets", vec![10.0, 12.0, 14.0]))
        .expect("fixture columns are consistent")
}

/// `n` rows of `value = slope * index + intercept` against a numeric `x`
#[must_use]
pub fn linear_dataset(n: usize, slope: f64, intercept: f64) -> Dataset {
    #[allow(clippy::cast_precision_loss)]
    let x: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
    #[allow(clippy::cast_precision_loss)]
    let y: Vec<f64> = (0..n).map(|i| slope.mul_add(i as f64, intercept)).collect();
    Dataset::new()
        .with_column("x", x)
        .and_then(|d| d.with_column("value", y))
        .expect("fixture columns are consistent")
}

/// Defect counts per cause, in the given row order
///
/// # Panics
///
/// Panics when `causes` and `counts` differ in length.
#[must_use]
pub fn defect_causes(causes: &[&str], counts: &[f64]) -> Dataset {
    Dataset::new()
        .with_column("cause", causes.to_vec())
        .and_then(|d| d.with_column("count", counts.to_vec()))
        .expect("causes and counts must have equal length")
}
