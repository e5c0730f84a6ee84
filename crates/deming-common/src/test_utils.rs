//! Test helpers shared across the workspace.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test; only the
/// first call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        // Another harness may already own the global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
///
/// # Panics
///
/// Panics when the difference exceeds `tolerance`.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Assert element-wise approximate equality of two slices.
///
/// # Panics
///
/// Panics on a length mismatch or when any pair differs by more than `tolerance`.
pub fn assert_slice_approx_eq(left: &[f64], right: &[f64], tolerance: f64) {
    assert_eq!(left.len(), right.len(), "slice lengths differ");
    for (l, r) in left.iter().zip(right) {
        assert_approx_eq(*l, *r, tolerance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_within_tolerance() {
        assert_approx_eq(1.0, 1.0 + 1e-12, 1e-9);
        assert_slice_approx_eq(&[1.0, 2.0], &[1.0, 2.0 + 1e-12], 1e-9);
    }

    #[test]
    #[should_panic(expected = "not approximately equal")]
    fn test_approx_eq_outside_tolerance() {
        assert_approx_eq(1.0, 1.1, 1e-9);
    }

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("test logging initialised");
    }
}
