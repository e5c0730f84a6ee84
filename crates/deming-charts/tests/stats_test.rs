//! Property tests for the control chart statistics

use deming_charts::stats::{cumulative_sum, mean, sample_std_dev};
use deming_charts::{ControlLimits, LimitConvention, LinearFit};
use proptest::prelude::*;

fn measurements() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6_f64, 2..200)
}

proptest! {
    #[test]
    fn limits_bracket_the_mean(values in measurements()) {
        let limits = ControlLimits::compute(&values, LimitConvention::OneSigma).unwrap();
        prop_assert!(limits.lower <= limits.mean);
        prop_assert!(limits.mean <= limits.upper);
        prop_assert!(limits.std_dev >= 0.0);
        if limits.std_dev > 0.0 {
            prop_assert!(limits.lower < limits.mean && limits.mean < limits.upper);
        }
    }

    #[test]
    fn three_sigma_band_is_three_times_wider(values in measurements()) {
        let one = ControlLimits::compute(&values, LimitConvention::OneSigma).unwrap();
        let three = ControlLimits::compute(&values, LimitConvention::ThreeSigma).unwrap();

        let tolerance = 1e-9 * (1.0 + one.std_dev);
        prop_assert!((one.mean - three.mean).abs() <= tolerance);
        prop_assert!(((three.upper - three.mean) - 3.0 * (one.upper - one.mean)).abs() <= 3.0 * tolerance + 1e-6);
    }

    #[test]
    fn mean_lies_within_the_data(values in measurements()) {
        let m = mean(&values).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(m >= min - 1e-6 && m <= max + 1e-6);
        prop_assert!(sample_std_dev(&values).unwrap() <= (max - min) + 1e-6);
    }

    #[test]
    fn trendline_recovers_exact_lines(
        slope in -100.0..100.0_f64,
        intercept in -1000.0..1000.0_f64,
        n in 2usize..100,
    ) {
        #[allow(clippy::cast_precision_loss)]
        let values: Vec<f64> = (0..n).map(|i| slope.mul_add(i as f64, intercept)).collect();
        let fit = LinearFit::over_index(&values).unwrap();

        prop_assert!((fit.slope - slope).abs() < 1e-6);
        prop_assert!((fit.intercept - intercept).abs() < 1e-6);
        prop_assert_eq!(fit.trendline(n).len(), n);
    }

    #[test]
    fn cumulative_sum_ends_at_total(values in prop::collection::vec(0.0..1000.0_f64, 1..100)) {
        let cumulative = cumulative_sum(&values);
        let total: f64 = values.iter().sum();

        prop_assert_eq!(cumulative.len(), values.len());
        prop_assert!((cumulative[cumulative.len() - 1] - total).abs() < 1e-6);
        prop_assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
    }
}
