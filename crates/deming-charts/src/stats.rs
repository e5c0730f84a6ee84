//! Summary statistics, control limits and the least-squares trendline

use deming_common::{DemingError, Result};
use serde::{Deserialize, Serialize};

/// Width of the control band in standard deviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitConvention {
    /// `mean ± σ`, used by the PNG and interactive control charts
    OneSigma,
    /// `mean ± 3σ`, the Shewhart convention used by the SVG control chart
    ThreeSigma,
}

impl LimitConvention {
    /// Number of standard deviations between the mean and either limit
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::OneSigma => 1.0,
            Self::ThreeSigma => 3.0,
        }
    }
}

/// Center line and control limits of a measured series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator)
    pub std_dev: f64,
    /// Upper control limit
    pub upper: f64,
    /// Lower control limit
    pub lower: f64,
    /// Band width the limits were computed with
    pub convention: LimitConvention,
}

impl ControlLimits {
    /// Compute limits for `values`.
    ///
    /// Needs at least two finite values. A constant series is valid and
    /// yields `upper == lower == mean`.
    pub fn compute(values: &[f64], convention: LimitConvention) -> Result<Self> {
        let mean = mean(values)?;
        let std_dev = sample_std_dev(values)?;
        let spread = convention.multiplier() * std_dev;

        Ok(Self {
            mean,
            std_dev,
            upper: mean + spread,
            lower: mean - spread,
            convention,
        })
    }

    /// Whether `value` lies strictly outside the band
    #[must_use]
    pub fn is_out_of_control(&self, value: f64) -> bool {
        value > self.upper || value < self.lower
    }
}

/// Arithmetic mean of finite values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(DemingError::insufficient_data(1, 0));
    }
    ensure_finite(values)?;

    #[allow(clippy::cast_precision_loss)]
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    finite(mean, "mean")
}

/// Sample standard deviation (n − 1 denominator) of finite values
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(DemingError::insufficient_data(2, values.len()));
    }
    let mean = mean(values)?;

    #[allow(clippy::cast_precision_loss)]
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    finite(variance.sqrt(), "standard deviation")
}

/// Straight line `value = slope · index + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change per row
    pub slope: f64,
    /// Fitted value at row 0
    pub intercept: f64,
}

impl LinearFit {
    /// Least-squares fit of `values` against their row index `0..n`.
    pub fn over_index(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(DemingError::insufficient_data(2, values.len()));
        }
        ensure_finite(values)?;

        #[allow(clippy::cast_precision_loss)]
        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (i, y)| {
                #[allow(clippy::cast_precision_loss)]
                let dx = i as f64 - mean_x;
                (dx.mul_add(y - mean_y, sxy), dx.mul_add(dx, sxx))
            });

        let slope = finite(sxy / sxx, "trendline slope")?;
        let intercept = finite(slope.mul_add(-mean_x, mean_y), "trendline intercept")?;
        Ok(Self { slope, intercept })
    }

    /// Fitted value at row `index`
    #[must_use]
    pub fn evaluate(&self, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let x = index as f64;
        self.slope.mul_add(x, self.intercept)
    }

    /// Fitted values for rows `0..len`
    #[must_use]
    pub fn trendline(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.evaluate(i)).collect()
    }
}

/// Running totals in row order
#[must_use]
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}

fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(DemingError::computation(format!(
            "non-finite value {} at row {row}",
            values[row]
        ))),
        None => Ok(()),
    }
}

fn finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DemingError::computation(format!("{what} is not finite ({value})")))
    }
}
