//! Pareto chart derivation and drawing

use crate::dataset::{format_number, Dataset};
use crate::stats::cumulative_sum;
use crate::style::ParetoStyle;
use deming_common::{DemingError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Bars and cumulative totals of a Pareto chart, in dataset row order.
///
/// Rows are never reordered; callers wanting the canonical descending
/// layout sort the dataset first.
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoSeries {
    /// Name of the category column
    pub x_title: String,
    /// Name of the value column
    pub y_title: String,
    /// Category label of every bar
    pub categories: Vec<String>,
    /// Bar heights
    pub values: Vec<f64>,
    /// Running totals of `values`
    pub cumulative: Vec<f64>,
    /// Running totals as a percentage of the grand total
    pub cumulative_percent: Vec<f64>,
}

impl ParetoSeries {
    /// Derive the series from `dataset` without modifying it
    pub fn derive(dataset: &Dataset, x: &str, y: &str) -> Result<Self> {
        let categories = dataset.column(x)?.labels();
        let values = dataset.numeric(y)?.to_vec();

        if values.is_empty() {
            return Err(DemingError::insufficient_data(1, 0));
        }
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(DemingError::computation(format!(
                "non-finite value {} at row {row}",
                values[row]
            )));
        }

        let cumulative = cumulative_sum(&values);
        let total = cumulative.last().copied().unwrap_or_default();
        if total == 0.0 || !total.is_finite() {
            return Err(DemingError::computation(format!(
                "cumulative percentages need a non-zero finite total, got {total}"
            )));
        }
        let cumulative_percent = cumulative.iter().map(|c| c / total * 100.0).collect();

        tracing::debug!(rows = values.len(), total, "Derived Pareto series");

        Ok(Self {
            x_title: x.to_string(),
            y_title: y.to_string(),
            categories,
            values,
            cumulative,
            cumulative_percent,
        })
    }

    /// Number of bars
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no bars (never true for a derived series)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grand total of all bars
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or_default()
    }

    fn category_at(&self, position: f64) -> String {
        let rounded = position.round();
        if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        self.categories.get(rounded as usize).cloned().unwrap_or_default()
    }

    fn bar_range(&self) -> std::ops::Range<f64> {
        let (min, max) = self
            .values
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        let span = (max - min).max(1.0);
        (min - if min < 0.0 { span * 0.05 } else { 0.0 })..(max + span * 0.1)
    }
}

/// Draw a Pareto chart onto `root`
pub fn draw_pareto<DB>(root: &DrawingArea<DB, Shift>, series: &ParetoSeries, style: &ParetoStyle) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&style.background)?;

    let family = style.fonts.family.as_str();
    let label_size = style.fonts.label_size;
    #[allow(clippy::cast_precision_loss)]
    let x_range = -0.5..(series.len() as f64 - 0.5);

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(90)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), series.bar_range())?
        .set_secondary_coord(x_range, 0.0..105.0);

    let category_formatter = |v: &f64| series.category_at(*v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(series.len().min(40))
        .x_label_formatter(&category_formatter)
        .y_label_formatter(&|v| format_number(*v))
        .x_label_style(TextStyle::from((family, label_size).into_font().transform(FontTransform::Rotate90)))
        .y_label_style(TextStyle::from((family, label_size).into_font()).color(&style.bars))
        .axis_desc_style((family, label_size))
        .x_desc(series.x_title.as_str())
        .y_desc(series.y_title.as_str())
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{v:.0}%"))
        .label_style(TextStyle::from((family, label_size).into_font()).color(&style.cumulative))
        .axis_desc_style((family, label_size))
        .y_desc("Cumulative %")
        .draw()?;

    let bars = style.bars;
    chart
        .draw_series(series.values.iter().enumerate().map(|(i, v)| {
            #[allow(clippy::cast_precision_loss)]
            let center = i as f64;
            Rectangle::new([(center - 0.4, 0.0), (center + 0.4, *v)], bars.filled())
        }))?
        .label(series.y_title.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], bars.filled()));

    let cumulative = style.cumulative;
    #[allow(clippy::cast_precision_loss)]
    let points: Vec<(f64, f64)> = series
        .cumulative_percent
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, *p))
        .collect();
    chart
        .draw_secondary_series(LineSeries::new(points.iter().copied(), cumulative.stroke_width(2)))?
        .label("Cumulative %")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], cumulative.stroke_width(2)));
    chart.draw_secondary_series(points.iter().map(|p| {
        EmptyElement::at(*p) + Polygon::new(vec![(0, -6), (6, 0), (0, 6), (-6, 0)], cumulative.filled())
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::MiddleRight)
        .label_font((family, label_size))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deming_common::test_utils::assert_slice_approx_eq;

    fn defects(counts: Vec<f64>) -> Dataset {
        Dataset::new()
            .with_column("cause", vec!["a", "b", "c"])
            .unwrap()
            .with_column("count", counts)
            .unwrap()
    }

    #[test]
    fn test_sorted_input() {
        let series = ParetoSeries::derive(&defects(vec![5.0, 3.0, 2.0]), "cause", "count").unwrap();
        assert_eq!(series.cumulative, vec![5.0, 8.0, 10.0]);
        assert_slice_approx_eq(&series.cumulative_percent, &[50.0, 80.0, 100.0], 1e-9);
        assert_eq!(series.total(), 10.0);
        assert_eq!(series.categories, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unsorted_input_keeps_row_order() {
        let series = ParetoSeries::derive(&defects(vec![2.0, 5.0, 3.0]), "cause", "count").unwrap();
        assert_eq!(series.values, vec![2.0, 5.0, 3.0]);
        assert_eq!(series.cumulative, vec![2.0, 7.0, 10.0]);
    }

    #[test]
    fn test_numeric_categories_become_labels() {
        let dataset = Dataset::new()
            .with_column("shift", vec![1.0, 2.0])
            .unwrap()
            .with_column("count", vec![4.0, 1.0])
            .unwrap();
        let series = ParetoSeries::derive(&dataset, "shift", "count").unwrap();
        assert_eq!(series.categories, vec!["1", "2"]);
        assert_eq!(series.category_at(1.0), "2");
        assert_eq!(series.category_at(0.5), "");
    }

    #[test]
    fn test_errors() {
        let empty = Dataset::new()
            .with_column("cause", Vec::<String>::new())
            .unwrap()
            .with_column("count", Vec::<f64>::new())
            .unwrap();
        let err = ParetoSeries::derive(&empty, "cause", "count").unwrap_err();
        assert!(matches!(err, DemingError::InsufficientData { required: 1, actual: 0 }));

        let err = ParetoSeries::derive(&defects(vec![0.0, 0.0, 0.0]), "cause", "count").unwrap_err();
        assert!(matches!(err, DemingError::Computation { .. }));

        let err = ParetoSeries::derive(&defects(vec![1.0, f64::NAN, 0.0]), "cause", "count").unwrap_err();
        assert!(matches!(err, DemingError::Computation { .. }));

        let err = ParetoSeries::derive(&defects(vec![1.0, 2.0, 3.0]), "cause", "missing").unwrap_err();
        assert!(matches!(err, DemingError::InvalidColumn { .. }));
    }

    #[test]
    fn test_bar_range_starts_at_zero() {
        let series = ParetoSeries::derive(&defects(vec![5.0, 3.0, 2.0]), "cause", "count").unwrap();
        let range = series.bar_range();
        assert_eq!(range.start, 0.0);
        assert!(range.end > 5.0);
    }
}
