//! Control chart derivation and drawing

use crate::dataset::{format_number, Column, Dataset};
use crate::stats::{ControlLimits, LimitConvention, LinearFit};
use crate::style::{ControlChartStyle, ReferenceLine, ValueMarker};
use deming_common::{DemingError, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

type ValueChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Horizontal placement of the rows
#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    /// Rows sit at their numeric `x` value
    Numeric(Vec<f64>),
    /// Rows sit at `0..n` and are labelled with the category text
    Categorical(Vec<String>),
}

impl XAxis {
    fn from_column(name: &str, column: &Column) -> Result<Self> {
        match column {
            Column::Numeric(values) => {
                if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                    return Err(DemingError::invalid_column(
                        name,
                        format!("non-finite category value at row {row}"),
                    ));
                }
                Ok(Self::Numeric(values.clone()))
            }
            Column::Text(labels) => Ok(Self::Categorical(labels.clone())),
        }
    }

    /// Horizontal coordinate of every row
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        match self {
            Self::Numeric(values) => values.clone(),
            #[allow(clippy::cast_precision_loss)]
            Self::Categorical(labels) => (0..labels.len()).map(|i| i as f64).collect(),
        }
    }

    /// Tick label for a horizontal coordinate
    #[must_use]
    pub fn label_at(&self, position: f64) -> String {
        match self {
            Self::Numeric(_) => format_number(position),
            Self::Categorical(labels) => {
                let rounded = position.round();
                if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
                    return String::new();
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                labels.get(rounded as usize).cloned().unwrap_or_default()
            }
        }
    }

    fn range(&self) -> std::ops::Range<f64> {
        match self {
            Self::Numeric(values) => {
                let (min, max) = min_max(values.iter().copied());
                padded(min, max)
            }
            #[allow(clippy::cast_precision_loss)]
            Self::Categorical(labels) => -0.5..(labels.len() as f64 - 0.5),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(labels) => labels.len(),
        }
    }
}

/// Every series a control chart shows, derived once per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlChartSeries {
    /// Name of the category column
    pub x_title: String,
    /// Name of the value column
    pub y_title: String,
    /// Horizontal placement of the rows
    pub x_axis: XAxis,
    /// Measured values in row order
    pub values: Vec<f64>,
    /// Least-squares line over the row index
    pub fit: LinearFit,
    /// `fit` evaluated at every row
    pub trendline: Vec<f64>,
    /// Mean and control limits
    pub limits: ControlLimits,
    /// Constant goal, when requested
    pub goal: Option<f64>,
    /// Rows whose value lies outside the limits
    pub out_of_control: Vec<usize>,
}

impl ControlChartSeries {
    /// Derive the chart series from `dataset` without modifying it.
    ///
    /// Fails with `InvalidColumn` for a missing column or a non-numeric
    /// `y`, `InsufficientData` below two rows, and `Computation` for
    /// non-finite input.
    pub fn derive(
        dataset: &Dataset,
        x: &str,
        y: &str,
        goal: Option<f64>,
        convention: LimitConvention,
    ) -> Result<Self> {
        let x_axis = XAxis::from_column(x, dataset.column(x)?)?;
        let values = dataset.numeric(y)?.to_vec();

        if values.len() < 2 {
            return Err(DemingError::insufficient_data(2, values.len()));
        }
        if let Some(goal) = goal.filter(|g| !g.is_finite()) {
            return Err(DemingError::computation(format!("goal {goal} is not finite")));
        }

        let limits = ControlLimits::compute(&values, convention)?;
        let fit = LinearFit::over_index(&values)?;
        let trendline = fit.trendline(values.len());
        let out_of_control: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| limits.is_out_of_control(**v))
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(
            mean = limits.mean,
            std_dev = limits.std_dev,
            upper = limits.upper,
            lower = limits.lower,
            slope = fit.slope,
            intercept = fit.intercept,
            out_of_control = out_of_control.len(),
            "Derived control chart series"
        );

        Ok(Self {
            x_title: x.to_string(),
            y_title: y.to_string(),
            x_axis,
            values,
            fit,
            trendline,
            limits,
            goal,
            out_of_control,
        })
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no rows (never true for a derived series)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn value_range(&self) -> std::ops::Range<f64> {
        let all = self
            .values
            .iter()
            .chain(&self.trendline)
            .copied()
            .chain([self.limits.upper, self.limits.lower])
            .chain(self.goal);
        let (min, max) = min_max(all);
        padded(min, max)
    }
}

/// Draw a control chart onto `root`.
///
/// Shared by every sink; the backend decides whether the result becomes a
/// PNG, an SVG document or a window frame.
pub fn draw_control_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &ControlChartSeries,
    style: &ControlChartStyle,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&style.background)?;

    let family = style.fonts.family.as_str();
    let label_font = (family, style.fonts.label_size);
    let (x_desc, y_desc) = if style.swap_axis_titles {
        (series.y_title.as_str(), series.x_title.as_str())
    } else {
        (series.x_title.as_str(), series.y_title.as_str())
    };
    let x_label_area = if style.rotate_x_labels { 110 } else { 50 };

    let mut chart = ChartBuilder::on(root)
        .caption(title, (family, style.fonts.title_size))
        .margin(20)
        .x_label_area_size(x_label_area)
        .y_label_area_size(80)
        .build_cartesian_2d(series.x_axis.range(), series.value_range())?;

    let x_label_style = if style.rotate_x_labels {
        TextStyle::from(label_font.into_font().transform(FontTransform::Rotate90))
    } else {
        TextStyle::from(label_font.into_font())
    };
    let x_formatter = |v: &f64| series.x_axis.label_at(*v);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(series.x_axis.len().min(40))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&|v| format_number(*v))
        .x_label_style(x_label_style)
        .y_label_style(label_font)
        .axis_desc_style(label_font)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    let positions = series.x_axis.positions();
    let points: Vec<(f64, f64)> = positions.iter().copied().zip(series.values.iter().copied()).collect();

    let values_color = style.values;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), values_color.stroke_width(2)))?
        .label(series.y_title.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], values_color.stroke_width(2)));
    match style.value_marker {
        ValueMarker::Cross => {
            chart.draw_series(points.iter().map(|p| Cross::new(*p, 5, values_color.stroke_width(2))))?;
        }
        ValueMarker::Circle => {
            chart.draw_series(points.iter().map(|p| Circle::new(*p, 5, values_color.filled())))?;
        }
    }

    if !series.out_of_control.is_empty() {
        let flagged = style.limits;
        chart
            .draw_series(
                series
                    .out_of_control
                    .iter()
                    .map(|&row| Circle::new(points[row], 9, flagged.stroke_width(2))),
            )?
            .label("Out of control")
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, flagged.stroke_width(2)));
    }

    let trend_color = style.trendline;
    chart
        .draw_series(DashedLineSeries::new(
            positions.iter().copied().zip(series.trendline.iter().copied()),
            10,
            6,
            trend_color.stroke_width(2),
        ))?
        .label("Trendline")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], trend_color.stroke_width(2)));

    if let Some(goal) = series.goal {
        draw_reference(&mut chart, &positions, goal, style.goal, "Goal", style.reference_line)?;
    }
    draw_reference(&mut chart, &positions, series.limits.mean, style.mean, "Mean", style.reference_line)?;
    draw_reference(
        &mut chart,
        &positions,
        series.limits.upper,
        style.limits,
        "Upper Control Limit",
        style.reference_line,
    )?;
    draw_reference(
        &mut chart,
        &positions,
        series.limits.lower,
        style.limits,
        "Lower Control Limit",
        style.reference_line,
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(label_font)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Constant series across all rows
fn draw_reference<DB>(
    chart: &mut ValueChart<'_, DB>,
    positions: &[f64],
    level: f64,
    color: RGBColor,
    label: &str,
    line: ReferenceLine,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points: Vec<(f64, f64)> = positions.iter().map(|&x| (x, level)).collect();
    let stroke = color.stroke_width(2);

    let anno = match line {
        ReferenceLine::SolidWithMarkers => {
            chart.draw_series(points.iter().map(|p| Cross::new(*p, 5, stroke)))?;
            chart.draw_series(LineSeries::new(points, stroke))?
        }
        ReferenceLine::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, stroke))?,
    };
    anno.label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
    Ok(())
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Pad a data range by 5% on both sides; flat ranges get a unit margin
fn padded(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - pad)..(max + pad)
}
