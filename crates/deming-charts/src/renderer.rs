//! Chart requests and the renderer that turns them into PNG, SVG or a window

use crate::control::{draw_control_chart, ControlChartSeries};
use crate::dataset::Dataset;
use crate::encode::{render_png, render_svg};
use crate::pareto::{draw_pareto, ParetoSeries};
use crate::stats::LimitConvention;
use crate::style::{ControlChartStyle, ParetoStyle};
use deming_common::{DemingError, Result};
use deming_config::RenderSettings;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Control chart request: which columns to plot and how to label them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Category column (dates, sample numbers, labels)
    pub x: String,
    /// Numeric value column
    pub y: String,
    /// Constant target drawn across all rows
    #[serde(default)]
    pub goal: Option<f64>,
    /// Caption of the chart
    #[serde(default = "default_title")]
    pub title: String,
}

impl ChartRequest {
    /// Caption used when none is given
    pub const DEFAULT_TITLE: &'static str = "Control Chart";

    /// Request a chart of `y` over `x` with the default title and no goal
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            goal: None,
            title: default_title(),
        }
    }

    /// Draw a goal line at `goal`
    #[must_use]
    pub const fn goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Replace the caption
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

fn default_title() -> String {
    ChartRequest::DEFAULT_TITLE.to_string()
}

/// Pareto chart request.
///
/// `hue` and `palette` are accepted for callers that pass them, but bars
/// are drawn in the single configured color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoRequest {
    /// Category column
    pub x: String,
    /// Numeric value column
    pub y: String,
    /// Grouping column
    #[serde(default)]
    pub hue: Option<String>,
    /// Color scheme name
    #[serde(default = "default_palette")]
    pub palette: String,
}

impl ParetoRequest {
    /// Palette name used when none is given
    pub const DEFAULT_PALETTE: &'static str = "viridis";

    /// Request a Pareto chart of `y` per `x`
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            hue: None,
            palette: default_palette(),
        }
    }

    /// Set the grouping column
    #[must_use]
    pub fn hue(mut self, hue: impl Into<String>) -> Self {
        self.hue = Some(hue.into());
        self
    }

    /// Set the color scheme name
    #[must_use]
    pub fn palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    fn log_inert_options(&self) {
        if self.hue.is_some() || self.palette != Self::DEFAULT_PALETTE {
            tracing::debug!(
                hue = ?self.hue,
                palette = %self.palette,
                "Pareto hue and palette do not affect rendering"
            );
        }
    }
}

fn default_palette() -> String {
    ParetoRequest::DEFAULT_PALETTE.to_string()
}

/// Renders control and Pareto charts with fixed settings.
///
/// Holds only immutable settings; every call derives its series afresh and
/// owns its drawing surface until it returns.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    settings: RenderSettings,
}

impl ChartRenderer {
    /// Create a renderer with the given settings
    #[must_use]
    pub const fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Settings in use
    #[must_use]
    pub const fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Series of the PNG and interactive charts (mean ± σ)
    pub fn control_series(&self, dataset: &Dataset, request: &ChartRequest) -> Result<ControlChartSeries> {
        ControlChartSeries::derive(dataset, &request.x, &request.y, request.goal, LimitConvention::OneSigma)
    }

    /// Series of the Pareto charts
    pub fn pareto_series(&self, dataset: &Dataset, request: &ParetoRequest) -> Result<ParetoSeries> {
        request.log_inert_options();
        ParetoSeries::derive(dataset, &request.x, &request.y)
    }

    /// Render a control chart with limits at mean ± σ and return PNG bytes.
    ///
    /// The goal line is drawn only when the request carries one.
    #[instrument(skip(self, dataset), fields(x = %request.x, y = %request.y, rows = dataset.len()))]
    pub fn render_static(&self, dataset: &Dataset, request: &ChartRequest) -> Result<Vec<u8>> {
        let series = self.control_series(dataset, request)?;
        let style = ControlChartStyle::raster(&self.settings);

        let png = render_png(style.size, |root| draw_control_chart(root, &series, &style, &request.title))?;

        tracing::info!(bytes = png.len(), "Rendered control chart PNG");
        Ok(png)
    }

    /// Render a Shewhart control chart (mean ± 3σ) and return SVG bytes.
    ///
    /// A goal is required; without one the call fails with
    /// [`DemingError::MissingGoal`] before anything is computed.
    #[instrument(skip(self, dataset), fields(x = %request.x, y = %request.y, rows = dataset.len()))]
    pub fn render_vector(&self, dataset: &Dataset, request: &ChartRequest) -> Result<Vec<u8>> {
        if request.goal.is_none() {
            return Err(DemingError::MissingGoal);
        }

        let series =
            ControlChartSeries::derive(dataset, &request.x, &request.y, request.goal, LimitConvention::ThreeSigma)?;
        let style = ControlChartStyle::vector(&self.settings);

        let svg = render_svg(style.size, |root| draw_control_chart(root, &series, &style, &request.title))?;

        tracing::info!(bytes = svg.len(), "Rendered control chart SVG");
        Ok(svg)
    }

    /// Show the PNG control chart in a window and block until it is closed.
    #[cfg(feature = "display")]
    #[instrument(skip(self, dataset), fields(x = %request.x, y = %request.y, rows = dataset.len()))]
    pub fn render_interactive(&self, dataset: &Dataset, request: &ChartRequest) -> Result<()> {
        let series = self.control_series(dataset, request)?;
        let style = ControlChartStyle::raster(&self.settings);

        crate::display::show(&request.title, style.size, |size| {
            crate::encode::render_rgb(size, |root| draw_control_chart(root, &series, &style, &request.title))
        })
    }

    /// Show a Pareto chart in a window and block until it is closed.
    #[cfg(feature = "display")]
    #[instrument(skip(self, dataset), fields(x = %request.x, y = %request.y, rows = dataset.len()))]
    pub fn render_pareto(&self, dataset: &Dataset, request: &ParetoRequest) -> Result<()> {
        let series = self.pareto_series(dataset, request)?;
        let style = ParetoStyle::from_settings(&self.settings);
        let title = format!("Pareto: {}", series.y_title);

        crate::display::show(&title, style.size, |size| {
            crate::encode::render_rgb(size, |root| draw_pareto(root, &series, &style))
        })
    }

    /// Render a Pareto chart and return PNG bytes
    #[instrument(skip(self, dataset), fields(x = %request.x, y = %request.y, rows = dataset.len()))]
    pub fn render_pareto_png(&self, dataset: &Dataset, request: &ParetoRequest) -> Result<Vec<u8>> {
        let series = self.pareto_series(dataset, request)?;
        let style = ParetoStyle::from_settings(&self.settings);

        let png = render_png(style.size, |root| draw_pareto(root, &series, &style))?;

        tracing::info!(bytes = png.len(), "Rendered Pareto chart PNG");
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_request_builder() {
        let request = ChartRequest::new("week", "tickets");
        assert_eq!(request.title, "Control Chart");
        assert_eq!(request.goal, None);

        let request = request.goal(11.0).title("Weekly tickets");
        assert_eq!(request.goal, Some(11.0));
        assert_eq!(request.title, "Weekly tickets");
    }

    #[test]
    fn test_request_defaults_when_deserialized() {
        let request: ChartRequest = serde_json::from_str(r#"{"x": "week", "y": "tickets"}"#).unwrap();
        assert_eq!(request, ChartRequest::new("week", "tickets"));

        let request: ParetoRequest = serde_json::from_str(r#"{"x": "cause", "y": "count", "hue": "line"}"#).unwrap();
        assert_eq!(request.palette, "viridis");
        assert_eq!(request.hue.as_deref(), Some("line"));
    }

    #[test]
    fn test_vector_requires_goal_before_column_lookup() {
        let renderer = ChartRenderer::default();
        let err = renderer
            .render_vector(&Dataset::new(), &ChartRequest::new("missing", "missing"))
            .unwrap_err();
        assert!(matches!(err, DemingError::MissingGoal));
    }

    #[test]
    fn test_static_propagates_column_errors() {
        let renderer = ChartRenderer::default();
        let err = renderer
            .render_static(&Dataset::new(), &ChartRequest::new("week", "tickets"))
            .unwrap_err();
        assert!(matches!(err, DemingError::InvalidColumn { .. }));
    }

    #[test]
    fn test_pareto_request_options_are_inert() {
        let dataset = Dataset::new()
            .with_column("cause", vec!["a", "b"])
            .unwrap()
            .with_column("count", vec![3.0, 1.0])
            .unwrap();
        let renderer = ChartRenderer::default();

        let plain = renderer.pareto_series(&dataset, &ParetoRequest::new("cause", "count")).unwrap();
        let styled = renderer
            .pareto_series(&dataset, &ParetoRequest::new("cause", "count").hue("cause").palette("magma"))
            .unwrap();
        assert_eq!(plain, styled);
    }
}
