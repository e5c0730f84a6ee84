//! Resolved drawing styles for each chart flavor

use deming_config::{validation::parse_hex_color, FontSettings, RenderSettings};
use plotters::style::RGBColor;

/// Parse a `#RRGGBB` string, falling back to black.
///
/// Settings are validated on load, so the fallback only applies to
/// hand-built settings that skipped validation.
#[must_use]
pub fn parse_color(color: &str) -> RGBColor {
    parse_hex_color(color).map_or(RGBColor(0, 0, 0), |(r, g, b)| RGBColor(r, g, b))
}

/// Helper struct for font configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// Font family
    pub family: String,
    /// Caption size
    pub title_size: u32,
    /// Axis, tick and legend size
    pub label_size: u32,
}

impl From<&FontSettings> for FontSpec {
    fn from(config: &FontSettings) -> Self {
        Self {
            family: config.family.clone(),
            title_size: config.title_size,
            label_size: config.label_size,
        }
    }
}

/// How the goal, mean and limit series are stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceLine {
    /// Solid line with a cross at every row
    SolidWithMarkers,
    /// Dashed line without markers
    Dashed,
}

/// Marker drawn at each measured value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMarker {
    /// Diagonal cross
    Cross,
    /// Filled circle
    Circle,
}

/// Everything the control chart drawing routine needs besides the data
#[derive(Debug, Clone)]
pub struct ControlChartStyle {
    /// Canvas size in pixels
    pub size: (u32, u32),
    /// Background fill
    pub background: RGBColor,
    /// Fonts
    pub fonts: FontSpec,
    /// Measured values
    pub values: RGBColor,
    /// Trendline
    pub trendline: RGBColor,
    /// Goal line
    pub goal: RGBColor,
    /// Mean line
    pub mean: RGBColor,
    /// Control limits
    pub limits: RGBColor,
    /// Stroke of the goal, mean and limit series
    pub reference_line: ReferenceLine,
    /// Marker at each measured value
    pub value_marker: ValueMarker,
    /// Put the value column title on the horizontal axis
    pub swap_axis_titles: bool,
    /// Turn category tick labels sideways
    pub rotate_x_labels: bool,
}

impl ControlChartStyle {
    /// Style of the PNG and interactive control charts
    #[must_use]
    pub fn raster(settings: &RenderSettings) -> Self {
        let palette = &settings.control_palette;
        Self {
            size: settings.raster.size(),
            background: parse_color(&settings.background_color),
            fonts: FontSpec::from(&settings.fonts),
            values: parse_color(&palette.values),
            trendline: parse_color(&palette.trendline),
            goal: parse_color(&palette.goal),
            mean: parse_color(&palette.mean),
            limits: parse_color(&palette.limits),
            reference_line: ReferenceLine::SolidWithMarkers,
            value_marker: ValueMarker::Cross,
            swap_axis_titles: false,
            rotate_x_labels: true,
        }
    }

    /// Style of the SVG control chart
    #[must_use]
    pub fn vector(settings: &RenderSettings) -> Self {
        let palette = &settings.vector_palette;
        Self {
            size: settings.vector.canvas().size(),
            background: parse_color(&settings.background_color),
            fonts: FontSpec::from(&settings.fonts),
            values: parse_color(&palette.values),
            trendline: parse_color(&palette.trendline),
            goal: parse_color(&palette.goal),
            mean: parse_color(&palette.mean),
            limits: parse_color(&palette.limits),
            reference_line: ReferenceLine::Dashed,
            value_marker: ValueMarker::Circle,
            swap_axis_titles: settings.vector.swap_axis_titles,
            rotate_x_labels: false,
        }
    }
}

/// Everything the Pareto drawing routine needs besides the data
#[derive(Debug, Clone)]
pub struct ParetoStyle {
    /// Canvas size in pixels
    pub size: (u32, u32),
    /// Background fill
    pub background: RGBColor,
    /// Fonts
    pub fonts: FontSpec,
    /// Bars and primary axis labels
    pub bars: RGBColor,
    /// Cumulative line and secondary axis labels
    pub cumulative: RGBColor,
}

impl ParetoStyle {
    /// Style of the Pareto chart
    #[must_use]
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            size: settings.pareto.size(),
            background: parse_color(&settings.background_color),
            fonts: FontSpec::from(&settings.fonts),
            bars: parse_color(&settings.pareto_palette.bars),
            cumulative: parse_color(&settings.pareto_palette.cumulative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#bfbf00"), RGBColor(191, 191, 0));

        assert_eq!(parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#ZZ0000"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_raster_style_defaults() {
        let style = ControlChartStyle::raster(&RenderSettings::default());

        assert_eq!(style.size, (1200, 600));
        assert_eq!(style.values, RGBColor(255, 0, 0));
        assert_eq!(style.trendline, RGBColor(0, 0, 255));
        assert_eq!(style.goal, RGBColor(0, 128, 0));
        assert_eq!(style.mean, RGBColor(255, 165, 0));
        assert_eq!(style.reference_line, ReferenceLine::SolidWithMarkers);
        assert_eq!(style.background, RGBColor(255, 255, 255));
    }

    #[test]
    fn test_vector_style_follows_settings() {
        let mut settings = RenderSettings::default();
        settings.vector.swap_axis_titles = true;

        let style = ControlChartStyle::vector(&settings);
        assert_eq!(style.size, (1600, 600));
        assert_eq!(style.goal, RGBColor(255, 255, 0));
        assert_eq!(style.reference_line, ReferenceLine::Dashed);
        assert_eq!(style.value_marker, ValueMarker::Circle);
        assert!(style.swap_axis_titles);
    }

    #[test]
    fn test_pareto_style() {
        let style = ParetoStyle::from_settings(&RenderSettings::default());
        assert_eq!(style.size, (640, 480));
        assert_eq!(style.bars, RGBColor(31, 119, 180));
        assert_eq!(style.fonts.family, "sans-serif");
    }
}
