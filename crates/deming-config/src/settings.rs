//! Render settings structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings shared by every chart the renderer produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas for the PNG and interactive control charts
    #[validate]
    pub raster: CanvasSettings,

    /// Canvas and layout for the SVG control chart
    #[validate]
    pub vector: VectorSettings,

    /// Canvas for the Pareto chart
    #[validate]
    pub pareto: CanvasSettings,

    /// Title and label fonts
    #[validate]
    pub fonts: FontSettings,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Series colors for the PNG and interactive control charts
    #[validate]
    pub control_palette: ControlPalette,

    /// Series colors for the SVG control chart
    #[validate]
    pub vector_palette: ControlPalette,

    /// Bar and cumulative line colors for the Pareto chart
    #[validate]
    pub pareto_palette: ParetoPalette,
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CanvasSettings {
    /// Width in pixels
    #[validate(range(min = 100, max = 8000, message = "Width must be between 100 and 8000 pixels"))]
    pub width: u32,

    /// Height in pixels
    #[validate(range(min = 100, max = 8000, message = "Height must be between 100 and 8000 pixels"))]
    pub height: u32,
}

impl CanvasSettings {
    /// Create canvas settings from a width and height
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The `(width, height)` pair plotters backends expect
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// SVG control chart layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VectorSettings {
    /// Width in pixels
    #[validate(range(min = 100, max = 8000, message = "Width must be between 100 and 8000 pixels"))]
    pub width: u32,

    /// Height in pixels
    #[validate(range(min = 100, max = 8000, message = "Height must be between 100 and 8000 pixels"))]
    pub height: u32,

    /// Label the horizontal axis with the value column and the vertical
    /// axis with the category column, as older reports did
    pub swap_axis_titles: bool,
}

impl VectorSettings {
    /// Canvas part of the vector settings
    #[must_use]
    pub const fn canvas(&self) -> CanvasSettings {
        CanvasSettings::new(self.width, self.height)
    }
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FontSettings {
    /// Font family for all text
    #[validate(custom(function = "crate::validation::validate_font_family", message = "Font family cannot be empty"))]
    pub family: String,

    /// Chart title size
    #[validate(range(min = 8, max = 96, message = "Title size must be between 8 and 96"))]
    pub title_size: u32,

    /// Axis, tick and legend label size
    #[validate(range(min = 6, max = 72, message = "Label size must be between 6 and 72"))]
    pub label_size: u32,
}

/// Colors of the control chart series (hex format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ControlPalette {
    /// Measured values
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Values color must be valid hex color"))]
    pub values: String,

    /// Fitted trendline
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Trendline color must be valid hex color"))]
    pub trendline: String,

    /// Goal line
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Goal color must be valid hex color"))]
    pub goal: String,

    /// Mean line
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Mean color must be valid hex color"))]
    pub mean: String,

    /// Upper and lower control limits
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Limits color must be valid hex color"))]
    pub limits: String,
}

/// Colors of the Pareto chart series (hex format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ParetoPalette {
    /// Bars and primary axis ticks
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Bar color must be valid hex color"))]
    pub bars: String,

    /// Cumulative line and secondary axis ticks
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Cumulative color must be valid hex color"))]
    pub cumulative: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            raster: CanvasSettings::new(1200, 600),
            vector: VectorSettings::default(),
            pareto: CanvasSettings::new(640, 480),
            fonts: FontSettings::default(),
            background_color: "#FFFFFF".to_string(),
            control_palette: ControlPalette::raster(),
            vector_palette: ControlPalette::vector(),
            pareto_palette: ParetoPalette::default(),
        }
    }
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            swap_axis_titles: false,
        }
    }
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            title_size: 24,
            label_size: 14,
        }
    }
}

impl ControlPalette {
    /// Red values, blue trendline, green goal, orange mean, olive limits
    #[must_use]
    pub fn raster() -> Self {
        Self {
            values: "#FF0000".to_string(),
            trendline: "#0000FF".to_string(),
            goal: "#008000".to_string(),
            mean: "#FFA500".to_string(),
            limits: "#BFBF00".to_string(),
        }
    }

    /// Blue values, purple trendline, yellow goal, green mean, red limits
    #[must_use]
    pub fn vector() -> Self {
        Self {
            values: "#0000FF".to_string(),
            trendline: "#800080".to_string(),
            goal: "#FFFF00".to_string(),
            mean: "#008000".to_string(),
            limits: "#FF0000".to_string(),
        }
    }
}

impl Default for ParetoPalette {
    fn default() -> Self {
        Self {
            bars: "#1F77B4".to_string(),
            cumulative: "#FF7F0E".to_string(),
        }
    }
}
