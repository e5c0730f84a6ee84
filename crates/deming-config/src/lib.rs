//! # Deming Config
//!
//! Render settings for control and Pareto charts: canvas sizes, fonts and
//! per-series colors, loaded from YAML or TOML and validated on load.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::SettingsLoader;
pub use settings::{
    CanvasSettings, ControlPalette, FontSettings, ParetoPalette, RenderSettings, VectorSettings,
};
