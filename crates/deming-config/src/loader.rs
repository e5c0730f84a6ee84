//! Render settings loading

use crate::RenderSettings;
use deming_common::{DemingError, Result};
use std::path::Path;
use validator::Validate;

/// Loads [`RenderSettings`] from YAML or TOML and validates them
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a file, choosing the parser by extension
    /// (`.yaml`/`.yml` or `.toml`)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path)?;
        let settings = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            other => {
                return Err(DemingError::config(format!(
                    "Unsupported settings format '{}' for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };

        tracing::info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate YAML settings
    pub fn from_yaml_str(content: &str) -> Result<RenderSettings> {
        let settings: RenderSettings = serde_yaml::from_str(content)?;
        Self::validated(settings)
    }

    /// Parse and validate TOML settings
    pub fn from_toml_str(content: &str) -> Result<RenderSettings> {
        let settings: RenderSettings = toml::from_str(content)?;
        Self::validated(settings)
    }

    fn validated(settings: RenderSettings) -> Result<RenderSettings> {
        settings
            .validate()
            .map_err(|e| DemingError::config_with_source("Render settings failed validation", e))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = SettingsLoader::from_yaml_str(
            "raster:\n  width: 800\n  height: 400\nvector:\n  swap_axis_titles: true\n",
        )
        .unwrap();

        assert_eq!(settings.raster.size(), (800, 400));
        assert!(settings.vector.swap_axis_titles);
        assert_eq!(settings.vector.width, 1600);
        assert_eq!(settings, RenderSettings {
            raster: settings.raster,
            vector: settings.vector,
            ..RenderSettings::default()
        });
    }

    #[test]
    fn test_toml_palette_override() {
        let settings = SettingsLoader::from_toml_str(
            r##"
background_color = "#F8F9FA"

[pareto_palette]
bars = "#336699"
cumulative = "#CC3300"
"##,
        )
        .unwrap();

        assert_eq!(settings.background_color, "#F8F9FA");
        assert_eq!(settings.pareto_palette.bars, "#336699");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let err = SettingsLoader::from_yaml_str("background_color: white\n").unwrap_err();
        assert!(matches!(err, DemingError::Config { .. }));
        assert!(err.to_string().contains("failed validation"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = SettingsLoader::from_toml_str("[raster\nwidth = 1").unwrap_err();
        assert!(matches!(err, DemingError::Config { .. }));
    }
}
