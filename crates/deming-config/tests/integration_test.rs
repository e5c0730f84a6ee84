//! Integration tests for deming-config crate.

use deming_common::DemingError;
use deming_config::{RenderSettings, SettingsLoader};
use std::io::Write;

#[test]
fn test_load_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "fonts:\n  family: serif\n  title_size: 30\n  label_size: 12\ncontrol_palette:\n  values: \"#AA0000\"\n  trendline: \"#0000AA\"\n  goal: \"#00AA00\"\n  mean: \"#FF8800\"\n  limits: \"#888800\""
    )
    .unwrap();

    let settings = SettingsLoader::load_from_file(file.path()).unwrap();
    assert_eq!(settings.fonts.family, "serif");
    assert_eq!(settings.fonts.title_size, 30);
    assert_eq!(settings.control_palette.values, "#AA0000");
    assert_eq!(settings.vector_palette, RenderSettings::default().vector_palette);
}

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[vector]\nwidth = 2000\nheight = 700\nswap_axis_titles = true").unwrap();

    let settings = SettingsLoader::load_from_file(file.path()).unwrap();
    assert_eq!(settings.vector.canvas().size(), (2000, 700));
    assert!(settings.vector.swap_axis_titles);
}

#[test]
fn test_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();

    let err = SettingsLoader::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, DemingError::Config { .. }));
    assert!(err.to_string().contains("Unsupported settings format"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = SettingsLoader::load_from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, DemingError::Io(_)));
}

#[test]
fn test_out_of_range_canvas_rejected_on_load() {
    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    writeln!(file, "pareto:\n  width: 50\n  height: 480").unwrap();

    let err = SettingsLoader::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed validation"));
}
