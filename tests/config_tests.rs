use chart_axes::{AxisOrientation, ChartConfig, ZoomingOptions};

#[test]
fn test_partial_json_keeps_defaults() {
    let config = ChartConfig::from_json_str(
        r#"{ "design_mode": true, "label_budget": { "y_px": 20 }, "starting_color_offset": 2 }"#,
    )
    .unwrap();

    assert!(config.design_mode);
    assert_eq!(config.label_budget.y_px, 20.0);
    assert_eq!(config.label_budget.x_px, 50.0);
    assert_eq!(config.clean_factor, 3.0);
    assert!(config.animations_enabled);
    assert_eq!(config.series_colors.len(), 10);
}

#[test]
fn test_invalid_json_reports_context() {
    let err = ChartConfig::from_json_str("{ \"clean_factor\": \"lots\" }").unwrap_err();
    assert_eq!(err.to_string(), "failed to parse chart configuration");
    assert!(format!("{err:?}").contains("invalid type"));
}

#[test]
fn test_config_file() {
    let path = std::env::temp_dir().join(format!("chart_axes_config_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "animations_enabled": false, "debounce_ms": 40 }"#).unwrap();

    let config = ChartConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(!config.animations_enabled);
    assert_eq!(config.debounce().as_millis(), 10);

    let missing = ChartConfig::from_json_file(&path).unwrap_err();
    assert!(missing.to_string().starts_with("failed to read chart configuration"));
}

#[test]
fn test_series_palette_cycles() {
    let config = ChartConfig {
        series_colors: vec!["#000000".into(), "#ffffff".into()],
        starting_color_offset: 1,
        ..ChartConfig::default()
    };
    assert_eq!(config.series_color(0), Some("#ffffff"));
    assert_eq!(config.series_color(1), Some("#000000"));
    assert_eq!(config.series_color(4), Some("#ffffff"));

    let empty = ChartConfig {
        series_colors: vec![],
        ..ChartConfig::default()
    };
    assert_eq!(empty.series_color(0), None);
}

#[test]
fn test_zoom_settings() {
    let config = ChartConfig::default();
    assert_eq!(config.zoom, ZoomingOptions::None);
    assert_eq!(config.zooming_speed, 0.8);

    let config = ChartConfig::from_json_str(r#"{ "zoom": "Xy", "zooming_speed": 0.5 }"#).unwrap();
    assert!(config.zoom.allows(AxisOrientation::X));
    assert!(config.zoom.allows(AxisOrientation::Y));
    assert_eq!(config.zooming_speed, 0.5);

    assert!(ZoomingOptions::Y.allows(AxisOrientation::Y));
    assert!(!ZoomingOptions::Y.allows(AxisOrientation::X));
    assert!(!ZoomingOptions::None.allows(AxisOrientation::X));
}
