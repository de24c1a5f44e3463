use chart_axes::scales::{from_pixel, to_pixel, unit_width_px, AxisScale};
use chart_axes::{AxisOrientation, DrawArea, Limit};

fn area() -> DrawArea {
    DrawArea::new(40.0, 10.0, 500.0, 200.0)
}

#[test]
fn test_horizontal_scale() {
    let scale = AxisScale::new(Limit::new(0.0, 100.0), area(), AxisOrientation::X);

    assert_eq!(scale.map(0.0), 40.0);
    assert_eq!(scale.map(50.0), 290.0);
    assert_eq!(scale.map(100.0), 540.0);

    assert_eq!(scale.invert(40.0), 0.0);
    assert_eq!(scale.invert(290.0), 50.0);
}

#[test]
fn test_vertical_scale_is_inverted() {
    let scale = AxisScale::new(Limit::new(0.0, 100.0), area(), AxisOrientation::Y);

    // Max at the top edge, min at the bottom edge
    assert_eq!(scale.map(100.0), 10.0);
    assert_eq!(scale.map(0.0), 210.0);
    assert_eq!(scale.map(25.0), 160.0);
}

#[test]
fn test_round_trip() {
    let limits = Limit::new(-37.5, 1250.0);
    for orientation in [AxisOrientation::X, AxisOrientation::Y] {
        for v in [-37.5, 0.0, 12.25, 600.0, 1250.0] {
            let px = to_pixel(v, limits, area(), orientation);
            let back = from_pixel(px, limits, area(), orientation);
            assert!((back - v).abs() < 1e-9, "{orientation:?}: {v} -> {px} -> {back}");
        }
    }
}

#[test]
fn test_unit_width() {
    let limits = Limit::new(0.0, 10.0);
    assert_eq!(unit_width_px(1.0, limits, area(), AxisOrientation::X), 50.0);
    // Positive even though Y grows upwards
    assert_eq!(unit_width_px(1.0, limits, area(), AxisOrientation::Y), 20.0);
}

#[test]
fn test_degenerate_span_maps_to_origin() {
    let scale = AxisScale::new(Limit::new(5.0, 5.0), area(), AxisOrientation::X);
    assert_eq!(scale.map(5.0), 40.0);
    assert_eq!(scale.map(1e9), 40.0);
}
