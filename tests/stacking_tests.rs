use chart_axes::aggregation::aggregate_axis_range;
use chart_axes::stacking::{accumulate_stacks, StackFamily};
use chart_axes::{AxisOrientation, Limit, Series, SeriesKind, StackMode};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_percentage_stack() {
    let kind = SeriesKind::StackedColumn(StackMode::Percentage);
    let series = vec![
        Series::from_values("a", kind, &[3.0, 2.0]),
        Series::from_values("b", kind, &[7.0, 1.0]),
    ];

    let groups = accumulate_stacks(&series);
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.key.family, StackFamily::Column);
    assert_eq!(group.key.orientation, AxisOrientation::Y);
    assert_eq!(group.members, vec![0, 1]);
    assert_eq!(group.limit, Limit::new(0.0, 100.0));

    let a: Vec<_> = group.points_of(0).collect();
    let b: Vec<_> = group.points_of(1).collect();

    // Category 0: 3 and 7 of 10
    assert!(close(a[0].value, 30.0));
    assert!(close(b[0].value, 70.0));
    assert!(close(b[0].from, 30.0));
    assert!(close(b[0].to, 100.0));

    // Category 1: 2 and 1 of 3
    assert!(close(a[1].value, 200.0 / 3.0));
    assert!(close(b[1].value, 100.0 / 3.0));
    assert!(close(b[1].to, 100.0));
    assert!(close(a[1].participation, 2.0 / 3.0));
}

#[test]
fn test_percentage_zero_total() {
    let kind = SeriesKind::StackedArea(StackMode::Percentage);
    let series = vec![
        Series::from_values("a", kind, &[0.0]),
        Series::from_values("b", kind, &[0.0]),
    ];

    let groups = accumulate_stacks(&series);
    for p in &groups[0].points {
        assert_eq!(p.value, 0.0);
        assert_eq!(p.participation, 0.0);
    }
    assert_eq!(groups[0].limit, Limit::new(0.0, 100.0));
}

#[test]
fn test_percentage_with_negative_spans_both_sides() {
    let kind = SeriesKind::StackedColumn(StackMode::Percentage);
    let series = vec![
        Series::from_values("a", kind, &[4.0]),
        Series::from_values("b", kind, &[-1.0]),
    ];
    let groups = accumulate_stacks(&series);
    assert_eq!(groups[0].limit, Limit::new(-100.0, 100.0));
}

#[test]
fn test_values_stack_keeps_signs_apart() {
    let kind = SeriesKind::StackedColumn(StackMode::Values);
    let series = vec![
        Series::from_values("a", kind, &[3.0, -2.0]),
        Series::from_values("b", kind, &[7.0, 1.0]),
        Series::from_values("c", kind, &[0.0, -4.0]),
    ];

    let groups = accumulate_stacks(&series);
    let group = &groups[0];
    assert_eq!(group.mode, StackMode::Values);
    assert_eq!(group.limit, Limit::new(-6.0, 10.0));

    // Negative segments grow downwards from zero, independent of positives
    let c: Vec<_> = group.points_of(2).collect();
    assert_eq!(c[1].from, -2.0);
    assert_eq!(c[1].to, -6.0);
    let b: Vec<_> = group.points_of(1).collect();
    assert_eq!(b[1].from, 0.0);
    assert_eq!(b[1].to, 1.0);
}

#[test]
fn test_groups_split_by_family_and_axis() {
    let series = vec![
        Series::from_values("col", SeriesKind::StackedColumn(StackMode::Values), &[1.0]),
        Series::from_values("area", SeriesKind::StackedArea(StackMode::Values), &[2.0]),
        Series::from_values("col2", SeriesKind::StackedColumn(StackMode::Values), &[5.0])
            .with_axes(0, 1),
        Series::from_values("row", SeriesKind::StackedRow(StackMode::Values), &[3.0]),
        Series::from_values("line", SeriesKind::Line, &[9.0]),
    ];

    let groups = accumulate_stacks(&series);
    assert_eq!(groups.len(), 4);

    let row = groups
        .iter()
        .find(|g| g.key.family == StackFamily::Row)
        .unwrap();
    assert_eq!(row.key.orientation, AxisOrientation::X);
    assert_eq!(row.limit, Limit::new(0.0, 3.0));

    let second_axis = groups
        .iter()
        .find(|g| g.key.family == StackFamily::Column && g.key.axis_index == 1)
        .unwrap();
    assert_eq!(second_axis.members, vec![2]);
}

#[test]
fn test_one_percentage_member_switches_the_group() {
    let series = vec![
        Series::from_values("a", SeriesKind::StackedColumn(StackMode::Values), &[1.0]),
        Series::from_values("b", SeriesKind::StackedColumn(StackMode::Percentage), &[3.0]),
    ];
    let groups = accumulate_stacks(&series);
    assert_eq!(groups[0].mode, StackMode::Percentage);
    assert!(close(groups[0].points[0].value, 25.0));
}

#[test]
fn test_percentage_mode_spans_the_whole_family() {
    let series = vec![
        Series::from_values("left", SeriesKind::StackedColumn(StackMode::Values), &[4.0, 6.0]),
        // Same family, other Y axis
        Series::from_values("right", SeriesKind::StackedColumn(StackMode::Percentage), &[1.0])
            .with_axes(0, 1),
        // Another family stays in values mode
        Series::from_values("area", SeriesKind::StackedArea(StackMode::Values), &[4.0, 6.0]),
    ];

    let groups = accumulate_stacks(&series);
    assert_eq!(groups.len(), 3);

    let left = groups
        .iter()
        .find(|g| g.key.family == StackFamily::Column && g.key.axis_index == 0)
        .unwrap();
    assert_eq!(left.mode, StackMode::Percentage);
    assert_eq!(left.limit, Limit::new(0.0, 100.0));
    // A lone member holds the whole category
    assert!(left.points.iter().all(|p| close(p.value, 100.0)));

    let area = groups
        .iter()
        .find(|g| g.key.family == StackFamily::Area)
        .unwrap();
    assert_eq!(area.mode, StackMode::Values);
    assert_eq!(area.limit, Limit::new(0.0, 6.0));
}

#[test]
fn test_axis_range_uses_stack_extent() {
    let kind = SeriesKind::StackedColumn(StackMode::Values);
    let series = vec![
        Series::from_values("a", kind, &[3.0, 2.0]),
        Series::from_values("b", kind, &[7.0, 1.0]),
    ];
    let stacks = accumulate_stacks(&series);

    // Members alone would span 1..7; the stack reaches 10
    let summary = aggregate_axis_range(&series, &stacks, AxisOrientation::Y, 0, 0.0);
    assert_eq!(summary.limit, Limit::new(0.0, 10.0));
    assert_eq!(summary.contributors, 1);

    // Categories still count on the other axis, widened by one bar unit
    let summary = aggregate_axis_range(&series, &stacks, AxisOrientation::X, 0, 1.0);
    assert_eq!(summary.limit, Limit::new(0.0, 2.0));
    assert_eq!(summary.contributors, 2);
}
