//! Per-category accumulation of stacked series.
//!
//! A stacking group is every stacked series of one family bound to the same
//! axis on the stacked orientation. The group contributes a single extent to
//! that axis, in place of its members' raw values.
//!
//! The stack mode is chosen per family: a single percentage member switches
//! every group of its family, on every axis, to percentages.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::data_types::{AxisOrientation, Limit, Series, SeriesKind, StackMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StackFamily {
    Column,
    Row,
    Area,
    VerticalArea,
}

impl StackFamily {
    fn of(kind: &SeriesKind) -> Option<Self> {
        match kind {
            SeriesKind::StackedColumn(_) => Some(Self::Column),
            SeriesKind::StackedRow(_) => Some(Self::Row),
            SeriesKind::StackedArea(_) => Some(Self::Area),
            SeriesKind::VerticalStackedArea(_) => Some(Self::VerticalArea),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackGroupKey {
    pub family: StackFamily,
    /// Orientation values pile up along.
    pub orientation: AxisOrientation,
    pub axis_index: usize,
}

/// One member's segment at one category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedPoint {
    /// Index of the member in the chart's series list.
    pub series_index: usize,
    pub category: i64,
    /// Value as plotted (a share of 100 in percentage mode).
    pub value: f64,
    pub from: f64,
    pub to: f64,
    /// Fraction of the category's absolute total this member holds.
    pub participation: f64,
}

/// Running totals for one group, alive for one update cycle.
#[derive(Debug, Default)]
struct StackedBucket {
    members: Vec<usize>,
    mode: StackMode,
    /// Sum of absolute values per category.
    totals: BTreeMap<i64, f64>,
    positive: BTreeMap<i64, f64>,
    negative: BTreeMap<i64, f64>,
    has_negative: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StackedGroup {
    pub key: StackGroupKey,
    pub mode: StackMode,
    pub members: Vec<usize>,
    pub limit: Limit,
    pub points: Vec<StackedPoint>,
}

impl StackedGroup {
    /// Segments of one member, ordered by category.
    pub fn points_of(&self, series_index: usize) -> impl Iterator<Item = &StackedPoint> {
        self.points
            .iter()
            .filter(move |p| p.series_index == series_index)
    }
}

/// Finite `(category, value)` pairs of a stacked series.
fn stacked_values(series: &Series, orientation: AxisOrientation) -> impl Iterator<Item = (i64, f64)> + '_ {
    let category_axis = orientation.invert();
    series.points.iter().filter_map(move |p| {
        let category = p.coordinate(category_axis);
        let value = p.coordinate(orientation);
        if category.is_finite() && value.is_finite() {
            Some((category.round() as i64, value))
        } else {
            None
        }
    })
}

/// Builds every stacking group present in `series`, ordered by key.
pub fn accumulate_stacks(series: &[Series]) -> Vec<StackedGroup> {
    let mut buckets: BTreeMap<StackGroupKey, StackedBucket> = BTreeMap::new();
    let percentage_families: BTreeSet<StackFamily> = series
        .iter()
        .filter(|s| s.kind.stack_mode() == Some(StackMode::Percentage))
        .filter_map(|s| StackFamily::of(&s.kind))
        .collect();

    for (index, s) in series.iter().enumerate() {
        let (Some(family), Some(orientation)) =
            (StackFamily::of(&s.kind), s.kind.stacked_orientation())
        else {
            continue;
        };
        let key = StackGroupKey {
            family,
            orientation,
            axis_index: s.scales_at(orientation),
        };
        let bucket = buckets.entry(key).or_default();
        bucket.members.push(index);
        if percentage_families.contains(&family) {
            bucket.mode = StackMode::Percentage;
        }
        for (category, value) in stacked_values(s, orientation) {
            *bucket.totals.entry(category).or_insert(0.0) += value.abs();
            if value < 0.0 {
                bucket.has_negative = true;
            }
        }
    }

    buckets
        .into_iter()
        .map(|(key, bucket)| finish_group(key, bucket, series))
        .collect()
}

fn finish_group(key: StackGroupKey, mut bucket: StackedBucket, series: &[Series]) -> StackedGroup {
    let mut points = Vec::new();

    for &index in &bucket.members {
        for (category, raw) in stacked_values(&series[index], key.orientation) {
            let total = bucket.totals.get(&category).copied().unwrap_or(0.0);
            let participation = if total == 0.0 { 0.0 } else { raw.abs() / total };
            let value = match bucket.mode {
                StackMode::Values => raw,
                StackMode::Percentage if total == 0.0 => 0.0,
                StackMode::Percentage => raw / total * 100.0,
            };

            let running = if value < 0.0 {
                bucket.negative.entry(category).or_insert(0.0)
            } else {
                bucket.positive.entry(category).or_insert(0.0)
            };
            let from = *running;
            *running += value;

            points.push(StackedPoint {
                series_index: index,
                category,
                value,
                from,
                to: *running,
                participation,
            });
        }
    }

    let limit = match bucket.mode {
        StackMode::Percentage if bucket.has_negative => Limit::new(-100.0, 100.0),
        StackMode::Percentage => Limit::new(0.0, 100.0),
        StackMode::Values => {
            let min = bucket.negative.values().copied().fold(0.0, f64::min);
            let max = bucket.positive.values().copied().fold(0.0, f64::max);
            Limit::new(min, max)
        }
    };

    trace!(
        ?key,
        members = bucket.members.len(),
        categories = bucket.totals.len(),
        min = limit.min,
        max = limit.max,
        "stacked group accumulated"
    );

    StackedGroup {
        key,
        mode: bucket.mode,
        members: bucket.members,
        limit,
        points,
    }
}
