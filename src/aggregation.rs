//! Raw data extents per axis.

use rayon::prelude::*;

use crate::data_types::{AxisOrientation, Limit, Series};
use crate::stacking::StackedGroup;

/// What the series bound to one axis span, before any stabilization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeSummary {
    /// `(0, 0)` when nothing contributes.
    pub limit: Limit,
    /// Largest marker radius among bound series, in pixels.
    pub max_point_radius: f64,
    /// Series and stacking groups that produced a finite extent.
    pub contributors: usize,
}

#[derive(Clone, Copy, Debug)]
struct Partial {
    limit: Option<Limit>,
    radius: f64,
    contributors: usize,
}

impl Partial {
    const EMPTY: Partial = Partial {
        limit: None,
        radius: 0.0,
        contributors: 0,
    };

    fn merge(self, other: Partial) -> Partial {
        let limit = match (self.limit, other.limit) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        };
        Partial {
            limit,
            radius: self.radius.max(other.radius),
            contributors: self.contributors + other.contributors,
        }
    }
}

fn is_stacked_on(series: &Series, orientation: AxisOrientation) -> bool {
    series.kind.stacked_orientation() == Some(orientation)
}

/// Aggregates the extent of every series bound to `axis_index` along
/// `orientation`. Stacked members are represented by their group's limit.
/// `unit_extension` widens the max so the last bar fits (0 when unused).
pub fn aggregate_axis_range(
    series: &[Series],
    stacks: &[StackedGroup],
    orientation: AxisOrientation,
    axis_index: usize,
    unit_extension: f64,
) -> RangeSummary {
    let from_series = series
        .par_iter()
        .filter(|s| s.kind.is_cartesian() && s.scales_at(orientation) == axis_index)
        .map(|s| {
            let limit = if is_stacked_on(s, orientation) {
                None
            } else {
                s.limit(orientation)
            };
            Partial {
                limit,
                radius: s.point_radius.max(0.0),
                contributors: usize::from(limit.is_some()),
            }
        })
        .reduce(|| Partial::EMPTY, Partial::merge);

    let total = stacks
        .iter()
        .filter(|g| g.key.orientation == orientation && g.key.axis_index == axis_index)
        .map(|g| Partial {
            limit: Some(g.limit),
            radius: 0.0,
            contributors: 1,
        })
        .fold(from_series, Partial::merge);

    let mut limit = total.limit.unwrap_or_default();
    if unit_extension > 0.0 {
        limit.max += unit_extension;
    }

    RangeSummary {
        limit,
        max_point_radius: total.radius,
        contributors: total.contributors,
    }
}
