use serde::{Deserialize, Serialize};

use super::axis::{AxisOrientation, Limit};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn coordinate(&self, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::X => self.x,
            AxisOrientation::Y => self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StackMode {
    #[default]
    Values,
    /// Every category is normalized so absolute contributions sum to 100.
    Percentage,
}

/// What a series draws, which decides how the core treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    StepLine,
    Scatter,
    Column,
    Row,
    StackedColumn(StackMode),
    StackedRow(StackMode),
    StackedArea(StackMode),
    VerticalStackedArea(StackMode),
    /// Radial series; cannot be plotted against Cartesian axes.
    Pie,
}

impl SeriesKind {
    pub fn is_cartesian(&self) -> bool {
        !matches!(self, Self::Pie)
    }

    /// Orientation along which values pile up, if the series stacks.
    pub fn stacked_orientation(&self) -> Option<AxisOrientation> {
        match self {
            Self::StackedColumn(_) | Self::StackedArea(_) => Some(AxisOrientation::Y),
            Self::StackedRow(_) | Self::VerticalStackedArea(_) => Some(AxisOrientation::X),
            _ => None,
        }
    }

    pub fn stack_mode(&self) -> Option<StackMode> {
        match self {
            Self::StackedColumn(m)
            | Self::StackedRow(m)
            | Self::StackedArea(m)
            | Self::VerticalStackedArea(m) => Some(*m),
            _ => None,
        }
    }

    /// Orientation on which bars occupy a whole unit, if any.
    pub fn unit_width_orientation(&self) -> Option<AxisOrientation> {
        match self {
            Self::Column | Self::StackedColumn(_) => Some(AxisOrientation::X),
            Self::Row | Self::StackedRow(_) => Some(AxisOrientation::Y),
            _ => None,
        }
    }
}

/// A named run of points bound to one X axis and one Y axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub kind: SeriesKind,
    pub points: Vec<DataPoint>,
    pub scales_x_at: usize,
    pub scales_y_at: usize,
    /// Largest marker radius in pixels; pads the draw margin.
    pub point_radius: f64,
}

impl Series {
    pub fn new(id: impl Into<String>, kind: SeriesKind, points: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            kind,
            points,
            scales_x_at: 0,
            scales_y_at: 0,
            point_radius: 0.0,
        }
    }

    /// Values indexed by category. Horizontal stacks (rows) put the value on X.
    pub fn from_values(id: impl Into<String>, kind: SeriesKind, values: &[f64]) -> Self {
        let horizontal = matches!(
            kind,
            SeriesKind::Row | SeriesKind::StackedRow(_) | SeriesKind::VerticalStackedArea(_)
        );
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if horizontal {
                    DataPoint::new(*v, i as f64)
                } else {
                    DataPoint::new(i as f64, *v)
                }
            })
            .collect();
        Self::new(id, kind, points)
    }

    pub fn with_axes(mut self, scales_x_at: usize, scales_y_at: usize) -> Self {
        self.scales_x_at = scales_x_at;
        self.scales_y_at = scales_y_at;
        self
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }

    pub fn scales_at(&self, orientation: AxisOrientation) -> usize {
        match orientation {
            AxisOrientation::X => self.scales_x_at,
            AxisOrientation::Y => self.scales_y_at,
        }
    }

    /// Extent of finite coordinates along `orientation`, `None` when there are none.
    pub fn limit(&self, orientation: AxisOrientation) -> Option<Limit> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &self.points {
            let v = p.coordinate(orientation);
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            None
        } else {
            Some(Limit::new(min, max))
        }
    }
}
