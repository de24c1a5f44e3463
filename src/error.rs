use crate::data_types::AxisOrientation;
use thiserror::Error;

/// Errors surfaced synchronously by the update cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// The axis range collapsed to a single value and could not be widened.
    #[error("{orientation:?} axis {index} range cannot be established (min == max)")]
    InvalidAxisRange {
        orientation: AxisOrientation,
        index: usize,
    },

    /// A series without Cartesian capability was bound to a Cartesian chart.
    #[error("series `{series}` is not a Cartesian series")]
    NotACartesianSeries { series: String },

    #[error("series `{series}` scales at {orientation:?} axis {index}, but only {count} are declared")]
    AxisIndexOutOfRange {
        series: String,
        orientation: AxisOrientation,
        index: usize,
        count: usize,
    },

    /// A user forced step must be finite and strictly positive.
    #[error("invalid separator step {0}")]
    InvalidStep(f64),

    /// Logic defect: a separator carries a state outside the lifecycle.
    #[error("invalid separator state {0}")]
    InvalidSeparatorState(u8),

    #[error("no {orientation:?} axis at index {index}")]
    AxisNotFound {
        orientation: AxisOrientation,
        index: usize,
    },

    /// Zoom factors scale the visible span and must be finite and positive.
    #[error("invalid zoom factor {0}")]
    InvalidZoomFactor(f64),

    #[error("invalid draw area (left {left}, top {top}, width {width}, height {height})")]
    InvalidDrawArea {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
}

pub type ChartResult<T> = Result<T, ChartError>;
