//! Axis scaling, stacking and separator lifecycle engine for animated charts.
//!
//! Given series and a draw area, the engine resolves each axis' limits and
//! separator step, stacks grouped series, and diffs separators against the
//! previous cycle so a view layer can animate them instead of redrawing.

pub mod aggregation;
pub mod chart;
pub mod config;
pub mod data_types;
pub mod error;
pub mod format;
pub mod scales;
pub mod separators;
pub mod stabilizer;
pub mod stacking;
pub mod ticks;
pub mod updater;
pub mod utils;

pub use chart::{AxisFrame, ChartCore, PendingFrame, UpdateFrame};
pub use config::{ChartConfig, ZoomingOptions};
pub use data_types::{
    Axis, AxisOptions, AxisOrientation, DataPoint, DrawArea, Limit, Series, SeriesKind, StackMode,
};
pub use error::{ChartError, ChartResult};
pub use format::LabelFormatter;
pub use separators::{Separator, SeparatorKey, SeparatorState, SeparatorTransition, TransitionKind};
pub use updater::UpdateScheduler;
