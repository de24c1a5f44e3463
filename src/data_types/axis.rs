use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::format::{format_from_labels, LabelFormatter};
use crate::separators::SeparatorCache;

/// Dimension an axis scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisOrientation {
    /// Horizontal (first) dimension.
    X,
    /// Vertical (second) dimension. Pixel space grows opposite to data.
    Y,
}

impl AxisOrientation {
    pub fn invert(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Sign applied to pixel offsets along this axis.
    pub fn direction(self) -> f64 {
        match self {
            Self::X => 1.0,
            Self::Y => -1.0,
        }
    }
}

/// Immutable data-space extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub min: f64,
    pub max: f64,
}

impl Limit {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when the extent is narrower than a hundredth of `step`.
    pub fn is_collapsed(&self, step: f64) -> bool {
        !(self.span().abs() >= step * 0.01)
    }

    /// Smallest extent covering both.
    pub fn union(&self, other: &Limit) -> Limit {
        Limit::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// Pixel rectangle inside which data is plotted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Pixel length available along `orientation`.
    pub fn length(&self, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::X => self.width,
            AxisOrientation::Y => self.height,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidDrawArea {
                left: self.left,
                top: self.top,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// User facing axis settings. `None` means "derive from data".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Forced separator step, used verbatim.
    pub step: Option<f64>,
    /// Data width of one bar unit when column/row series are bound.
    pub unit: Option<f64>,
    /// Discrete category labels, indexed by rounded absolute value.
    pub labels: Option<Vec<String>>,
    pub show_labels: bool,
    pub disable_animations: bool,
    #[serde(skip)]
    pub formatter: LabelFormatter,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min_value: None,
            max_value: None,
            step: None,
            unit: None,
            labels: None,
            show_labels: true,
            disable_animations: false,
            formatter: LabelFormatter::Numeric,
        }
    }
}

impl AxisOptions {
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Category labels, when set, replace the formatter entirely.
    /// `span` is the visible data range, used by time formatting.
    pub fn format_label(&self, value: f64, span: f64) -> String {
        match &self.labels {
            Some(labels) => format_from_labels(labels, value),
            None => self.formatter.format(value, span),
        }
    }
}

/// One scaled dimension of a chart and everything it remembers between cycles.
#[derive(Debug, Clone)]
pub struct Axis {
    pub options: AxisOptions,
    pub(crate) bot_limit: f64,
    pub(crate) top_limit: f64,
    pub(crate) step: f64,
    pub(crate) magnitude: f64,
    pub(crate) series_limit: Limit,
    pub(crate) max_point_radius: f64,
    pub(crate) previous: Option<Limit>,
    pub(crate) evaluates_unit_width: bool,
    pub(crate) separators: SeparatorCache,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(AxisOptions::default())
    }
}

impl Axis {
    pub fn new(options: AxisOptions) -> Self {
        Self {
            options,
            bot_limit: 0.0,
            top_limit: 0.0,
            step: 1.0,
            magnitude: 1.0,
            series_limit: Limit::default(),
            max_point_radius: 0.0,
            previous: None,
            evaluates_unit_width: false,
            separators: SeparatorCache::new(),
        }
    }

    /// Resolved extent of the last applied cycle.
    pub fn limits(&self) -> Limit {
        Limit::new(self.bot_limit, self.top_limit)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Raw data extent before user bounds were applied.
    pub fn series_limit(&self) -> Limit {
        self.series_limit
    }

    pub fn max_point_radius(&self) -> f64 {
        self.max_point_radius
    }

    pub fn previous_limits(&self) -> Option<Limit> {
        self.previous
    }

    pub fn evaluates_unit_width(&self) -> bool {
        self.evaluates_unit_width
    }

    /// Data width of one unit on this axis.
    pub fn unit(&self) -> f64 {
        self.options.unit.unwrap_or(1.0)
    }

    pub fn separators(&self) -> &SeparatorCache {
        &self.separators
    }

    /// Drops every cached separator so the next cycle starts from scratch.
    pub fn clear_separators(&mut self) {
        self.separators.clear();
    }
}
