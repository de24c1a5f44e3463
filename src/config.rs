//! Per-chart configuration.
//!
//! Everything the core needs from its host that is not series data: label
//! budgets, animation switches, the debounce window and the series palette.
//! Nothing here is process-wide; every `ChartCore` owns its own copy.

use std::path::Path;
use std::time::Duration;

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::data_types::AxisOrientation;

/// Minimum pixels a single label needs along each orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelBudget {
    pub x_px: f64,
    pub y_px: f64,
}

impl Default for LabelBudget {
    fn default() -> Self {
        Self {
            x_px: 50.0,
            y_px: 12.0,
        }
    }
}

impl LabelBudget {
    pub fn for_orientation(&self, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::X => self.x_px,
            AxisOrientation::Y => self.y_px,
        }
    }
}

/// Which dimensions respond to zoom and drag gestures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomingOptions {
    #[default]
    None,
    X,
    Y,
    Xy,
}

impl ZoomingOptions {
    pub fn allows(self, orientation: AxisOrientation) -> bool {
        matches!(
            (self, orientation),
            (Self::Xy, _) | (Self::X, AxisOrientation::X) | (Self::Y, AxisOrientation::Y)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub animations_enabled: bool,
    pub animation_speed_ms: u64,
    /// Preview/design context: a collapsed axis is tolerated instead of failing.
    pub design_mode: bool,
    /// Labels per separator; larger values give sparser separators.
    pub clean_factor: f64,
    pub label_budget: LabelBudget,
    pub debounce_ms: u64,
    /// Hex colors handed out to series in declaration order.
    pub series_colors: Vec<String>,
    pub starting_color_offset: usize,
    pub zoom: ZoomingOptions,
    /// Span factor of one zoom-in step, in `(0, 1)`; zooming out divides by it.
    pub zooming_speed: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            animation_speed_ms: 300,
            design_mode: false,
            clean_factor: 3.0,
            label_budget: LabelBudget::default(),
            debounce_ms: 10,
            series_colors: [
                "#2195F2", "#F34336", "#FEC007", "#607D8A", "#00BCD4", "#4CAF50", "#FF9800",
                "#9C27B0", "#795548", "#E91E63",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            starting_color_offset: 0,
            zoom: ZoomingOptions::None,
            zooming_speed: 0.8,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse chart configuration")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read chart configuration {}", path.display()))?;
        Self::from_json_str(&text)
            .wrap_err_with(|| format!("invalid chart configuration in {}", path.display()))
    }

    pub fn animation_speed(&self) -> Duration {
        Duration::from_millis(self.animation_speed_ms)
    }

    /// Duration hosts should animate a frame over; zero with animations off.
    pub fn frame_animation_speed(&self) -> Duration {
        if self.animations_enabled {
            self.animation_speed()
        } else {
            Duration::ZERO
        }
    }

    pub fn debounce(&self) -> Duration {
        // Without animations the host still needs a short window to batch changes.
        if self.animations_enabled {
            Duration::from_millis(self.debounce_ms)
        } else {
            Duration::from_millis(self.debounce_ms.min(10))
        }
    }

    /// Color for the `index`-th declared series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Option<&str> {
        if self.series_colors.is_empty() {
            return None;
        }
        let i = (index + self.starting_color_offset) % self.series_colors.len();
        Some(self.series_colors[i].as_str())
    }
}
