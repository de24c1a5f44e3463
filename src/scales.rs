//! Data-space <-> pixel-space conversion.
//!
//! Every pixel position the core hands out is produced here, so separators,
//! previous-state positions and host-side label offsets always agree.

use crate::data_types::{AxisOrientation, DrawArea, Limit};

/// Linear mapping of one axis onto its side of the draw area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale {
    pub limits: Limit,
    pub area: DrawArea,
    pub orientation: AxisOrientation,
}

impl AxisScale {
    pub fn new(limits: Limit, area: DrawArea, orientation: AxisOrientation) -> Self {
        Self {
            limits,
            area,
            orientation,
        }
    }

    /// Pixel range `(at min, at max)`. Y is inverted: the max sits at the top.
    pub fn range(&self) -> (f64, f64) {
        match self.orientation {
            AxisOrientation::X => (self.area.left, self.area.left + self.area.width),
            AxisOrientation::Y => (self.area.top + self.area.height, self.area.top),
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range();
        let span = self.limits.span();
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        let t = (value - self.limits.min) / span;
        r0 + t * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (r0, r1) = self.range();
        let pixels = r1 - r0;
        if pixels == 0.0 || !pixels.is_finite() {
            return self.limits.min;
        }
        let t = (pixel - r0) / pixels;
        self.limits.min + t * self.limits.span()
    }

    /// Pixel size of `unit` data units, always positive.
    pub fn unit_width(&self, unit: f64) -> f64 {
        (self.map(self.limits.min + unit) - self.map(self.limits.min)).abs()
    }
}

pub fn to_pixel(value: f64, limits: Limit, area: DrawArea, orientation: AxisOrientation) -> f64 {
    AxisScale::new(limits, area, orientation).map(value)
}

pub fn from_pixel(pixel: f64, limits: Limit, area: DrawArea, orientation: AxisOrientation) -> f64 {
    AxisScale::new(limits, area, orientation).invert(pixel)
}

pub fn unit_width_px(
    unit: f64,
    limits: Limit,
    area: DrawArea,
    orientation: AxisOrientation,
) -> f64 {
    AxisScale::new(limits, area, orientation).unit_width(unit)
}
