//! Chart model and update cycle.
//!
//! `ChartCore` owns the axes, the series and the draw area. An update cycle is
//! split in two so a host can yield in between:
//!
//! 1. [`ChartCore::compute`] resolves every axis (limits, step) and then plans
//!    every axis' separators, returning a [`PendingFrame`]. Nothing is mutated.
//! 2. [`ChartCore::apply`] commits the frame, axis by axis, unless the chart
//!    changed since the frame was computed, in which case it is discarded.
//!
//! Zoom and pan write user bounds on the axes, so the next cycle resolves to
//! the new window like any other override.

use std::time::Duration;

use tracing::debug;

use crate::aggregation::{aggregate_axis_range, RangeSummary};
use crate::config::ChartConfig;
use crate::data_types::{Axis, AxisOptions, AxisOrientation, DrawArea, Limit, Series};
use crate::error::{ChartError, ChartResult};
use crate::scales::AxisScale;
use crate::separators::{PlacementInput, SeparatorPlan, SeparatorTransition};
use crate::stabilizer::{stabilize, Resolution};
use crate::stacking::{accumulate_stacks, StackedGroup};
use crate::ticks::{calculate_separator_step, SeparatorStep, StepRequest};

const ORIENTATIONS: [AxisOrientation; 2] = [AxisOrientation::X, AxisOrientation::Y];

/// Narrowest window a zoom may produce, before the step floor applies.
const MIN_ZOOM_SPAN: f64 = 1e-9;

/// Limits and step of one axis, before anything is committed.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ResolvedAxis {
    orientation: AxisOrientation,
    index: usize,
    limit: Limit,
    step: SeparatorStep,
    summary: RangeSummary,
    resolution: Resolution,
    evaluates_unit_width: bool,
}

#[derive(Clone, Debug)]
struct AxisPlan {
    resolved: ResolvedAxis,
    separators: SeparatorPlan,
}

/// A computed but not yet applied update cycle.
#[derive(Clone, Debug)]
pub struct PendingFrame {
    revision: u64,
    animation_speed: Duration,
    axes: Vec<AxisPlan>,
    stacks: Vec<StackedGroup>,
}

impl PendingFrame {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Limits the frame resolved for an axis.
    pub fn resolved_limits(&self, orientation: AxisOrientation, index: usize) -> Option<Limit> {
        self.axes
            .iter()
            .find(|p| p.resolved.orientation == orientation && p.resolved.index == index)
            .map(|p| p.resolved.limit)
    }
}

/// Per-axis result of an applied cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisFrame {
    pub orientation: AxisOrientation,
    pub index: usize,
    pub bot_limit: f64,
    pub top_limit: f64,
    pub step: f64,
    pub magnitude: f64,
    pub max_point_radius: f64,
    pub resolution: Resolution,
    /// Placed separators by value, then removed ones by value.
    pub transitions: Vec<SeparatorTransition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateFrame {
    pub revision: u64,
    /// How long transitions of this frame should take; zero when not animated.
    pub animation_speed: Duration,
    pub axes: Vec<AxisFrame>,
    pub stacks: Vec<StackedGroup>,
}

impl UpdateFrame {
    pub fn axis(&self, orientation: AxisOrientation, index: usize) -> Option<&AxisFrame> {
        self.axes
            .iter()
            .find(|a| a.orientation == orientation && a.index == index)
    }
}

#[derive(Debug, Clone)]
pub struct ChartCore {
    config: ChartConfig,
    x_axes: Vec<Axis>,
    y_axes: Vec<Axis>,
    series: Vec<Series>,
    draw_area: DrawArea,
    revision: u64,
}

impl ChartCore {
    /// A chart with one default axis per dimension.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            x_axes: vec![Axis::default()],
            y_axes: vec![Axis::default()],
            series: vec![],
            draw_area: DrawArea::default(),
            revision: 0,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Bumps the revision; frames computed before are discarded on apply.
    pub fn invalidate(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn axes_vec(&self, orientation: AxisOrientation) -> &Vec<Axis> {
        match orientation {
            AxisOrientation::X => &self.x_axes,
            AxisOrientation::Y => &self.y_axes,
        }
    }

    fn axes_vec_mut(&mut self, orientation: AxisOrientation) -> &mut Vec<Axis> {
        match orientation {
            AxisOrientation::X => &mut self.x_axes,
            AxisOrientation::Y => &mut self.y_axes,
        }
    }

    pub fn axes(&self, orientation: AxisOrientation) -> &[Axis] {
        self.axes_vec(orientation)
    }

    pub fn axis(&self, orientation: AxisOrientation, index: usize) -> Option<&Axis> {
        self.axes_vec(orientation).get(index)
    }

    /// Mutable access invalidates pending frames.
    pub fn axis_mut(&mut self, orientation: AxisOrientation, index: usize) -> Option<&mut Axis> {
        self.invalidate();
        self.axes_vec_mut(orientation).get_mut(index)
    }

    /// Declares another axis and returns its index.
    pub fn add_axis(&mut self, orientation: AxisOrientation, options: AxisOptions) -> usize {
        self.invalidate();
        let axes = self.axes_vec_mut(orientation);
        axes.push(Axis::new(options));
        axes.len() - 1
    }

    /// Replaces all axes of a dimension. History of the old axes is lost.
    pub fn set_axes(&mut self, orientation: AxisOrientation, options: Vec<AxisOptions>) {
        self.invalidate();
        *self.axes_vec_mut(orientation) = options.into_iter().map(Axis::new).collect();
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_series(&mut self, series: Vec<Series>) {
        self.invalidate();
        self.series = series;
    }

    pub fn push_series(&mut self, series: Series) {
        self.invalidate();
        self.series.push(series);
    }

    pub fn draw_area(&self) -> DrawArea {
        self.draw_area
    }

    pub fn set_draw_area(&mut self, area: DrawArea) -> ChartResult<()> {
        area.validate()?;
        self.invalidate();
        self.draw_area = area;
        Ok(())
    }

    /// Forgets all separators; the next cycle places them without animation.
    pub fn restart(&mut self) {
        self.invalidate();
        for axis in self.x_axes.iter_mut().chain(self.y_axes.iter_mut()) {
            axis.clear_separators();
        }
    }

    /// Current scale of an axis, for tooltips and zoom/pan.
    pub fn scale(&self, orientation: AxisOrientation, index: usize) -> Option<AxisScale> {
        self.axis(orientation, index)
            .map(|axis| AxisScale::new(axis.limits(), self.draw_area, orientation))
    }

    pub fn to_pixel(&self, orientation: AxisOrientation, index: usize, value: f64) -> Option<f64> {
        self.scale(orientation, index).map(|s| s.map(value))
    }

    pub fn from_pixel(&self, orientation: AxisOrientation, index: usize, pixel: f64) -> Option<f64> {
        self.scale(orientation, index).map(|s| s.invert(pixel))
    }

    fn set_user_bounds(&mut self, orientation: AxisOrientation, index: usize, limit: Limit) {
        self.invalidate();
        if let Some(axis) = self.axes_vec_mut(orientation).get_mut(index) {
            axis.options.min_value = Some(limit.min);
            axis.options.max_value = Some(limit.max);
        }
    }

    /// Scales the visible span of an axis by `factor` around the data value under
    /// `pixel`, which keeps its screen position. Returns the new user bounds.
    pub fn zoom_at(
        &mut self,
        orientation: AxisOrientation,
        index: usize,
        pixel: f64,
        factor: f64,
    ) -> ChartResult<Limit> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidZoomFactor(factor));
        }
        let axis = self
            .axis(orientation, index)
            .ok_or(ChartError::AxisNotFound { orientation, index })?;
        let current = axis.limits();
        let span = current.span();
        if !span.is_finite() || span <= 0.0 {
            return Ok(current);
        }

        // Never narrower than the next cycle's collapse threshold.
        let floor = (axis.step() * 0.02).max(MIN_ZOOM_SPAN);
        let new_span = (span * factor).max(floor);

        let scale = AxisScale::new(current, self.draw_area, orientation);
        let pivot = scale.invert(pixel);
        let pct = ((pivot - current.min) / span).clamp(0.0, 1.0);
        let min = pivot - new_span * pct;
        let zoomed = Limit::new(min, min + new_span);

        debug!(?orientation, index, pivot, factor, min = zoomed.min, max = zoomed.max, "zoom");
        self.set_user_bounds(orientation, index, zoomed);
        Ok(zoomed)
    }

    /// Shifts an axis window by a pixel distance. Positive deltas follow the
    /// pointer: dragging right reveals lower X values, dragging down higher Y values.
    pub fn pan(
        &mut self,
        orientation: AxisOrientation,
        index: usize,
        delta_px: f64,
    ) -> ChartResult<Limit> {
        let axis = self
            .axis(orientation, index)
            .ok_or(ChartError::AxisNotFound { orientation, index })?;
        let current = axis.limits();
        let scale = AxisScale::new(current, self.draw_area, orientation);
        let delta = scale.invert(0.0) - scale.invert(delta_px);
        let delta = if delta.is_finite() { delta } else { 0.0 };
        let panned = Limit::new(current.min + delta, current.max + delta);

        debug!(?orientation, index, delta, "pan");
        self.set_user_bounds(orientation, index, panned);
        Ok(panned)
    }

    /// One zoom-in step around a pointer, on every axis `config.zoom` allows.
    pub fn zoom_in(&mut self, x_px: f64, y_px: f64) -> ChartResult<()> {
        self.zoom_gesture(x_px, y_px, self.config.zooming_speed)
    }

    pub fn zoom_out(&mut self, x_px: f64, y_px: f64) -> ChartResult<()> {
        self.zoom_gesture(x_px, y_px, 1.0 / self.config.zooming_speed)
    }

    fn zoom_gesture(&mut self, x_px: f64, y_px: f64, factor: f64) -> ChartResult<()> {
        for orientation in ORIENTATIONS {
            if !self.config.zoom.allows(orientation) {
                continue;
            }
            let pixel = match orientation {
                AxisOrientation::X => x_px,
                AxisOrientation::Y => y_px,
            };
            for index in 0..self.axes_vec(orientation).len() {
                self.zoom_at(orientation, index, pixel, factor)?;
            }
        }
        Ok(())
    }

    /// Pans every axis `config.zoom` allows by a pointer drag.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64) -> ChartResult<()> {
        for orientation in ORIENTATIONS {
            if !self.config.zoom.allows(orientation) {
                continue;
            }
            let delta = match orientation {
                AxisOrientation::X => dx_px,
                AxisOrientation::Y => dy_px,
            };
            for index in 0..self.axes_vec(orientation).len() {
                self.pan(orientation, index, delta)?;
            }
        }
        Ok(())
    }

    fn validate_series(&self) -> ChartResult<()> {
        for s in &self.series {
            if !s.kind.is_cartesian() {
                return Err(ChartError::NotACartesianSeries {
                    series: s.id.clone(),
                });
            }
            for orientation in ORIENTATIONS {
                let index = s.scales_at(orientation);
                let count = self.axes_vec(orientation).len();
                if index >= count {
                    return Err(ChartError::AxisIndexOutOfRange {
                        series: s.id.clone(),
                        orientation,
                        index,
                        count,
                    });
                }
            }
        }
        Ok(())
    }

    fn evaluates_unit_width(&self, orientation: AxisOrientation, index: usize) -> bool {
        self.series.iter().any(|s| {
            s.kind.unit_width_orientation() == Some(orientation) && s.scales_at(orientation) == index
        })
    }

    fn step_for(
        &self,
        axis: &Axis,
        orientation: AxisOrientation,
        range: f64,
    ) -> ChartResult<SeparatorStep> {
        calculate_separator_step(&StepRequest {
            range,
            axis_length_px: self.draw_area.length(orientation),
            label_px: self.config.label_budget.for_orientation(orientation),
            clean_factor: self.config.clean_factor,
            forced_step: axis.options.step,
            categorical: axis.options.labels.is_some(),
        })
    }

    fn resolve_axis(
        &self,
        orientation: AxisOrientation,
        index: usize,
        stacks: &[StackedGroup],
    ) -> ChartResult<ResolvedAxis> {
        let axis = &self.axes_vec(orientation)[index];
        let evaluates_unit_width = self.evaluates_unit_width(orientation, index);
        let unit_extension = if evaluates_unit_width { axis.unit() } else { 0.0 };
        let summary =
            aggregate_axis_range(&self.series, stacks, orientation, index, unit_extension);

        // Collapse is judged against the step of the last committed limits, so a
        // sliver of data cannot shrink its own threshold. No history counts as range 1.
        let history_span = axis.previous.map_or(0.0, |p| p.span());
        let threshold = self.step_for(axis, orientation, history_span)?;

        let stabilized = stabilize(
            summary.limit,
            axis.options.min_value,
            axis.options.max_value,
            axis.previous,
            threshold.step,
        );
        if stabilized.collapsed && !self.config.design_mode {
            return Err(ChartError::InvalidAxisRange { orientation, index });
        }

        let step = self.step_for(axis, orientation, stabilized.limit.span())?;

        debug!(
            ?orientation,
            index,
            bot = stabilized.limit.min,
            top = stabilized.limit.max,
            step = step.step,
            resolution = ?stabilized.resolution,
            "axis resolved"
        );

        Ok(ResolvedAxis {
            orientation,
            index,
            limit: stabilized.limit,
            step,
            summary,
            resolution: stabilized.resolution,
            evaluates_unit_width,
        })
    }

    fn plan_axis(&self, resolved: ResolvedAxis) -> AxisPlan {
        let axis = &self.axes_vec(resolved.orientation)[resolved.index];
        let span = resolved.limit.span();
        let label = |value: f64| axis.options.format_label(value, span);
        let input = PlacementInput {
            orientation: resolved.orientation,
            limits: resolved.limit,
            step: resolved.step.step,
            magnitude: resolved.step.magnitude,
            unit: axis.options.unit,
            evaluates_unit_width: resolved.evaluates_unit_width,
            area: self.draw_area,
            animate: self.config.animations_enabled && !axis.options.disable_animations,
            show_labels: axis.options.show_labels,
            label: &label,
        };
        AxisPlan {
            resolved,
            separators: axis.separators.plan(&input),
        }
    }

    /// Resolves and plans every axis without touching any state.
    pub fn compute(&self) -> ChartResult<PendingFrame> {
        self.draw_area.validate()?;
        self.validate_series()?;

        let stacks = accumulate_stacks(&self.series);

        // Every axis is resolved before any separator is planned.
        let mut resolved = Vec::with_capacity(self.x_axes.len() + self.y_axes.len());
        for orientation in ORIENTATIONS {
            for index in 0..self.axes_vec(orientation).len() {
                resolved.push(self.resolve_axis(orientation, index, &stacks)?);
            }
        }

        let axes = resolved.into_iter().map(|r| self.plan_axis(r)).collect();

        debug!(
            revision = self.revision,
            series = self.series.len(),
            stacks = stacks.len(),
            "frame computed"
        );

        Ok(PendingFrame {
            revision: self.revision,
            animation_speed: self.config.frame_animation_speed(),
            axes,
            stacks,
        })
    }

    /// Commits a frame. Returns `None`, leaving every axis untouched, when the
    /// chart changed (or another frame was applied) after `frame` was computed.
    pub fn apply(&mut self, frame: PendingFrame) -> Option<UpdateFrame> {
        if frame.revision != self.revision {
            debug!(
                frame = frame.revision,
                current = self.revision,
                "discarding superseded frame"
            );
            return None;
        }
        Some(self.commit(frame))
    }

    fn commit(&mut self, frame: PendingFrame) -> UpdateFrame {
        let mut axes = Vec::with_capacity(frame.axes.len());
        for plan in frame.axes {
            let r = plan.resolved;
            let axis = &mut self.axes_vec_mut(r.orientation)[r.index];
            axis.bot_limit = r.limit.min;
            axis.top_limit = r.limit.max;
            axis.step = r.step.step;
            axis.magnitude = r.step.magnitude;
            axis.series_limit = r.summary.limit;
            axis.max_point_radius = r.summary.max_point_radius;
            axis.evaluates_unit_width = r.evaluates_unit_width;
            axis.previous = Some(r.limit);
            let transitions = axis.separators.apply(plan.separators);

            axes.push(AxisFrame {
                orientation: r.orientation,
                index: r.index,
                bot_limit: r.limit.min,
                top_limit: r.limit.max,
                step: r.step.step,
                magnitude: r.step.magnitude,
                max_point_radius: r.summary.max_point_radius,
                resolution: r.resolution,
                transitions,
            });
        }

        let revision = frame.revision;
        self.invalidate();

        UpdateFrame {
            revision,
            animation_speed: frame.animation_speed,
            axes,
            stacks: frame.stacks,
        }
    }

    /// Computes and applies in one go.
    pub fn update(&mut self) -> ChartResult<UpdateFrame> {
        let frame = self.compute()?;
        Ok(self.commit(frame))
    }
}
