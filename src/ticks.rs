//! "Nice" separator spacing.

use crate::error::{ChartError, ChartResult};

/// Fewest separators an axis is ever asked to show.
const MIN_SEPARATORS: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRequest {
    /// `top - bot`; anything not strictly positive is treated as 1.
    pub range: f64,
    pub axis_length_px: f64,
    pub label_px: f64,
    pub clean_factor: f64,
    pub forced_step: Option<f64>,
    /// Separators stand for discrete labels, so fractional steps are meaningless.
    pub categorical: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeparatorStep {
    pub step: f64,
    pub magnitude: f64,
}

/// Number of separators the pixel budget allows, never below two.
pub fn target_separator_count(axis_length_px: f64, label_px: f64, clean_factor: f64) -> f64 {
    let count = (axis_length_px / (label_px * clean_factor)).round();
    if !count.is_finite() || count < MIN_SEPARATORS {
        MIN_SEPARATORS
    } else {
        count
    }
}

/// Picks a step of the form `{1, 2, 5, 10} * 10^k` close to `range / target`.
pub fn calculate_separator_step(request: &StepRequest) -> ChartResult<SeparatorStep> {
    let range = if request.range.is_finite() && request.range > 0.0 {
        request.range
    } else {
        1.0
    };

    let separations =
        target_separator_count(request.axis_length_px, request.label_px, request.clean_factor);
    let minimum = range / separations;
    let magnitude = 10.0f64.powf(minimum.log10().floor());

    if let Some(forced) = request.forced_step {
        if !forced.is_finite() || forced <= 0.0 {
            return Err(ChartError::InvalidStep(forced));
        }
        return Ok(SeparatorStep {
            step: forced,
            magnitude,
        });
    }

    let residual = minimum / magnitude;
    let multiplier = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };

    let mut step = multiplier * magnitude;
    if request.categorical && step < 1.0 {
        step = 1.0;
    }

    Ok(SeparatorStep { step, magnitude })
}
