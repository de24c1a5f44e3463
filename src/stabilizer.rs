//! Reconciles raw data extents with user bounds and the previous frame.

use tracing::debug;

use crate::data_types::Limit;

/// Which path produced the resolved limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Data (or user bounds) were wide enough on their own.
    Direct,
    /// Range collapsed twice in a row and was widened by one step each side.
    Widened,
    /// Range collapsed once; the previous frame's limits were reused.
    PreviousFrame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilizedLimit {
    pub limit: Limit,
    pub resolution: Resolution,
    /// Still narrower than `step * 0.01`; only tolerated in design mode.
    pub collapsed: bool,
}

/// User bounds always win over whatever the data or history say.
fn apply_overrides(limit: Limit, min_override: Option<f64>, max_override: Option<f64>) -> Limit {
    Limit::new(
        min_override.unwrap_or(limit.min),
        max_override.unwrap_or(limit.max),
    )
}

fn widen(limit: Limit, step: f64, min_override: Option<f64>, max_override: Option<f64>) -> Limit {
    Limit::new(
        min_override.unwrap_or(limit.min - step),
        max_override.unwrap_or(limit.max + step),
    )
}

/// Resolves one axis. `previous` is `None` before the first applied cycle and
/// counts as collapsed. The caller decides whether a collapsed result is fatal.
pub fn stabilize(
    raw: Limit,
    min_override: Option<f64>,
    max_override: Option<f64>,
    previous: Option<Limit>,
    step: f64,
) -> StabilizedLimit {
    let direct = apply_overrides(raw, min_override, max_override);
    if !direct.is_collapsed(step) {
        return StabilizedLimit {
            limit: direct,
            resolution: Resolution::Direct,
            collapsed: false,
        };
    }

    let (limit, resolution) = match previous {
        Some(prev) if !prev.is_collapsed(step) => {
            debug!(
                min = direct.min,
                max = direct.max,
                prev_min = prev.min,
                prev_max = prev.max,
                "collapsed range, reusing previous limits"
            );
            let reused = apply_overrides(prev, min_override, max_override);
            if reused.is_collapsed(step) {
                (
                    widen(reused, step, min_override, max_override),
                    Resolution::Widened,
                )
            } else {
                (reused, Resolution::PreviousFrame)
            }
        }
        _ => {
            debug!(min = direct.min, max = direct.max, step, "collapsed range, widening by one step");
            (
                widen(direct, step, min_override, max_override),
                Resolution::Widened,
            )
        }
    };

    StabilizedLimit {
        limit,
        resolution,
        collapsed: limit.is_collapsed(step),
    }
}
