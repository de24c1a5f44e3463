//! Separator lifecycle cache.
//!
//! Separators persist across update cycles so the view layer can animate them.
//! Each cycle walks the axis at its step, stamping every visited separator with
//! the current generation; anything left behind is removed. Planning never
//! touches the live cache: it produces a [`SeparatorPlan`] that is either
//! applied as a whole or dropped.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::data_types::{AxisOrientation, DrawArea, Limit};
use crate::error::ChartError;
use crate::scales::AxisScale;

/// Upper bound on separators placed per axis per cycle.
const MAX_SEPARATORS: u64 = 10_000;

/// Quantized identity of a separator: `round(value / tolerance)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeparatorKey(pub i64);

impl SeparatorKey {
    pub fn quantize(value: f64, tolerance: f64) -> Self {
        Self((value / tolerance).round() as i64)
    }

    /// Data value the key stands for under `tolerance`.
    pub fn value(self, tolerance: f64) -> f64 {
        self.0 as f64 * tolerance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SeparatorState {
    InitialAdd = 0,
    Keep = 1,
    Remove = 2,
}

impl TryFrom<u8> for SeparatorState {
    type Error = ChartError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::InitialAdd),
            1 => Ok(Self::Keep),
            2 => Ok(Self::Remove),
            other => Err(ChartError::InvalidSeparatorState(other)),
        }
    }
}

impl From<SeparatorState> for u8 {
    fn from(state: SeparatorState) -> Self {
        state as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separator {
    pub key: SeparatorKey,
    /// Exact data position this cycle.
    pub value: f64,
    /// Last generation the separator was placed in.
    pub generation: u32,
    /// Created this cycle.
    pub is_new: bool,
    pub state: SeparatorState,
}

/// What the view layer should do with a separator this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Put it at the target without animating.
    Place,
    /// Place it at `previous_px`, fade in, then animate to the target.
    Emerge,
    /// Animate from wherever it is to the target.
    Move,
    /// Animate towards the target while fading out, then drop it.
    FadeOutAndRemove,
    RemoveImmediately,
}

impl TransitionKind {
    pub fn resolve(state: SeparatorState, is_new: bool, animate: bool) -> Self {
        match (state, animate) {
            (SeparatorState::InitialAdd, _) => Self::Place,
            (SeparatorState::Keep, false) => Self::Place,
            (SeparatorState::Keep, true) if is_new => Self::Emerge,
            (SeparatorState::Keep, true) => Self::Move,
            (SeparatorState::Remove, true) => Self::FadeOutAndRemove,
            (SeparatorState::Remove, false) => Self::RemoveImmediately,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeparatorTransition {
    pub separator: Separator,
    pub kind: TransitionKind,
    pub label: String,
    /// Line position in pixels.
    pub target_px: f64,
    /// Where the separator would have been under the previous limits.
    pub previous_px: Option<f64>,
}

impl SeparatorTransition {
    pub fn state(&self) -> SeparatorState {
        self.separator.state
    }
}

/// Everything one axis contributes to a placement pass.
pub struct PlacementInput<'a> {
    pub orientation: AxisOrientation,
    pub limits: Limit,
    pub step: f64,
    pub magnitude: f64,
    /// Axis unit, when the user configured one.
    pub unit: Option<f64>,
    pub evaluates_unit_width: bool,
    pub area: DrawArea,
    pub animate: bool,
    pub show_labels: bool,
    pub label: &'a dyn Fn(f64) -> String,
}

/// Outcome of planning one axis; apply it with [`SeparatorCache::apply`].
#[derive(Clone, Debug)]
pub struct SeparatorPlan {
    next: SeparatorCache,
    pub transitions: Vec<SeparatorTransition>,
}

impl SeparatorPlan {
    /// Cache contents the plan would leave behind.
    pub fn resulting_cache(&self) -> &SeparatorCache {
        &self.next
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeparatorCache {
    entries: BTreeMap<SeparatorKey, Separator>,
    generation: u32,
    tolerance: f64,
    last_limits: Option<Limit>,
    last_area: Option<DrawArea>,
}

impl SeparatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn get(&self, key: SeparatorKey) -> Option<&Separator> {
        self.entries.get(&key)
    }

    /// Separator currently standing for `value`, if any.
    pub fn find(&self, value: f64) -> Option<&Separator> {
        if self.tolerance <= 0.0 {
            return None;
        }
        self.get(SeparatorKey::quantize(value, self.tolerance))
    }

    /// Cached separators ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &Separator> {
        self.entries.values()
    }

    /// Limits of the last applied cycle, `None` before the first one.
    pub fn last_limits(&self) -> Option<Limit> {
        self.last_limits
    }

    pub fn last_area(&self) -> Option<DrawArea> {
        self.last_area
    }

    /// Forgets every separator and the previous state; the next cycle adds from scratch.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, plan: SeparatorPlan) -> Vec<SeparatorTransition> {
        *self = plan.next;
        plan.transitions
    }

    /// Pixel position `value` had under the previous limits and draw area.
    pub fn previous_position(&self, value: f64, orientation: AxisOrientation) -> f64 {
        match (self.last_limits, self.last_area) {
            (Some(limits), Some(area)) => AxisScale::new(limits, area, orientation).map(value),
            _ => 0.0,
        }
    }

    fn bump_generation(&mut self) {
        if self.generation == u32::MAX {
            for separator in self.entries.values_mut() {
                separator.generation = 0;
            }
            self.generation = 0;
        }
        self.generation += 1;
    }

    /// Re-keys entries for a new tolerance. Entries that now collide are returned.
    fn rekey(&mut self, tolerance: f64) -> Vec<Separator> {
        let mut displaced = Vec::new();
        if self.tolerance == tolerance {
            return displaced;
        }
        let old = std::mem::take(&mut self.entries);
        for (_, mut separator) in old {
            let key = SeparatorKey::quantize(separator.value, tolerance);
            if self.entries.contains_key(&key) {
                displaced.push(separator);
                continue;
            }
            separator.key = key;
            self.entries.insert(key, separator);
        }
        self.tolerance = tolerance;
        displaced
    }

    /// Computes this cycle's separators without mutating the cache.
    pub fn plan(&self, input: &PlacementInput<'_>) -> SeparatorPlan {
        let mut next = self.clone();

        if !input.show_labels || input.limits.is_collapsed(input.step) {
            trace!(
                orientation = ?input.orientation,
                "axis hidden or collapsed, separators left untouched"
            );
            return SeparatorPlan {
                next,
                transitions: Vec::new(),
            };
        }

        let tolerance = input.step / 10.0;
        let displaced = next.rekey(tolerance);
        next.bump_generation();
        let generation = next.generation;
        let first_cycle = self.last_limits.is_none();

        let mut placed = Vec::new();
        for value in separator_positions(input) {
            let key = SeparatorKey::quantize(value, tolerance);
            let separator = match next.entries.entry(key) {
                Entry::Occupied(entry) => {
                    let separator = entry.into_mut();
                    separator.is_new = false;
                    separator
                }
                Entry::Vacant(entry) => entry.insert(Separator {
                    key,
                    value,
                    generation,
                    is_new: true,
                    state: SeparatorState::InitialAdd,
                }),
            };
            separator.value = value;
            separator.generation = generation;
            separator.state = if first_cycle {
                SeparatorState::InitialAdd
            } else {
                SeparatorState::Keep
            };
            placed.push(key);
        }

        let stale: Vec<SeparatorKey> = next
            .entries
            .values()
            .filter(|s| s.generation < generation)
            .map(|s| s.key)
            .collect();
        let mut removed: Vec<Separator> = displaced;
        for key in stale {
            if let Some(separator) = next.entries.remove(&key) {
                removed.push(separator);
            }
        }
        for separator in removed.iter_mut() {
            separator.state = SeparatorState::Remove;
            separator.is_new = false;
        }

        let scale = AxisScale::new(input.limits, input.area, input.orientation);
        let offset = if input.evaluates_unit_width {
            input.orientation.direction() * scale.unit_width(input.unit.unwrap_or(1.0)) / 2.0
        } else {
            0.0
        };

        let mut survivors: Vec<Separator> = placed
            .iter()
            .filter_map(|key| next.entries.get(key).copied())
            .collect();
        survivors.sort_by(|a, b| a.value.total_cmp(&b.value));
        removed.sort_by(|a, b| a.value.total_cmp(&b.value));

        let transitions = survivors
            .into_iter()
            .chain(removed)
            .map(|separator| {
                let kind = TransitionKind::resolve(separator.state, separator.is_new, input.animate);
                let previous_px = (kind == TransitionKind::Emerge)
                    .then(|| self.previous_position(separator.value, input.orientation) + offset);
                SeparatorTransition {
                    separator,
                    kind,
                    label: (input.label)(separator.value),
                    target_px: scale.map(separator.value) + offset,
                    previous_px,
                }
            })
            .collect::<Vec<_>>();

        trace!(
            orientation = ?input.orientation,
            generation,
            placed = placed.len(),
            removed = transitions.len() - placed.len(),
            "separators planned"
        );

        next.last_limits = Some(input.limits);
        next.last_area = Some(input.area);

        SeparatorPlan { next, transitions }
    }
}

/// Data positions to place separators at, walking from the aligned start.
fn separator_positions(input: &PlacementInput<'_>) -> Vec<f64> {
    let step = input.step;
    let bot = input.limits.min;
    let top = input.limits.max;

    let m = match input.unit {
        Some(u) if u.is_finite() && u > 0.0 => u,
        _ if input.magnitude.is_finite() && input.magnitude > 0.0 => input.magnitude,
        _ => step,
    };
    let unit = if input.evaluates_unit_width {
        input.unit.unwrap_or(1.0)
    } else {
        0.0
    };
    let aligned = (bot / m).trunc() * m;
    let slack = step * 1e-9;

    let mut positions = Vec::new();
    let (start, direction, end) = if top <= 0.0 && bot < 0.0 {
        (top - unit, -1.0, aligned)
    } else {
        (aligned, 1.0, top - unit)
    };

    for n in 0..MAX_SEPARATORS {
        let value = start + direction * n as f64 * step;
        let past_end = if direction > 0.0 {
            value > end + slack
        } else {
            value < end - slack
        };
        if past_end {
            return positions;
        }
        if value < bot - slack {
            continue;
        }
        positions.push(value);
    }

    warn!(
        orientation = ?input.orientation,
        step,
        bot,
        top,
        "separator cap reached, axis truncated"
    );
    positions
}
