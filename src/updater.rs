//! Coalescing update scheduler.
//!
//! Property changes only mark the chart dirty. The first request arms a
//! deadline one debounce window away; later requests fold into it. When the
//! deadline passes the host gets a single [`UpdateTicket`] and runs one cycle.
//! Requests that arrive while that cycle is in flight leave the flag set, so
//! exactly one more cycle follows.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::chart::{ChartCore, UpdateFrame};
use crate::config::ChartConfig;
use crate::error::ChartResult;

#[derive(Debug, Default)]
struct SchedulerState {
    dirty: bool,
    restart: bool,
    deadline: Option<Instant>,
    in_flight: bool,
    coalesced: u64,
}

/// Permission to run one update cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateTicket {
    /// Separators must be rebuilt from scratch.
    pub restart: bool,
    /// Requests folded into this cycle.
    pub coalesced: u64,
}

/// Cheap to clone; every clone shares the same dirty flag.
#[derive(Clone, Debug)]
pub struct UpdateScheduler {
    state: Arc<Mutex<SchedulerState>>,
    debounce: Duration,
}

impl UpdateScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState::default())),
            debounce,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.debounce())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn request_update(&self, now: Instant) {
        self.request(now, false);
    }

    /// Like [`request_update`](Self::request_update), but the cycle also clears separators.
    pub fn request_restart(&self, now: Instant) {
        self.request(now, true);
    }

    fn request(&self, now: Instant, restart: bool) {
        let mut state = self.state.lock();
        state.dirty = true;
        state.restart |= restart;
        state.coalesced += 1;
        if state.deadline.is_none() {
            state.deadline = Some(now + self.debounce);
        }
        trace!(coalesced = state.coalesced, restart, "update requested");
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.lock().in_flight
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.lock().deadline
    }

    /// Hands out a ticket when the debounce window elapsed and no cycle runs.
    pub fn poll(&self, now: Instant) -> Option<UpdateTicket> {
        let mut state = self.state.lock();
        if !state.dirty || state.in_flight {
            return None;
        }
        match state.deadline {
            Some(deadline) if now < deadline => return None,
            _ => {}
        }

        let ticket = UpdateTicket {
            restart: state.restart,
            coalesced: state.coalesced,
        };
        state.dirty = false;
        state.restart = false;
        state.deadline = None;
        state.coalesced = 0;
        state.in_flight = true;
        Some(ticket)
    }

    /// Marks the running cycle done. A request that arrived meanwhile stays
    /// pending and gets a fresh deadline.
    pub fn finish(&self, now: Instant) {
        let mut state = self.state.lock();
        state.in_flight = false;
        if state.dirty {
            state.deadline = Some(now + self.debounce);
        }
    }

    /// Drops anything pending, e.g. when the chart is unloaded.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.dirty = false;
        state.restart = false;
        state.deadline = None;
        state.coalesced = 0;
    }

    /// Polls and, when a ticket is granted, runs one full cycle on `chart`.
    pub fn run(&self, chart: &mut ChartCore, now: Instant) -> ChartResult<Option<UpdateFrame>> {
        let Some(ticket) = self.poll(now) else {
            return Ok(None);
        };
        debug!(
            coalesced = ticket.coalesced,
            restart = ticket.restart,
            "running update cycle"
        );
        if ticket.restart {
            chart.restart();
        }
        let result = chart.update();
        self.finish(now);
        result.map(Some)
    }
}
