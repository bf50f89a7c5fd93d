use std::time::Duration;

use crate::engine::timer::{TickId, TickQueue};

/// Lifecycle of the redraw loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not visible; nothing pending.
    Idle,
    /// Visible; exactly one tick pending.
    Armed,
    /// Torn down; no tick will ever fire again.
    Destroyed,
}

/// Self-rescheduling redraw timer.
///
/// Holds at most one pending tick. Arming always cancels the previous tick before posting the
/// next one.
#[derive(Debug)]
pub struct RedrawScheduler {
    queue: TickQueue,
    interval: Duration,
    pending: Option<TickId>,
    state: SchedulerState,
}

impl RedrawScheduler {
    /// Idle scheduler with the given cadence.
    pub fn new(interval: Duration) -> Self {
        Self {
            queue: TickQueue::new(),
            interval,
            pending: None,
            state: SchedulerState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Whether the surface is considered visible.
    pub fn is_visible(&self) -> bool {
        self.state == SchedulerState::Armed
    }

    /// Whether teardown happened.
    pub fn is_destroyed(&self) -> bool {
        self.state == SchedulerState::Destroyed
    }

    /// Redraw cadence.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Host time, as last reported to [`RedrawScheduler::take_due`].
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    /// Ticks waiting in the queue. Never more than one.
    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Deadline of the pending tick.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    /// Cancel any pending tick and post the next one an interval after the last host time.
    pub fn arm(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.cancel_pending();
        self.pending = Some(self.queue.post_delayed(self.interval));
        self.state = SchedulerState::Armed;
    }

    /// Cancel the pending tick and go idle.
    pub fn disarm(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.cancel_pending();
        self.state = SchedulerState::Idle;
    }

    /// Cancel the pending tick permanently.
    pub fn destroy(&mut self) {
        self.cancel_pending();
        self.state = SchedulerState::Destroyed;
    }

    /// Fire the pending tick if it is due by `until`.
    ///
    /// Queue time moves to `until`, so a follow-up [`RedrawScheduler::arm`] counts from the
    /// host's time and an overdue tick yields one late frame rather than a backlog. Ticks other
    /// than the pending one are dropped.
    pub fn take_due(&mut self, until: Duration) -> Option<TickId> {
        while let Some(id) = self.queue.pop_due(until) {
            if self.pending == Some(id) && !self.is_destroyed() {
                self.pending = None;
                return Some(id);
            }
            tracing::trace!(?id, "stale tick ignored");
        }
        None
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.queue.cancel(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;
