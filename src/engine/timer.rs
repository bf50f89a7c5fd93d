use std::collections::BTreeSet;
use std::time::Duration;

/// Handle for one posted tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(u64);

/// Single-threaded delayed callback queue driven by an external monotonic clock.
///
/// The queue never reads a clock; [`TickQueue::pop_due`] moves its notion of `now` to the time
/// the driver reports. Ticks with equal deadlines pop in posting order.
#[derive(Debug, Default)]
pub struct TickQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeSet<(Duration, TickId)>,
}

impl TickQueue {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Post a tick due `delay` after the current queue time.
    pub fn post_delayed(&mut self, delay: Duration) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now.saturating_add(delay), id));
        id
    }

    /// Remove a pending tick. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TickId) -> bool {
        let key = self.pending.iter().find(|(_, t)| *t == id).copied();
        key.is_some_and(|k| self.pending.remove(&k))
    }

    /// Pop the earliest tick due at or before `until`.
    ///
    /// `now` moves to `until` (never backwards) whether or not a tick is due, so a delay posted
    /// after an overdue tick counts from the driver's time, not from the missed deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<TickId> {
        self.now = self.now.max(until);
        let (deadline, id) = self.pending.first().copied()?;
        if deadline > self.now {
            return None;
        }
        self.pending.remove(&(deadline, id));
        Some(id)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.first().map(|(d, _)| *d)
    }

    /// Number of pending ticks.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/timer.rs"]
mod tests;
