//! Debounced snap timer.
//!
//! Each picker column owns exactly one [`SnapTimer`] slot. Scheduling a snap
//! replaces any pending one, so at most one deadline is live per column, and
//! dropping the column drops its deadline with it.

use std::time::Duration;

use tokio::time::Instant;

/// A committed snap: the surface was moved to the aligned offset of `index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub index: usize,
    pub offset: f64,
}

// ---------------------------------------------------------------------------
// SnapTimer
// ---------------------------------------------------------------------------

/// Fire-once, replaceable deadline.
#[derive(Debug, Clone)]
pub struct SnapTimer {
    delay: Duration,
    deadline: Option<Instant>,
    superseded: u64,
    fired: u64,
}

impl SnapTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            superseded: 0,
            fired: 0,
        }
    }

    /// Arm the timer for `now + delay`, replacing any pending deadline.
    ///
    /// Returns `true` when a pending deadline was superseded.
    pub fn schedule(&mut self, now: Instant) -> bool {
        let replaced = self.deadline.replace(now + self.delay).is_some();
        if replaced {
            self.superseded += 1;
        }
        replaced
    }

    /// Disarm the timer. Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Consume the deadline if it has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// Sleep until the pending deadline. Returns immediately when idle.
    pub async fn elapsed(&self) {
        if let Some(deadline) = self.deadline {
            tokio::time::sleep_until(deadline).await;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// How many pending deadlines were replaced by a newer schedule.
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    /// How many deadlines have fired.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }
}

// ===========================================================================
// Tests
// ===========================================================================
