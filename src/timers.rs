//! Periodic triggers and pause bookkeeping.
//!
//! Nothing here sleeps or spawns threads: every timer is a timestamp compared
//! against the millisecond clock handed to the engine once per frame.

/// Fires once every `period_ms`, checked by polling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Periodic {
    pub period_ms: u64,
    pub next_due_ms: u64,
}

impl Periodic {
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        Self { period_ms, next_due_ms: now_ms + period_ms }
    }

    /// Returns `true` at most once per call when the period has elapsed.
    /// A frame that overshoots by more than a whole period does not queue
    /// extra firings; the schedule restarts from `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms += self.period_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.period_ms;
        }
        true
    }
}

/// Tracks how long gameplay sat in the pause screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PauseRecord {
    pub start_ms: u64,
    /// Outstanding credit not yet applied to any fire timer.
    pub total_paused_ms: u64,
    pub is_paused: bool,
}

impl PauseRecord {
    pub fn begin(&mut self, now_ms: u64) {
        if !self.is_paused {
            self.start_ms = now_ms;
            self.is_paused = true;
        }
    }

    /// Ends the pause, adds its length to the outstanding credit and returns it.
    pub fn resume(&mut self, now_ms: u64) -> u64 {
        if !self.is_paused {
            return 0;
        }
        self.is_paused = false;
        let elapsed = now_ms.saturating_sub(self.start_ms);
        self.total_paused_ms += elapsed;
        elapsed
    }

    /// Hands out the whole outstanding credit and zeroes it.
    pub fn take_credit(&mut self) -> u64 {
        std::mem::take(&mut self.total_paused_ms)
    }

    /// Drops the pause without crediting it, used when leaving to the menu.
    pub fn abandon(&mut self) {
        *self = Self::default();
    }
}
