use std::time::{Duration, Instant};

use crate::utils::format::timer_minutes;

/// Pausable stopwatch for a reading session. Starts running when created.
#[derive(Debug, Clone)]
pub struct ReadingTimer {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl ReadingTimer {
    pub fn start(now: Instant) -> Self {
        Self {
            accumulated: Duration::ZERO,
            running_since: Some(now),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.running_since.take() {
            Some(since) => self.accumulated += now.saturating_duration_since(since),
            None => self.running_since = Some(now),
        }
    }

    /// Back to zero, keeping the running state.
    pub fn reset(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        if self.running_since.is_some() {
            self.running_since = Some(now);
        }
    }

    /// Minutes to log, rounding any started minute up. `None` before the first second.
    pub fn finish(&self, now: Instant) -> Option<u32> {
        let secs = self.elapsed_secs(now);
        if secs == 0 {
            None
        } else {
            Some(timer_minutes(secs))
        }
    }
}
