//! Debounce and rate-limit state of the filter row.
//!
//! Timers in the browser cannot be reliably cancelled from reactive code, so
//! both machines compare timestamps instead: an obsolete timer wakes up, sees
//! a later deadline, and does nothing.

/// Quiet period after the last keystroke before a text filter triggers a
/// fetch.
pub const TEXT_FILTER_DEBOUNCE_MS: f64 = 500.0;

/// Minimum spacing between accepted firmado-filter changes.
pub const FIRMADO_GUARD_MS: f64 = 2000.0;

/// Deadline machine behind every text filter input. Each keystroke arms its
/// own timer and pushes the shared deadline out; only the timer that wakes up
/// at or after the deadline triggers the fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebounceGate {
    deadline: Option<f64>,
}

impl DebounceGate {
    pub fn keystroke(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + TEXT_FILTER_DEBOUNCE_MS);
    }

    /// True exactly once per quiet period: for the timer that finds the
    /// deadline reached. Earlier timers see a later deadline and lose.
    pub fn timer_fired(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Click guard of the firmado select: accepts a change only when the previous
/// accepted one is far enough in the past.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirmadoGuard {
    last_accepted: Option<f64>,
}

impl FirmadoGuard {
    pub fn try_accept(&mut self, now_ms: f64) -> bool {
        match self.last_accepted {
            Some(last) if now_ms - last < FIRMADO_GUARD_MS => false,
            _ => {
                self.last_accepted = Some(now_ms);
                true
            }
        }
    }
}
