//! Timed duty-cycle engine for the pump.
//!
//! Open-loop by design: while automatic mode is on, the pump alternates
//! between a fixed on-window and a fixed off-window. The elapsed-time
//! comparison uses the 64-bit monotonic millisecond clock, which cannot
//! wrap over any realistic uptime.

/// One alternating on/off window pair.
pub struct DutyCycle {
    on_ms: u64,
    off_ms: u64,
    last_toggle_ms: u64,
}

impl DutyCycle {
    pub fn new(on_ms: u64, off_ms: u64) -> Self {
        Self {
            on_ms,
            off_ms,
            last_toggle_ms: 0,
        }
    }

    /// Restart the current window at `now_ms` (automatic mode re-armed).
    pub fn arm(&mut self, now_ms: u64) {
        self.last_toggle_ms = now_ms;
    }

    /// Check whether the active window has expired. Returns the new
    /// energized state when a toggle is due, `None` otherwise.
    pub fn evaluate(&mut self, now_ms: u64, energized: bool) -> Option<bool> {
        let window = if energized { self.on_ms } else { self.off_ms };
        if now_ms.saturating_sub(self.last_toggle_ms) >= window {
            self.last_toggle_ms = now_ms;
            Some(!energized)
        } else {
            None
        }
    }
}
