//! Quadrature rotary encoder: ISR-side counting and detent detection.
//!
//! ## Hardware
//!
//! KY-040-style quarter-step encoder. Phase A ("CLK") is configured as a
//! CHANGE-edge interrupt source; phase B ("DT") is sampled inside the ISR.
//! On every phase-A transition the ISR compares A to B: differing levels
//! count +1, equal levels count −1. The running position lives in an
//! `AtomicI32` — the ESP32 guarantees torn-free 32-bit loads/stores, so
//! the main loop can read the counter without a critical section.
//!
//! ## Detent detection
//!
//! The main loop compares the counter against its last-observed baseline.
//! A net change of at least one detent (two raw ticks) emits a step, and
//! the baseline jumps to the *current* counter value rather than advancing
//! by exactly one detent, so missed detents never accumulate drift.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Raw quadrature position, written by the ISR, read by the main loop.
static ENC_POSITION: AtomicI32 = AtomicI32::new(0);
/// Last observed phase-A level, ISR-private state kept atomic for the
/// same torn-write reasons as the counter.
static ENC_LAST_CLK: AtomicBool = AtomicBool::new(true);

/// One detent of rotation, already mapped to list-navigation polarity:
/// clockwise moves the cursor down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// ISR handler — register on the phase-A GPIO with a CHANGE trigger.
/// Safe to call from interrupt context (lock-free atomic ops only).
pub fn encoder_isr(clk_high: bool, dt_high: bool) {
    if clk_high != ENC_LAST_CLK.load(Ordering::Relaxed) {
        let delta = if dt_high != clk_high { 1 } else { -1 };
        ENC_POSITION.fetch_add(delta, Ordering::Release);
        ENC_LAST_CLK.store(clk_high, Ordering::Relaxed);
    }
}

/// Seed the phase-A level before interrupts are enabled, so the first
/// real edge is not miscounted against a stale default.
pub fn seed_phase(clk_high: bool) {
    ENC_LAST_CLK.store(clk_high, Ordering::Relaxed);
}

/// Current raw position counter.
pub fn position() -> i32 {
    ENC_POSITION.load(Ordering::Acquire)
}

#[cfg(test)]
pub(crate) fn reset_for_test() {
    ENC_POSITION.store(0, Ordering::SeqCst);
    ENC_LAST_CLK.store(true, Ordering::SeqCst);
}

/// Main-loop side of the encoder: turns raw counter movement into detents.
pub struct DetentTracker {
    baseline: i32,
    detent_ticks: i32,
}

impl DetentTracker {
    pub fn new(detent_ticks: i32) -> Self {
        Self {
            baseline: 0,
            detent_ticks,
        }
    }

    /// Compare `pos` against the baseline and emit at most one step.
    /// `pos` is a snapshot of the ISR counter taken by the caller.
    pub fn take_step(&mut self, pos: i32) -> Option<Step> {
        let delta = pos - self.baseline;
        if delta >= self.detent_ticks {
            self.baseline = pos;
            Some(Step::Down)
        } else if delta <= -self.detent_ticks {
            self.baseline = pos;
            Some(Step::Up)
        } else {
            None
        }
    }
}
