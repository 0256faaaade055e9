//! Input subsystem — merges the rotary encoder and its push-button into a
//! single stream of navigation events.
//!
//! ```text
//! ISR (phase edge) ──▶ atomic counter ─┐
//!                                      ├─▶ InputDebouncer ──▶ NavEvent
//! main loop (SW level poll) ───────────┘
//! ```
//!
//! The debouncer hands the menu state machine at most **one** event per
//! control tick. A rotation step and a button release landing on the same
//! tick are delivered on consecutive ticks, rotation first (the order the
//! reference hardware resolves them in).

pub mod button;
pub mod encoder;

use button::{Press, PressTracker};
use encoder::{DetentTracker, Step};
use heapless::Deque;

/// A discrete navigation event, consumed once by the menu state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    StepUp,
    StepDown,
    Confirm,
    Cancel,
}

pub struct InputDebouncer {
    detent: DetentTracker,
    press: PressTracker,
    // One-tick stash for the rare detent + release collision.
    pending: Deque<NavEvent, 4>,
}

impl InputDebouncer {
    pub fn new(detent_ticks: i32, long_press_ms: u64) -> Self {
        Self {
            detent: DetentTracker::new(detent_ticks),
            press: PressTracker::new(long_press_ms),
            pending: Deque::new(),
        }
    }

    /// Run one debounce pass against the live ISR counter and the polled
    /// switch level, returning at most one event.
    pub fn poll(&mut self, now_ms: u64, sw_active: bool) -> Option<NavEvent> {
        self.scan(now_ms, sw_active, encoder::position())
    }

    /// Same as [`poll`](Self::poll) but with an explicit encoder position,
    /// for host-side tests that do not go through the ISR statics.
    pub fn scan(&mut self, now_ms: u64, sw_active: bool, enc_pos: i32) -> Option<NavEvent> {
        if let Some(step) = self.detent.take_step(enc_pos) {
            let ev = match step {
                Step::Up => NavEvent::StepUp,
                Step::Down => NavEvent::StepDown,
            };
            let _ = self.pending.push_back(ev);
        }
        if let Some(press) = self.press.update(now_ms, sw_active) {
            let ev = match press {
                Press::Short => NavEvent::Confirm,
                Press::Long => NavEvent::Cancel,
            };
            let _ = self.pending.push_back(ev);
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> InputDebouncer {
        InputDebouncer::new(2, 800)
    }

    #[test]
    fn rotation_maps_to_steps() {
        let mut d = debouncer();
        assert_eq!(d.scan(0, false, 2), Some(NavEvent::StepDown));
        assert_eq!(d.scan(10, false, 0), Some(NavEvent::StepUp));
    }

    #[test]
    fn press_release_maps_to_confirm_and_cancel() {
        let mut d = debouncer();
        assert_eq!(d.scan(0, true, 0), None);
        assert_eq!(d.scan(200, false, 0), Some(NavEvent::Confirm));
        assert_eq!(d.scan(1000, true, 0), None);
        assert_eq!(d.scan(1900, false, 0), Some(NavEvent::Cancel));
    }

    #[test]
    fn simultaneous_step_and_release_split_across_ticks() {
        let mut d = debouncer();
        assert_eq!(d.scan(0, true, 0), None);
        // Detent lands on the same tick as the release: rotation first.
        assert_eq!(d.scan(100, false, 2), Some(NavEvent::StepDown));
        // The confirm is delivered on the next tick, not lost.
        assert_eq!(d.scan(110, false, 2), Some(NavEvent::Confirm));
        assert_eq!(d.scan(120, false, 2), None);
    }
}
