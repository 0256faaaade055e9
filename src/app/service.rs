//! Application service — the hexagonal core.
//!
//! [`Controller`] owns the one shared mutable state block of the system:
//! the screen state, the environmental snapshot, and the relay bank. The
//! components of the control loop get sequential read/modify access each
//! tick, in a fixed order:
//!
//! ```text
//!  nav event ──▶ menu state machine
//!               sensor sampler      (2 s cadence)
//!               display renderer    (1 s throttle, change-driven)
//!               telemetry publisher (2 s, subscriber-gated)
//!               relay automation    (every tick)
//! ```
//!
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.

use log::info;

use crate::config::SystemConfig;
use crate::display::Renderer;
use crate::input::NavEvent;
use crate::menu::{Screen, ScreenState};
use crate::relays::{RelayBank, RelayCommand, RelayId, RelayStates};
use crate::sensors::{EnvironmentSnapshot, Sampler};
use crate::telemetry::Publisher;

use super::events::{AppEvent, CommandSource};
use super::ports::{DisplayPort, EventSink, RelayPort, SensorPort, TelemetrySink};

/// The application service orchestrates all domain logic.
pub struct Controller {
    ui: ScreenState,
    env: EnvironmentSnapshot,
    relays: RelayBank,
    sampler: Sampler,
    renderer: Renderer,
    publisher: Publisher,
}

impl Controller {
    /// Construct the service from configuration. `seed` feeds the
    /// water-walk PRNG (a floating ADC read on device).
    pub fn new(config: &SystemConfig, seed: u32) -> Self {
        Self {
            ui: ScreenState::default(),
            env: EnvironmentSnapshot::default(),
            relays: RelayBank::new(config),
            sampler: Sampler::new(config, seed),
            renderer: Renderer::new(config),
            publisher: Publisher::new(config),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Draw the boot splash and settle the relay lines. The caller holds
    /// the splash on screen for the configured dwell (the one blocking
    /// delay in the system), then calls [`finish_splash`](Self::finish_splash).
    pub fn start(
        &mut self,
        hw: &mut impl RelayPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.sync_relay_outputs(hw);
        self.renderer
            .tick(0, &self.ui, &self.env, &self.relays.states, display);
        sink.emit(&AppEvent::Started(self.ui.screen));
        info!("controller started on {:?}", self.ui.screen);
    }

    /// Leave the splash for the main menu. Called exactly once.
    pub fn finish_splash(&mut self, sink: &mut impl EventSink) {
        let from = self.ui.screen;
        self.ui.leave_splash();
        self.renderer.force_refresh();
        sink.emit(&AppEvent::ScreenChanged {
            from,
            to: self.ui.screen,
        });
    }

    // ── Input ─────────────────────────────────────────────────

    /// Feed one navigation event into the menu state machine. Every
    /// event forces a display refresh, whether or not the screen moved
    /// (the reference device redraws on any input).
    pub fn handle_nav(&mut self, event: NavEvent, sink: &mut impl EventSink) {
        let from = self.ui.screen;
        let changed = self.ui.handle(event);
        self.renderer.force_refresh();
        if changed && self.ui.screen != from {
            sink.emit(&AppEvent::ScreenChanged {
                from,
                to: self.ui.screen,
            });
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run the non-input portion of one control cycle.
    ///
    /// The `hw` parameter satisfies both [`SensorPort`] and [`RelayPort`]
    /// — one adapter owns the board, which avoids a double mutable
    /// borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + RelayPort),
        display: &mut impl DisplayPort,
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) {
        self.sampler.tick(now_ms, hw, &mut self.env);

        self.renderer
            .tick(now_ms, &self.ui, &self.env, &self.relays.states, display);

        if let Some(record) = self
            .publisher
            .tick(now_ms, &self.env, &self.relays.states, telemetry)
        {
            sink.emit(&AppEvent::Telemetry(record));
        }

        if self.relays.tick(now_ms) {
            self.sync_relay_outputs(hw);
            sink.emit(&AppEvent::RelayChanged {
                relay: RelayId::Pump,
                energized: self.relays.states.pump_on,
                auto: true,
                source: CommandSource::Automation,
            });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an inbound actuator command against the shared relay state.
    /// Runs synchronously on whatever context delivers it; the command
    /// mailbox in `main` serializes it with the control loop.
    pub fn apply_command(
        &mut self,
        command: RelayCommand,
        now_ms: u64,
        hw: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) {
        if let Some(relay) = self.relays.apply(command, now_ms) {
            self.sync_relay_outputs(hw);
            let s = &self.relays.states;
            let (energized, auto) = match relay {
                RelayId::Pump => (s.pump_on, s.pump_auto),
                RelayId::Light => (s.light_on, false),
                RelayId::Fan => (s.fan_on, s.fan_auto),
            };
            sink.emit(&AppEvent::RelayChanged {
                relay,
                energized,
                auto,
                source: CommandSource::Remote,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.ui.screen
    }

    /// Current environmental snapshot.
    pub fn snapshot(&self) -> &EnvironmentSnapshot {
        &self.env
    }

    /// Current actuator states.
    pub fn relay_states(&self) -> &RelayStates {
        &self.relays.states
    }

    // ── Internal ──────────────────────────────────────────────

    /// Project the logical relay states onto the physical lines.
    fn sync_relay_outputs(&self, hw: &mut impl RelayPort) {
        let s = &self.relays.states;
        hw.drive(RelayId::Pump, s.pump_on);
        hw.drive(RelayId::Light, s.light_on);
        hw.drive(RelayId::Fan, s.fan_on);
    }
}
