//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log to serial, mirror to a future
//! network channel, etc.

use crate::menu::Screen;
use crate::relays::RelayId;
use crate::telemetry::TelemetryRecord;

/// How a relay state change was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    /// Inbound telemetry command.
    Remote,
    /// The duty-cycle automation engine.
    Automation,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller has started (carries the initial screen).
    Started(Screen),

    /// The operator navigated between screens.
    ScreenChanged { from: Screen, to: Screen },

    /// An actuator changed state or mode.
    RelayChanged {
        relay: RelayId,
        energized: bool,
        auto: bool,
        source: CommandSource,
    },

    /// A telemetry record was pushed to the observer channel.
    Telemetry(TelemetryRecord),
}
