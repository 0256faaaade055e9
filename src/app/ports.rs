//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (sensors, relay lines, the character display, the
//! telemetry transport, event sinks) implement these traits. The
//! [`Controller`](super::service::Controller) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::relays::RelayId;
use crate::telemetry::TelemetryRecord;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port over the environmental sensors.
///
/// The climate reads are fallible — `None` means "keep the previous
/// value". The remaining channels report whatever the bus returned;
/// filtering them is deliberately not this layer's job.
pub trait SensorPort {
    /// Air temperature (°C), or `None` on a failed transaction.
    fn read_air_temperature(&mut self) -> Option<f32>;

    /// Relative humidity (%RH), or `None` on a failed transaction.
    fn read_humidity(&mut self) -> Option<f32>;

    /// Illuminance (lux).
    fn read_lux(&mut self) -> f32;

    /// Raw 12-bit pH probe sample in `[0, 4095]`.
    fn read_ph_raw(&mut self) -> u16;

    /// Barometric pressure (Pa).
    fn read_pressure_pa(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain commands logical actuator states; the
/// adapter resolves each line's drive polarity.
pub trait RelayPort {
    fn drive(&mut self, relay: RelayId, energized: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character LCD)
// ───────────────────────────────────────────────────────────────

/// Absolute-positioned text output; no read-back.
pub trait DisplayPort {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn write_text(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Telemetry sink port (driven adapter: domain → push channel)
// ───────────────────────────────────────────────────────────────

/// Push-channel transport. `subscriber_count` gates publishing — records
/// are only serialized while an observer is attached.
pub trait TelemetrySink {
    fn subscriber_count(&self) -> usize;
    fn publish(&mut self, record: &TelemetryRecord);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / observability)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// an MQTT or BLE adapter would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
