//! Telemetry — wire record serialization, publish gating, and inbound
//! command decoding.
//!
//! Floating snapshot fields are scaled to fixed-point integers before
//! serialization so the wire format carries no locale or float-precision
//! ambiguity; the observer front-end divides them back out. Records are
//! pushed on a fixed interval and only while at least one subscriber is
//! attached.

use serde::Serialize;

use crate::app::ports::TelemetrySink;
use crate::config::SystemConfig;
use crate::relays::{RelayCommand, RelayStates};
use crate::sensors::EnvironmentSnapshot;

/// One push-channel record. All fields integer, field-specific scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryRecord {
    /// Air temperature, °C × 10.
    #[serde(rename = "bmpTemp")]
    pub bmp_temp: i32,
    /// Relative humidity, %RH × 10.
    #[serde(rename = "dhtHumidity")]
    pub dht_humidity: i32,
    /// Reservoir water temperature, °C × 100.
    pub ds18b20: i32,
    /// Illuminance, whole lux.
    pub lux: i32,
    /// pH × 100.
    pub ph: i32,
    /// Barometric pressure, hPa × 10.
    pub pressure: i32,
    pub motor: u8,
    pub light: u8,
    pub fan: u8,
    #[serde(rename = "motorAuto")]
    pub motor_auto: u8,
    #[serde(rename = "fanAuto")]
    pub fan_auto: u8,
}

impl TelemetryRecord {
    /// Scale a snapshot + actuator state into wire form. A field that has
    /// never been read (NaN) scales to 0.
    pub fn capture(env: &EnvironmentSnapshot, relays: &RelayStates) -> Self {
        Self {
            bmp_temp: scaled(env.air_temp_c, 10.0),
            dht_humidity: scaled(env.humidity_pct, 10.0),
            ds18b20: scaled(env.water_temp_c, 100.0),
            lux: scaled(env.lux, 1.0),
            ph: scaled(env.ph, 100.0),
            pressure: scaled(env.pressure_hpa, 10.0),
            motor: u8::from(relays.pump_on),
            light: u8::from(relays.light_on),
            fan: u8::from(relays.fan_on),
            motor_auto: u8::from(relays.pump_auto),
            fan_auto: u8::from(relays.fan_auto),
        }
    }
}

fn scaled(value: f32, scale: f32) -> i32 {
    (value * scale).round() as i32
}

/// Decode an inbound `{device, state}` command pair.
///
/// Unknown device names and malformed states decode to `None`; the
/// endpoint acknowledges those anyway — there is deliberately no
/// validation-error channel.
pub fn parse_command(device: &str, state: &str) -> Option<RelayCommand> {
    let on = match state {
        "1" => true,
        "0" => false,
        _ => return None,
    };
    match device {
        "motor" => Some(RelayCommand::Pump(on)),
        "light" => Some(RelayCommand::Light(on)),
        "fan" => Some(RelayCommand::Fan(on)),
        "motorAuto" => Some(RelayCommand::PumpAuto(on)),
        "fanAuto" => Some(RelayCommand::FanAuto(on)),
        _ => None,
    }
}

/// Interval + subscriber publish gate.
pub struct Publisher {
    interval_ms: u64,
    last_publish_ms: Option<u64>,
}

impl Publisher {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            interval_ms: config.telemetry_interval_ms,
            last_publish_ms: None,
        }
    }

    /// Push a record if one is due and anyone is listening. Returns the
    /// published record so the caller can mirror it to the event sink.
    pub fn tick(
        &mut self,
        now_ms: u64,
        env: &EnvironmentSnapshot,
        relays: &RelayStates,
        sink: &mut impl TelemetrySink,
    ) -> Option<TelemetryRecord> {
        if sink.subscriber_count() == 0 {
            return None;
        }
        if let Some(last) = self.last_publish_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return None;
            }
        }
        self.last_publish_ms = Some(now_ms);
        let record = TelemetryRecord::capture(env, relays);
        sink.publish(&record);
        Some(record)
    }
}
