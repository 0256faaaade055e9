//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production). A future network
//! sink would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | air={} hum={} water={} lux={} ph={} press={} | \
                     motor={} light={} fan={} | auto motor={} fan={}",
                    t.bmp_temp,
                    t.dht_humidity,
                    t.ds18b20,
                    t.lux,
                    t.ph,
                    t.pressure,
                    t.motor,
                    t.light,
                    t.fan,
                    t.motor_auto,
                    t.fan_auto,
                );
            }
            AppEvent::ScreenChanged { from, to } => {
                info!("SCREEN | {:?} -> {:?}", from, to);
            }
            AppEvent::RelayChanged {
                relay,
                energized,
                auto,
                source,
            } => {
                info!(
                    "RELAY | {:?} -> {} (auto={}, via {:?})",
                    relay,
                    if *energized { "ON" } else { "OFF" },
                    auto,
                    source,
                );
            }
            AppEvent::Started(screen) => {
                info!("START | initial_screen={:?}", screen);
            }
        }
    }
}
