//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns every sensor driver and the three relay lines, exposing them
//! through [`SensorPort`] and [`RelayPort`]. Together with the LCD and
//! HTTP adapters this is the only code that touches actual hardware. On
//! non-espidf targets the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{RelayPort, SensorPort};
use crate::drivers::relay::{ActiveLevel, RelayLine};
use crate::pins;
use crate::relays::RelayId;
use crate::sensors::barometer::Bmp085;
use crate::sensors::climate::Dht11;
use crate::sensors::light::Bh1750;
use crate::sensors::ph::PhProbe;

/// Concrete adapter that combines the board's I/O behind port traits.
pub struct HardwareAdapter {
    dht: Dht11,
    light_meter: Bh1750,
    barometer: Bmp085,
    ph_probe: PhProbe,
    pump_line: RelayLine,
    light_line: RelayLine,
    fan_line: RelayLine,
}

impl HardwareAdapter {
    /// Wire up the default board: sensors per `pins`, pump/light relays
    /// active-low, fan relay active-high.
    pub fn new() -> Self {
        Self {
            dht: Dht11::new(pins::DHT_GPIO),
            light_meter: Bh1750::new(pins::BH1750_I2C_ADDR),
            barometer: Bmp085::new(pins::BMP085_I2C_ADDR),
            ph_probe: PhProbe::new(pins::PH_ADC_CHANNEL),
            pump_line: RelayLine::new(pins::RELAY_PUMP_GPIO, ActiveLevel::Low),
            light_line: RelayLine::new(pins::RELAY_LIGHT_GPIO, ActiveLevel::Low),
            fan_line: RelayLine::new(pins::RELAY_FAN_GPIO, ActiveLevel::High),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_air_temperature(&mut self) -> Option<f32> {
        self.dht.read().map(|r| r.temperature_c)
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.dht.read().map(|r| r.humidity_pct)
    }

    fn read_lux(&mut self) -> f32 {
        self.light_meter.read_lux()
    }

    fn read_ph_raw(&mut self) -> u16 {
        self.ph_probe.read_raw()
    }

    fn read_pressure_pa(&mut self) -> f32 {
        self.barometer.read_pressure_pa()
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl RelayPort for HardwareAdapter {
    fn drive(&mut self, relay: RelayId, energized: bool) {
        let line = match relay {
            RelayId::Pump => &self.pump_line,
            RelayId::Light => &self.light_line,
            RelayId::Fan => &self.fan_line,
        };
        line.drive(energized);
    }
}
