//! DHT11 air temperature / humidity sensor (single-wire protocol).
//!
//! The start handshake drives the data line low for 18 ms, then releases
//! it and times the sensor's 40 response pulses: a high phase longer than
//! 50 µs is a 1-bit. The part cannot be sampled faster than once per two
//! seconds, so the driver caches the last transaction result and replays
//! it for reads inside that window (both snapshot fields come from one
//! transaction).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the GPIO through the hw_init shims.
//! On host/test: reads injected values from static atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use log::debug;

/// One decoded DHT11 transaction.
#[derive(Debug, Clone, Copy)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy)]
enum DhtError {
    Timeout(&'static str),
    Checksum,
}

/// Minimum spacing between bus transactions (datasheet: 2 s).
#[cfg(target_os = "espidf")]
const MIN_INTERVAL_US: u64 = 2_000_000;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_MILLI_C: AtomicI32 = AtomicI32::new(24_000);
#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_MILLI_PCT: AtomicI32 = AtomicI32::new(55_000);
#[cfg(not(target_os = "espidf"))]
static SIM_VALID: AtomicBool = AtomicBool::new(true);

/// Inject a simulated climate reading (host/test builds only).
/// `valid = false` makes subsequent reads fail like an unplugged sensor.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32, valid: bool) {
    SIM_TEMP_MILLI_C.store((temperature_c * 1000.0) as i32, Ordering::Relaxed);
    SIM_HUMIDITY_MILLI_PCT.store((humidity_pct * 1000.0) as i32, Ordering::Relaxed);
    SIM_VALID.store(valid, Ordering::Relaxed);
}

pub struct Dht11 {
    _gpio: i32,
    #[cfg(target_os = "espidf")]
    last_attempt_us: u64,
    #[cfg(target_os = "espidf")]
    last_result: Option<ClimateReading>,
}

impl Dht11 {
    pub fn new(gpio: i32) -> Self {
        Self {
            _gpio: gpio,
            #[cfg(target_os = "espidf")]
            last_attempt_us: 0,
            #[cfg(target_os = "espidf")]
            last_result: None,
        }
    }

    /// Read the sensor. `None` means the transaction failed (timeout or
    /// checksum) — callers keep their previous value.
    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Option<ClimateReading> {
        let now = hw_init::time_us();
        if now.saturating_sub(self.last_attempt_us) < MIN_INTERVAL_US && self.last_attempt_us != 0 {
            return self.last_result;
        }
        self.last_attempt_us = now;
        self.last_result = match self.transact() {
            Ok(reading) => Some(reading),
            Err(e) => {
                debug!("dht11: read failed ({:?})", e);
                None
            }
        };
        self.last_result
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Option<ClimateReading> {
        if !SIM_VALID.load(Ordering::Relaxed) {
            return None;
        }
        Some(ClimateReading {
            temperature_c: SIM_TEMP_MILLI_C.load(Ordering::Relaxed) as f32 / 1000.0,
            humidity_pct: SIM_HUMIDITY_MILLI_PCT.load(Ordering::Relaxed) as f32 / 1000.0,
        })
    }

    #[cfg(target_os = "espidf")]
    fn transact(&mut self) -> Result<ClimateReading, DhtError> {
        // Host start signal: >=18 ms low, ~30 us high, then release.
        hw_init::gpio_set_output(self._gpio);
        hw_init::gpio_write(self._gpio, false);
        hw_init::delay_us(18_000);
        hw_init::gpio_write(self._gpio, true);
        hw_init::delay_us(30);
        hw_init::gpio_set_input_pullup(self._gpio);

        // Sensor response: ~80 us low, ~80 us high, then the first bit.
        self.wait_level(false, 90, "response low")?;
        self.wait_level(true, 120, "response high")?;
        self.wait_level(false, 120, "data preamble")?;

        let mut data = [0u8; 5];
        for byte in &mut data {
            for _ in 0..8 {
                self.wait_level(true, 80, "bit high")?;
                let start = hw_init::time_us();
                self.wait_level(false, 110, "bit low")?;
                let high_len = hw_init::time_us() - start;
                *byte = (*byte << 1) | u8::from(high_len > 50);
            }
        }

        let sum = data[0]
            .wrapping_add(data[1])
            .wrapping_add(data[2])
            .wrapping_add(data[3]);
        if sum != data[4] {
            return Err(DhtError::Checksum);
        }

        Ok(ClimateReading {
            humidity_pct: f32::from(data[0]) + f32::from(data[1]) / 10.0,
            temperature_c: f32::from(data[2]) + f32::from(data[3]) / 10.0,
        })
    }

    #[cfg(target_os = "espidf")]
    fn wait_level(&self, high: bool, timeout_us: u64, stage: &'static str) -> Result<(), DhtError> {
        let deadline = hw_init::time_us() + timeout_us;
        while hw_init::time_us() <= deadline {
            if hw_init::gpio_read(self._gpio) == high {
                return Ok(());
            }
        }
        Err(DhtError::Timeout(stage))
    }
}
