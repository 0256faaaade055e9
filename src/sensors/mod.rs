//! Sensor subsystem — individual drivers and the snapshot [`Sampler`].
//!
//! The sampler runs on a fixed minimum cadence gated by the monotonic
//! clock, independent of how fast the operator spins the menu. It never
//! invalidates the snapshot: a failed climate read leaves the previous
//! values in place, and the reservoir temperature advances by a bounded
//! random walk (see [`water`]) until a real probe is wired in.

pub mod barometer;
pub mod climate;
pub mod light;
pub mod ph;
pub mod water;

use crate::app::ports::SensorPort;
use crate::config::SystemConfig;
use water::WaterWalk;

/// Last-known environmental readings, shared by the display renderer and
/// the telemetry publisher.
///
/// Air temperature and humidity start as NaN ("no reading yet") and are
/// only ever overwritten by successful reads. Lux and pressure are
/// last-write-wins with no failure filtering, matching the reference
/// device.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentSnapshot {
    /// Air temperature inside the enclosure (°C).
    pub air_temp_c: f32,
    /// Relative humidity (%RH).
    pub humidity_pct: f32,
    /// Reservoir water temperature (°C), clamped to the configured band.
    pub water_temp_c: f32,
    /// Illuminance at canopy level (lux).
    pub lux: f32,
    /// Nutrient solution pH (0.00 – 14.00).
    pub ph: f32,
    /// Barometric pressure (hPa).
    pub pressure_hpa: f32,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            air_temp_c: f32::NAN,
            humidity_pct: f32::NAN,
            water_temp_c: 20.0,
            lux: 0.0,
            ph: 0.0,
            pressure_hpa: 0.0,
        }
    }
}

/// Periodic snapshot refresher.
pub struct Sampler {
    interval_ms: u64,
    last_sample_ms: Option<u64>,
    walk: WaterWalk,
}

impl Sampler {
    /// `seed` feeds the water-walk PRNG; on device it comes from a
    /// floating ADC read at boot.
    pub fn new(config: &SystemConfig, seed: u32) -> Self {
        Self {
            interval_ms: config.sensor_interval_ms,
            last_sample_ms: None,
            walk: WaterWalk::new(seed, config.water_temp_min_c, config.water_temp_max_c),
        }
    }

    /// Refresh `snapshot` if the sampling interval has elapsed.
    /// Returns `true` when a sampling pass ran.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut impl SensorPort,
        snapshot: &mut EnvironmentSnapshot,
    ) -> bool {
        if let Some(last) = self.last_sample_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_sample_ms = Some(now_ms);

        // Climate readings may transiently fail; keep the prior value.
        if let Some(t) = hw.read_air_temperature() {
            snapshot.air_temp_c = t;
        }
        if let Some(h) = hw.read_humidity() {
            snapshot.humidity_pct = h;
        }

        snapshot.water_temp_c = self.walk.advance(snapshot.water_temp_c);

        // Lux and pressure are taken as-is — last write wins.
        snapshot.lux = hw.read_lux();
        snapshot.ph = ph::ph_from_raw(hw.read_ph_raw());
        snapshot.pressure_hpa = hw.read_pressure_pa() / 100.0;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSensors {
        temp: Option<f32>,
        humidity: Option<f32>,
        lux: f32,
        ph_raw: u16,
        pressure_pa: f32,
    }

    impl SensorPort for ScriptedSensors {
        fn read_air_temperature(&mut self) -> Option<f32> {
            self.temp
        }
        fn read_humidity(&mut self) -> Option<f32> {
            self.humidity
        }
        fn read_lux(&mut self) -> f32 {
            self.lux
        }
        fn read_ph_raw(&mut self) -> u16 {
            self.ph_raw
        }
        fn read_pressure_pa(&mut self) -> f32 {
            self.pressure_pa
        }
    }

    fn sensors() -> ScriptedSensors {
        ScriptedSensors {
            temp: Some(24.0),
            humidity: Some(55.0),
            lux: 120.0,
            ph_raw: 2048,
            pressure_pa: 101_320.0,
        }
    }

    #[test]
    fn first_tick_samples_immediately() {
        let mut sampler = Sampler::new(&SystemConfig::default(), 1);
        let mut snap = EnvironmentSnapshot::default();
        assert!(sampler.tick(0, &mut sensors(), &mut snap));
        assert_eq!(snap.air_temp_c, 24.0);
        assert_eq!(snap.humidity_pct, 55.0);
    }

    #[test]
    fn cadence_is_gated_by_monotonic_clock() {
        let mut sampler = Sampler::new(&SystemConfig::default(), 1);
        let mut snap = EnvironmentSnapshot::default();
        let mut hw = sensors();
        assert!(sampler.tick(0, &mut hw, &mut snap));
        assert!(!sampler.tick(500, &mut hw, &mut snap));
        assert!(!sampler.tick(1999, &mut hw, &mut snap));
        assert!(sampler.tick(2000, &mut hw, &mut snap));
    }

    #[test]
    fn failed_climate_read_retains_previous_values() {
        let mut sampler = Sampler::new(&SystemConfig::default(), 1);
        let mut snap = EnvironmentSnapshot::default();
        let mut hw = sensors();
        sampler.tick(0, &mut hw, &mut snap);

        hw.temp = None;
        hw.humidity = None;
        sampler.tick(2000, &mut hw, &mut snap);
        assert_eq!(snap.air_temp_c, 24.0);
        assert_eq!(snap.humidity_pct, 55.0);
    }

    #[test]
    fn lux_and_pressure_are_last_write_wins() {
        // Documented behavior of the reference device: no failure
        // filtering on these channels, nonsensical values included.
        let mut sampler = Sampler::new(&SystemConfig::default(), 1);
        let mut snap = EnvironmentSnapshot::default();
        let mut hw = sensors();
        sampler.tick(0, &mut hw, &mut snap);

        hw.lux = -3.0;
        hw.pressure_pa = 0.0;
        sampler.tick(2000, &mut hw, &mut snap);
        assert_eq!(snap.lux, -3.0);
        assert_eq!(snap.pressure_hpa, 0.0);
    }

    #[test]
    fn water_temperature_stays_in_band() {
        let config = SystemConfig::default();
        let mut sampler = Sampler::new(&config, 7);
        let mut snap = EnvironmentSnapshot::default();
        let mut hw = sensors();
        for i in 0..10_000u64 {
            sampler.tick(i * 2000, &mut hw, &mut snap);
            assert!(snap.water_temp_c >= config.water_temp_min_c);
            assert!(snap.water_temp_c <= config.water_temp_max_c);
        }
    }
}
