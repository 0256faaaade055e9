//! System configuration parameters
//!
//! All tunable parameters for the GrowPod controller. The struct is plain
//! data with serde derives so a build variant can ship alternative presets;
//! there is no runtime persistence — the controller boots from defaults.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Pump duty cycle ---
    /// Automatic-mode pump on-window (seconds)
    pub pump_on_secs: u32,
    /// Automatic-mode pump off-window (seconds)
    pub pump_off_secs: u32,

    // --- Input ---
    /// Button hold time at or above which a release is a long press (ms)
    pub long_press_ms: u64,
    /// Net raw encoder ticks per detent (quarter-step encoder = 2)
    pub detent_ticks: i32,

    // --- Water temperature stand-in ---
    /// Lower clamp of the simulated reservoir temperature (Celsius)
    pub water_temp_min_c: f32,
    /// Upper clamp of the simulated reservoir temperature (Celsius)
    pub water_temp_max_c: f32,

    // --- Timing ---
    /// Minimum interval between sensor sampling passes (milliseconds)
    pub sensor_interval_ms: u64,
    /// Minimum interval between unforced display refreshes (milliseconds)
    pub display_interval_ms: u64,
    /// Telemetry push interval (milliseconds)
    pub telemetry_interval_ms: u64,
    /// Splash screen dwell before the main menu appears (milliseconds)
    pub splash_dwell_ms: u64,
    /// Control loop sleep per iteration (milliseconds)
    pub control_loop_interval_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Pump: 15 min on, 45 min off
            pump_on_secs: 15 * 60,
            pump_off_secs: 45 * 60,

            // Input
            long_press_ms: 800,
            detent_ticks: 2,

            // Water temperature band
            water_temp_min_c: 19.7,
            water_temp_max_c: 21.2,

            // Timing
            sensor_interval_ms: 2000,
            display_interval_ms: 1000,
            telemetry_interval_ms: 2000,
            splash_dwell_ms: 2000,
            control_loop_interval_ms: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.pump_on_secs > 0);
        assert!(c.pump_off_secs > c.pump_on_secs);
        assert!(c.long_press_ms > 0);
        assert!(c.detent_ticks > 0);
        assert!(c.water_temp_min_c < c.water_temp_max_c);
        assert!(c.control_loop_interval_ms > 0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.pump_on_secs, c2.pump_on_secs);
        assert_eq!(c.long_press_ms, c2.long_press_ms);
        assert!((c.water_temp_min_c - c2.water_temp_min_c).abs() < 0.001);
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.control_loop_interval_ms < c.display_interval_ms,
            "control loop must outpace the display throttle"
        );
        assert!(
            c.display_interval_ms <= c.sensor_interval_ms,
            "a fresh sample should never wait more than one refresh"
        );
    }
}
