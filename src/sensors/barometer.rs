//! BMP085 barometric pressure sensor (I²C).
//!
//! The part stores per-device calibration coefficients in EEPROM; a
//! pressure read takes an uncompensated temperature and pressure sample
//! and runs both through the datasheet's integer compensation pipeline.
//! Oversampling is fixed at standard mode (OSS 1). As with the light
//! sensor, reads are not failure-filtered.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use log::warn;

#[cfg(target_os = "espidf")]
const REG_CALIB_START: u8 = 0xAA;
#[cfg(target_os = "espidf")]
const REG_CONTROL: u8 = 0xF4;
#[cfg(target_os = "espidf")]
const REG_DATA: u8 = 0xF6;
#[cfg(target_os = "espidf")]
const CMD_READ_TEMP: u8 = 0x2E;
#[cfg(target_os = "espidf")]
const CMD_READ_PRESSURE: u8 = 0x34;
/// Oversampling setting (0–3). Standard mode.
#[cfg(target_os = "espidf")]
const OSS: u8 = 1;

#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy)]
struct Calibration {
    ac1: i16,
    ac2: i16,
    ac3: i16,
    ac4: u16,
    ac5: u16,
    ac6: u16,
    b1: i16,
    b2: i16,
    mc: i16,
    md: i16,
}

#[cfg(not(target_os = "espidf"))]
static SIM_PRESSURE_PA_BITS: AtomicU32 = AtomicU32::new(0);

/// Inject a simulated pressure in pascals (host/test builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressure_pa(pa: f32) {
    SIM_PRESSURE_PA_BITS.store(pa.to_bits(), Ordering::Relaxed);
}

pub struct Bmp085 {
    addr: u8,
    #[cfg(target_os = "espidf")]
    cal: Option<Calibration>,
}

impl Bmp085 {
    pub fn new(addr: u8) -> Self {
        Self {
            addr,
            #[cfg(target_os = "espidf")]
            cal: None,
        }
    }

    /// Uncompensated-to-pascal pipeline per the datasheet.
    #[cfg(target_os = "espidf")]
    pub fn read_pressure_pa(&mut self) -> f32 {
        let Some(cal) = self.calibration() else {
            return 0.0;
        };

        let Some(ut) = self.sample_u16(CMD_READ_TEMP, 5_000) else {
            return 0.0;
        };
        let Some(up) = self.sample_up() else {
            return 0.0;
        };

        // Temperature compensation (needed for the B5 intermediate).
        let x1 = (i32::from(ut) - i32::from(cal.ac6)) * i32::from(cal.ac5) >> 15;
        let x2 = (i32::from(cal.mc) << 11) / (x1 + i32::from(cal.md));
        let b5 = x1 + x2;

        // Pressure compensation.
        let b6 = b5 - 4000;
        let x1 = (i32::from(cal.b2) * ((b6 * b6) >> 12)) >> 11;
        let x2 = (i32::from(cal.ac2) * b6) >> 11;
        let x3 = x1 + x2;
        let b3 = (((i32::from(cal.ac1) * 4 + x3) << OSS) + 2) / 4;
        let x1 = (i32::from(cal.ac3) * b6) >> 13;
        let x2 = (i32::from(cal.b1) * ((b6 * b6) >> 12)) >> 16;
        let x3 = ((x1 + x2) + 2) >> 2;
        let b4 = (u32::from(cal.ac4) * ((x3 + 32768) as u32)) >> 15;
        let b7 = (up.wrapping_sub(b3 as u32)) * (50_000 >> OSS);
        let p = if b7 < 0x8000_0000 {
            (b7 * 2 / b4) as i32
        } else {
            (b7 / b4 * 2) as i32
        };
        let x1 = (p >> 8) * (p >> 8);
        let x1 = (x1 * 3038) >> 16;
        let x2 = (-7357 * p) >> 16;
        let p = p + ((x1 + x2 + 3791) >> 4);

        p as f32
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_pressure_pa(&mut self) -> f32 {
        let _ = self.addr;
        f32::from_bits(SIM_PRESSURE_PA_BITS.load(Ordering::Relaxed))
    }

    #[cfg(target_os = "espidf")]
    fn calibration(&mut self) -> Option<Calibration> {
        if self.cal.is_none() {
            let mut raw = [0u8; 22];
            if !hw_init::i2c_write_read(self.addr, &[REG_CALIB_START], &mut raw) {
                warn!("bmp085: calibration read failed");
                return None;
            }
            let be16 = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]);
            let ube16 = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
            self.cal = Some(Calibration {
                ac1: be16(0),
                ac2: be16(2),
                ac3: be16(4),
                ac4: ube16(6),
                ac5: ube16(8),
                ac6: ube16(10),
                b1: be16(12),
                b2: be16(14),
                // mb at offset 16 is unused by the compensation pipeline
                mc: be16(18),
                md: be16(20),
            });
        }
        self.cal
    }

    /// Trigger a conversion and read the 16-bit result.
    #[cfg(target_os = "espidf")]
    fn sample_u16(&self, command: u8, wait_us: u64) -> Option<u16> {
        if !hw_init::i2c_write(self.addr, &[REG_CONTROL, command]) {
            return None;
        }
        hw_init::delay_us(wait_us);
        let mut buf = [0u8; 2];
        hw_init::i2c_write_read(self.addr, &[REG_DATA], &mut buf)
            .then(|| u16::from_be_bytes(buf))
    }

    /// Uncompensated pressure: 19-bit value spread over three registers.
    #[cfg(target_os = "espidf")]
    fn sample_up(&self) -> Option<u32> {
        let command = CMD_READ_PRESSURE + (OSS << 6);
        if !hw_init::i2c_write(self.addr, &[REG_CONTROL, command]) {
            return None;
        }
        // Conversion time grows with oversampling: 4.5 ms at OSS 0,
        // doubling per step.
        hw_init::delay_us(4_500 + (3_000u64 << OSS));
        let mut buf = [0u8; 3];
        if !hw_init::i2c_write_read(self.addr, &[REG_DATA], &mut buf) {
            return None;
        }
        let raw = (u32::from(buf[0]) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]);
        Some(raw >> (8 - OSS))
    }
}
