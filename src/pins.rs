//! GPIO / peripheral pin assignments for the GrowPod main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Rotary encoder (quadrature, with integrated push-button)
// ---------------------------------------------------------------------------

/// Encoder phase A ("CLK"). Configured as a CHANGE-edge interrupt source.
pub const ENC_CLK_GPIO: i32 = 33;
/// Encoder phase B ("DT"). Sampled inside the phase-A ISR.
pub const ENC_DT_GPIO: i32 = 25;
/// Encoder shaft push-button. Active-low with internal pull-up.
pub const ENC_SW_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Relay board
// ---------------------------------------------------------------------------

/// Water pump relay. The relay board input is active-low.
pub const RELAY_PUMP_GPIO: i32 = 23;
/// Grow light relay. Active-low, same board as the pump.
pub const RELAY_LIGHT_GPIO: i32 = 18;
/// Ventilation fan relay. Separate single-channel module, active-high.
pub const RELAY_FAN_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 air temperature / humidity, single-wire protocol.
pub const DHT_GPIO: i32 = 4;

/// Analog pH probe amplifier output — ADC1 channel 6 (GPIO 34, input-only).
pub const PH_ADC_GPIO: i32 = 34;
/// ADC1 channel number for the pH probe on the ESP32 (GPIO 34 = CH6).
pub const PH_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// I²C bus (character LCD backpack, BH1750, BMP085)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

/// PCF8574 backpack address of the 20x4 character LCD.
pub const LCD_I2C_ADDR: u8 = 0x27;
/// BH1750 illuminance sensor address (ADDR pin low).
pub const BH1750_I2C_ADDR: u8 = 0x23;
/// BMP085 barometric sensor address (fixed).
pub const BMP085_I2C_ADDR: u8 = 0x77;
