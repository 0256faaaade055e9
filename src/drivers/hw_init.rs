//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channel, GPIO directions, the I²C master, and the
//! encoder interrupt using raw ESP-IDF sys calls. Called once from
//! `main()` before the control loop starts. Every other module reaches
//! the hardware through the small shim functions here, which compile to
//! no-ops (or simulation reads) on non-espidf targets.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    I2cInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::I2cInitFailed(rc) => write!(f, "I2C master init failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_i2c()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. `init_adc()` completes before the control
/// loop starts, so no concurrent access is possible.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    // pH probe channel, plus channel 0 left floating as an entropy source.
    for channel in [pins::PH_ADC_CHANNEL, ENTROPY_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH{}=pH)", pins::PH_ADC_CHANNEL);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

/// Floating ADC input used to seed the water-walk PRNG.
#[cfg(target_os = "espidf")]
const ENTROPY_ADC_CHANNEL: u32 = 0;

/// Boot-time PRNG seed: a floating ADC read folded with the timer.
#[cfg(target_os = "espidf")]
pub fn entropy_seed() -> u32 {
    let raw = u32::from(adc1_read(ENTROPY_ADC_CHANNEL));
    raw.wrapping_mul(0x9E37_79B9) ^ (time_us() as u32)
}

#[cfg(not(target_os = "espidf"))]
pub fn entropy_seed() -> u32 {
    1
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let input_pins = [pins::ENC_CLK_GPIO, pins::ENC_DT_GPIO, pins::ENC_SW_GPIO];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

/// Reconfigure a pin as a push-pull output (DHT start-signal phase).
#[cfg(target_os = "espidf")]
pub fn gpio_set_output(pin: i32) {
    // SAFETY: direction register write on a valid pin; main-loop only.
    unsafe {
        gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_output(_pin: i32) {}

/// Reconfigure a pin as an input with pull-up (DHT listen phase).
#[cfg(target_os = "espidf")]
pub fn gpio_set_input_pullup(pin: i32) {
    // SAFETY: direction/pull register writes on a valid pin; main-loop only.
    unsafe {
        gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
        gpio_set_pull_mode(pin, gpio_pull_mode_t_GPIO_PULLUP_ONLY);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_input_pullup(_pin: i32) {}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    // (pin, de-energized level) — polarity differs per relay module.
    let output_pins = [
        (pins::RELAY_PUMP_GPIO, true),
        (pins::RELAY_LIGHT_GPIO, true),
        (pins::RELAY_FAN_GPIO, false),
    ];

    for &(pin, idle_high) in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // All loads released before the control loop takes over.
        unsafe { gpio_set_level(pin, u32::from(idle_high)) };
    }

    info!("hw_init: relay outputs configured (all released)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── I²C master ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const I2C_PORT: i32 = 0;
#[cfg(target_os = "espidf")]
const I2C_TIMEOUT_TICKS: u32 = 100;

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<(), HwInitError> {
    let cfg = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: true,
        scl_pullup_en: true,
        __bindgen_anon_1: i2c_config_t__bindgen_ty_1 {
            master: i2c_config_t__bindgen_ty_1__bindgen_ty_1 {
                clk_speed: 100_000,
            },
        },
        ..Default::default()
    };
    // SAFETY: one-time driver install on port 0 before the control loop.
    let ret = unsafe { i2c_param_config(I2C_PORT, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }
    let ret = unsafe { i2c_driver_install(I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }
    info!("hw_init: I2C master on SDA={} SCL={}", pins::I2C_SDA_GPIO, pins::I2C_SCL_GPIO);
    Ok(())
}

/// Write `data` to a device. Returns `false` on any bus error.
#[cfg(target_os = "espidf")]
pub fn i2c_write(addr: u8, data: &[u8]) -> bool {
    // SAFETY: driver installed during init_i2c(); main-loop access only.
    let ret = unsafe {
        i2c_master_write_to_device(I2C_PORT, addr, data.as_ptr(), data.len(), I2C_TIMEOUT_TICKS)
    };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write(_addr: u8, _data: &[u8]) -> bool {
    false
}

/// Read `buf.len()` bytes from a device. Returns `false` on bus error.
#[cfg(target_os = "espidf")]
pub fn i2c_read(addr: u8, buf: &mut [u8]) -> bool {
    // SAFETY: driver installed during init_i2c(); main-loop access only.
    let ret = unsafe {
        i2c_master_read_from_device(I2C_PORT, addr, buf.as_mut_ptr(), buf.len(), I2C_TIMEOUT_TICKS)
    };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_read(_addr: u8, _buf: &mut [u8]) -> bool {
    false
}

/// Register-read: write `reg`, repeated-start, read into `buf`.
#[cfg(target_os = "espidf")]
pub fn i2c_write_read(addr: u8, reg: &[u8], buf: &mut [u8]) -> bool {
    // SAFETY: driver installed during init_i2c(); main-loop access only.
    let ret = unsafe {
        i2c_master_write_read_device(
            I2C_PORT,
            addr,
            reg.as_ptr(),
            reg.len(),
            buf.as_mut_ptr(),
            buf.len(),
            I2C_TIMEOUT_TICKS,
        )
    };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write_read(_addr: u8, _reg: &[u8], _buf: &mut [u8]) -> bool {
    false
}

// ── Timing ────────────────────────────────────────────────────

/// Microseconds since boot (monotonic).
#[cfg(target_os = "espidf")]
pub fn time_us() -> u64 {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    (unsafe { esp_timer_get_time() }) as u64
}

#[cfg(not(target_os = "espidf"))]
pub fn time_us() -> u64 {
    0
}

/// Busy-wait for `us` microseconds (bit-bang timing only).
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u64) {
    // SAFETY: esp_rom_delay_us busy-waits without touching shared state.
    unsafe { esp_rom_delay_us(us as u32) }
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u64) {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn encoder_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let clk = unsafe { gpio_get_level(pins::ENC_CLK_GPIO) } != 0;
    let dt = unsafe { gpio_get_level(pins::ENC_DT_GPIO) } != 0;
    crate::input::encoder::encoder_isr(clk, dt);
}

/// Install the GPIO ISR service and hook the encoder phase-A interrupt.
/// Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler registered
    // below only touches the encoder atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Seed the last-phase state with the current level so the first
        // real edge is counted with the correct direction.
        crate::input::encoder::seed_phase(gpio_get_level(pins::ENC_CLK_GPIO) != 0);

        gpio_set_intr_type(pins::ENC_CLK_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        gpio_isr_handler_add(
            pins::ENC_CLK_GPIO,
            Some(encoder_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::ENC_CLK_GPIO);

        info!("hw_init: ISR service installed (encoder phase A)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
