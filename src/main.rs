//! GrowPod Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter     LcdAdapter      HttpTelemetrySink       │
//! │  (Sensor+Relay)      (DisplayPort)   (TelemetrySink)         │
//! │  LogEventSink        Esp32TimeAdapter                        │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            Controller (pure logic)                 │      │
//! │  │  Menu FSM · Sampler · Renderer · Relay automation  │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  InputDebouncer (encoder ISR + button poll) · mpsc mailbox   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The only interrupt source is the encoder phase-edge callback; the
//! only blocking delay is the boot splash dwell. Telemetry commands
//! arrive on HTTP worker threads and are serialized into the loop
//! through the command mailbox.
#![deny(unused_must_use)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use growpod::adapters::hardware::HardwareAdapter;
use growpod::adapters::http::{self, HttpTelemetrySink, TelemetryChannel};
use growpod::adapters::lcd::LcdAdapter;
use growpod::adapters::log_sink::LogEventSink;
use growpod::adapters::time::Esp32TimeAdapter;
use growpod::app::service::Controller;
use growpod::config::SystemConfig;
use growpod::drivers::hw_init;
use growpod::input::InputDebouncer;
use growpod::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  GrowPod v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        log::error!("ISR install failed: {} — encoder disabled", e);
    }

    let config = SystemConfig::default();
    let time = Esp32TimeAdapter::new();

    // ── 3. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut lcd = LcdAdapter::new(pins::LCD_I2C_ADDR);
    let mut events = LogEventSink::new();

    let channel = TelemetryChannel::new();
    let mut telemetry = HttpTelemetrySink::new(channel.clone());
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let _server = match http::start_server(channel, cmd_tx) {
        Ok(server) => Some(server),
        Err(e) => {
            warn!("http: server failed to start ({}), running offline", e);
            None
        }
    };

    // ── 4. Controller + splash ────────────────────────────────
    let mut controller = Controller::new(&config, hw_init::entropy_seed());
    let mut debouncer = InputDebouncer::new(config.detent_ticks, config.long_press_ms);

    controller.start(&mut hw, &mut lcd, &mut events);
    // The one intentional blocking delay in the system.
    thread::sleep(Duration::from_millis(config.splash_dwell_ms));
    controller.finish_splash(&mut events);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let now_ms = time.uptime_ms();

        // Input debounce → menu state machine (switch is active-low).
        let sw_active = !hw_init::gpio_read(pins::ENC_SW_GPIO);
        if let Some(event) = debouncer.poll(now_ms, sw_active) {
            controller.handle_nav(event, &mut events);
        }

        // Sampler → renderer → telemetry → automation.
        controller.tick(now_ms, &mut hw, &mut lcd, &mut telemetry, &mut events);

        // Drain the command mailbox from the HTTP workers.
        while let Ok(cmd) = cmd_rx.try_recv() {
            controller.apply_command(cmd, now_ms, &mut hw, &mut events);
        }

        thread::sleep(Duration::from_millis(config.control_loop_interval_ms));
    }
}
