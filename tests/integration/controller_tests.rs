//! Full-controller integration tests: boot, navigation, sampling,
//! rendering, and telemetry against mock adapters.

use growpod::app::service::Controller;
use growpod::config::SystemConfig;
use growpod::input::NavEvent;
use growpod::menu::Screen;
use growpod::relays::{RelayCommand, RelayId};

use crate::mock_hw::{MockHardware, MockPanel, MockTelemetry, RecordingSink};

struct Rig {
    controller: Controller,
    hw: MockHardware,
    panel: MockPanel,
    telemetry: MockTelemetry,
    sink: RecordingSink,
    config: SystemConfig,
}

impl Rig {
    fn new() -> Self {
        let config = SystemConfig::default();
        Self {
            controller: Controller::new(&config, 42),
            hw: MockHardware::new(),
            panel: MockPanel::new(),
            telemetry: MockTelemetry::new(0),
            sink: RecordingSink::new(),
            config,
        }
    }

    /// Boot through the splash into the main menu.
    fn booted() -> Self {
        let mut rig = Self::new();
        rig.controller
            .start(&mut rig.hw, &mut rig.panel, &mut rig.sink);
        rig.controller.finish_splash(&mut rig.sink);
        rig
    }

    fn nav(&mut self, event: NavEvent) {
        self.controller.handle_nav(event, &mut self.sink);
    }

    fn tick(&mut self, now_ms: u64) {
        self.controller.tick(
            now_ms,
            &mut self.hw,
            &mut self.panel,
            &mut self.telemetry,
            &mut self.sink,
        );
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn start_renders_the_splash() {
    let mut rig = Rig::new();
    rig.controller
        .start(&mut rig.hw, &mut rig.panel, &mut rig.sink);
    assert_eq!(rig.controller.screen(), Screen::Welcome);
    assert!(rig.panel.row(1).contains("WELCOME TO"));
    assert!(rig.panel.row(2).contains("HYDROPONIC"));
}

#[test]
fn start_releases_all_relays() {
    let mut rig = Rig::new();
    rig.controller
        .start(&mut rig.hw, &mut rig.panel, &mut rig.sink);
    assert_eq!(rig.hw.relay_state(RelayId::Pump), Some(false));
    assert_eq!(rig.hw.relay_state(RelayId::Light), Some(false));
    assert_eq!(rig.hw.relay_state(RelayId::Fan), Some(false));
}

#[test]
fn splash_exits_into_main_menu_once() {
    let mut rig = Rig::booted();
    assert_eq!(rig.controller.screen(), Screen::MainMenu);
    rig.tick(0);
    assert!(rig.panel.row(0).contains("MAIN MENU"));
}

// ── Navigation + rendering ────────────────────────────────────

#[test]
fn navigate_to_pressure_detail() {
    let mut rig = Rig::booted();
    for _ in 0..4 {
        rig.nav(NavEvent::StepDown);
    }
    rig.nav(NavEvent::Confirm);
    assert_eq!(rig.controller.screen(), Screen::PressureDetail);

    rig.tick(0);
    assert!(rig.panel.row(0).contains("=== PRESSURE ==="));
    // 101320 Pa sampled on the first tick -> 1013.2 hPa.
    assert!(rig.panel.row(2).contains("1013.2 hPa"));
    assert!(rig.panel.row(3).contains(">Back"));
}

#[test]
fn step_up_from_cursor_zero_selects_last_item() {
    let mut rig = Rig::booted();
    rig.nav(NavEvent::StepUp);
    rig.nav(NavEvent::Confirm);
    assert_eq!(rig.controller.screen(), Screen::RelayMenu);
}

#[test]
fn nav_event_forces_redraw_inside_throttle_window() {
    let mut rig = Rig::booted();
    rig.tick(0);
    let frames = rig.panel.frames;

    // Within the 1 s throttle nothing redraws on its own...
    rig.tick(200);
    assert_eq!(rig.panel.frames, frames);

    // ...but an input event does.
    rig.nav(NavEvent::StepDown);
    rig.tick(210);
    assert_eq!(rig.panel.frames, frames + 1);
}

#[test]
fn idle_detail_screen_refreshes_at_interval() {
    let mut rig = Rig::booted();
    rig.nav(NavEvent::Confirm); // climate detail
    rig.tick(0);
    let frames = rig.panel.frames;
    rig.tick(rig.config.display_interval_ms);
    assert_eq!(rig.panel.frames, frames + 1);
}

// ── Sampling ──────────────────────────────────────────────────

#[test]
fn climate_failure_keeps_last_snapshot_values() {
    let mut rig = Rig::booted();
    rig.tick(0);
    assert_eq!(rig.controller.snapshot().air_temp_c, 24.0);

    rig.hw.temp = None;
    rig.hw.humidity = None;
    rig.tick(rig.config.sensor_interval_ms);
    assert_eq!(rig.controller.snapshot().air_temp_c, 24.0);
    assert_eq!(rig.controller.snapshot().humidity_pct, 55.0);
}

#[test]
fn ph_is_rescaled_from_raw_counts() {
    let mut rig = Rig::booted();
    rig.hw.ph_raw = 4095;
    rig.tick(0);
    assert_eq!(rig.controller.snapshot().ph, 14.0);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn no_subscribers_means_no_records() {
    let mut rig = Rig::booted();
    for i in 0..10 {
        rig.tick(i * rig.config.telemetry_interval_ms);
    }
    assert!(rig.telemetry.published.is_empty());
}

#[test]
fn published_record_scales_the_live_snapshot() {
    let mut rig = Rig::booted();
    rig.telemetry.subscribers = 1;
    rig.tick(0);

    let record = rig.telemetry.published.last().expect("one record");
    let snap = rig.controller.snapshot();
    assert_eq!(record.ds18b20, (snap.water_temp_c * 100.0).round() as i32);
    assert_eq!(record.bmp_temp, 240);
    assert_eq!(record.dht_humidity, 550);
    assert_eq!(record.pressure, 10132);
    assert_eq!(record.motor_auto, 1);
}

#[test]
fn detached_subscriber_stops_the_stream() {
    let mut rig = Rig::booted();
    rig.telemetry.subscribers = 1;
    rig.tick(0);
    assert_eq!(rig.telemetry.published.len(), 1);

    rig.telemetry.subscribers = 0;
    rig.tick(rig.config.telemetry_interval_ms);
    assert_eq!(rig.telemetry.published.len(), 1);
}

// ── Automation ────────────────────────────────────────────────

#[test]
fn pump_duty_cycle_runs_from_boot() {
    let mut rig = Rig::booted();
    let off_ms = u64::from(rig.config.pump_off_secs) * 1000;
    let on_ms = u64::from(rig.config.pump_on_secs) * 1000;

    rig.tick(off_ms - 1);
    assert!(!rig.controller.relay_states().pump_on);

    rig.tick(off_ms);
    assert!(rig.controller.relay_states().pump_on);
    assert_eq!(rig.hw.relay_state(RelayId::Pump), Some(true));

    rig.tick(off_ms + on_ms);
    assert!(!rig.controller.relay_states().pump_on);
    assert_eq!(rig.hw.relay_state(RelayId::Pump), Some(false));
}

#[test]
fn manual_command_halts_automation() {
    let mut rig = Rig::booted();
    rig.controller
        .apply_command(RelayCommand::Pump(true), 0, &mut rig.hw, &mut rig.sink);
    assert!(!rig.controller.relay_states().pump_auto);

    // Hours later, the engine must not touch the pump.
    rig.tick(10 * 60 * 60 * 1000);
    assert!(rig.controller.relay_states().pump_on);
}

#[test]
fn settings_screen_tracks_automation_toggle() {
    let mut rig = Rig::booted();
    let off_ms = u64::from(rig.config.pump_off_secs) * 1000;

    // Enter pump settings: main cursor 5 -> relay menu -> cursor 0.
    rig.nav(NavEvent::StepUp);
    rig.nav(NavEvent::Confirm);
    rig.nav(NavEvent::Confirm);
    assert_eq!(rig.controller.screen(), Screen::PumpSettings);

    // The renderer runs before the automation engine in the tick order,
    // so the toggle shows up on the next refresh.
    rig.tick(off_ms);
    assert!(rig.controller.relay_states().pump_on);
    rig.tick(off_ms + rig.config.display_interval_ms);
    assert!(rig.panel.row(1).contains("State: ON"));
    assert!(rig.panel.row(2).contains("Auto: ON"));
}
