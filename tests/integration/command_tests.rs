//! Inbound command path: query decoding through shared-state mutation,
//! as the HTTP adapter drives it.

use growpod::adapters::http::command_from_query;
use growpod::app::service::Controller;
use growpod::config::SystemConfig;
use growpod::relays::{RelayCommand, RelayId};

use crate::mock_hw::{MockHardware, MockPanel, MockTelemetry, RecordingSink};

fn controller() -> (Controller, MockHardware, RecordingSink) {
    let config = SystemConfig::default();
    let mut controller = Controller::new(&config, 9);
    let mut hw = MockHardware::new();
    let mut panel = MockPanel::new();
    let mut sink = RecordingSink::new();
    controller.start(&mut hw, &mut panel, &mut sink);
    controller.finish_splash(&mut sink);
    (controller, hw, sink)
}

#[test]
fn motor_command_round_trips_to_the_relay_line() {
    let (mut controller, mut hw, mut sink) = controller();
    let cmd = command_from_query("device=motor&state=1").expect("decodes");
    controller.apply_command(cmd, 0, &mut hw, &mut sink);

    assert!(controller.relay_states().pump_on);
    assert!(!controller.relay_states().pump_auto);
    assert_eq!(hw.relay_state(RelayId::Pump), Some(true));
}

#[test]
fn motor_auto_off_preserves_energized_state() {
    let (mut controller, mut hw, mut sink) = controller();
    controller.apply_command(RelayCommand::Pump(true), 0, &mut hw, &mut sink);
    controller.apply_command(RelayCommand::PumpAuto(true), 0, &mut hw, &mut sink);

    let cmd = command_from_query("device=motorAuto&state=0").expect("decodes");
    controller.apply_command(cmd, 1000, &mut hw, &mut sink);

    assert!(controller.relay_states().pump_on, "energized untouched");
    assert!(!controller.relay_states().pump_auto);
}

#[test]
fn light_and_fan_commands_drive_their_own_lines() {
    let (mut controller, mut hw, mut sink) = controller();
    controller.apply_command(RelayCommand::Light(true), 0, &mut hw, &mut sink);
    controller.apply_command(RelayCommand::Fan(true), 0, &mut hw, &mut sink);

    assert_eq!(hw.relay_state(RelayId::Light), Some(true));
    assert_eq!(hw.relay_state(RelayId::Fan), Some(true));
    // Fan manual drive dropped it out of automatic mode.
    assert!(!controller.relay_states().fan_auto);
}

#[test]
fn unknown_devices_decode_to_nothing() {
    // The endpoint still acknowledges these; nothing reaches the
    // controller at all.
    assert!(command_from_query("device=heater&state=1").is_none());
    assert!(command_from_query("device=&state=1").is_none());
    assert!(command_from_query("state=1").is_none());
}

#[test]
fn command_changes_appear_in_the_next_record() {
    let (mut controller, mut hw, mut sink) = controller();
    let mut panel = MockPanel::new();
    let mut telemetry = MockTelemetry::new(1);

    controller.tick(0, &mut hw, &mut panel, &mut telemetry, &mut sink);
    assert_eq!(telemetry.published.last().unwrap().light, 0);

    controller.apply_command(RelayCommand::Light(true), 10, &mut hw, &mut sink);
    controller.tick(2000, &mut hw, &mut panel, &mut telemetry, &mut sink);
    let record = telemetry.published.last().unwrap();
    assert_eq!(record.light, 1);
    assert_eq!(record.fan_auto, 1, "fan auto untouched by light command");
}

#[test]
fn reenabling_auto_restarts_the_pump_schedule() {
    let (mut controller, mut hw, mut sink) = controller();
    let mut panel = MockPanel::new();
    let mut telemetry = MockTelemetry::new(0);
    let config = SystemConfig::default();
    let off_ms = u64::from(config.pump_off_secs) * 1000;

    controller.apply_command(RelayCommand::Pump(false), 0, &mut hw, &mut sink);
    let t_rearm = off_ms + 123_456;
    controller.apply_command(RelayCommand::PumpAuto(true), t_rearm, &mut hw, &mut sink);

    // One tick short of the fresh window: still off.
    controller.tick(t_rearm + off_ms - 1, &mut hw, &mut panel, &mut telemetry, &mut sink);
    assert!(!controller.relay_states().pump_on);

    controller.tick(t_rearm + off_ms, &mut hw, &mut panel, &mut telemetry, &mut sink);
    assert!(controller.relay_states().pump_on);
}
