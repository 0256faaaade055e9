//! Relay subsystem — actuator state, manual commands, and the pump
//! duty-cycle automation.
//!
//! `RelayBank` is the single owner of actuator truth. It is mutated from
//! three directions — operator-facing manual commands, inbound telemetry
//! commands, and the automation engine — and read by the display renderer
//! and the telemetry publisher. The automation engine re-evaluates every
//! control tick with no memory beyond its last toggle instant, so
//! last-write-wins between command sources is acceptable.

pub mod automation;

use crate::config::SystemConfig;
use automation::DutyCycle;

/// The three switched loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayId {
    Pump,
    Light,
    Fan,
}

/// A state mutation requested by an external actor (menu, telemetry).
///
/// `Pump`/`Fan` are *manual* drive requests and implicitly drop the
/// actuator out of automatic mode; `PumpAuto`/`FanAuto` toggle the mode
/// flag without touching the energized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    Pump(bool),
    Light(bool),
    Fan(bool),
    PumpAuto(bool),
    FanAuto(bool),
}

/// Energized/auto flags for every actuator.
///
/// `energized` is the logical state; the physical line level is resolved
/// per-relay by [`crate::drivers::relay::RelayLine`] polarity data.
#[derive(Debug, Clone, Copy)]
pub struct RelayStates {
    pub pump_on: bool,
    pub pump_auto: bool,
    pub light_on: bool,
    pub fan_on: bool,
    /// Tracked and reported, but no fan schedule exists yet.
    pub fan_auto: bool,
}

impl Default for RelayStates {
    fn default() -> Self {
        Self {
            pump_on: false,
            pump_auto: true,
            light_on: false,
            fan_on: false,
            fan_auto: true,
        }
    }
}

/// Actuator state plus the pump automation timer.
pub struct RelayBank {
    pub states: RelayStates,
    duty: DutyCycle,
}

impl RelayBank {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            states: RelayStates::default(),
            duty: DutyCycle::new(
                u64::from(config.pump_on_secs) * 1000,
                u64::from(config.pump_off_secs) * 1000,
            ),
        }
    }

    /// Apply one command. Returns the relay whose state changed, if any
    /// (used for event emission; a command restating the current state
    /// reports no change).
    pub fn apply(&mut self, command: RelayCommand, now_ms: u64) -> Option<RelayId> {
        let s = &mut self.states;
        match command {
            RelayCommand::Pump(on) => {
                let changed = s.pump_on != on || s.pump_auto;
                s.pump_auto = false;
                s.pump_on = on;
                changed.then_some(RelayId::Pump)
            }
            RelayCommand::Light(on) => {
                let changed = s.light_on != on;
                s.light_on = on;
                changed.then_some(RelayId::Light)
            }
            RelayCommand::Fan(on) => {
                let changed = s.fan_on != on || s.fan_auto;
                s.fan_auto = false;
                s.fan_on = on;
                changed.then_some(RelayId::Fan)
            }
            RelayCommand::PumpAuto(enable) => {
                let changed = s.pump_auto != enable;
                s.pump_auto = enable;
                if enable {
                    // A fresh window starts now; the current energized
                    // state is kept as the window's phase.
                    self.duty.arm(now_ms);
                }
                changed.then_some(RelayId::Pump)
            }
            RelayCommand::FanAuto(enable) => {
                let changed = s.fan_auto != enable;
                s.fan_auto = enable;
                changed.then_some(RelayId::Fan)
            }
        }
    }

    /// Automation pass — one call per control tick. Returns `true` if
    /// the duty cycle toggled the pump.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.states.pump_auto {
            return false;
        }
        match self.duty.evaluate(now_ms, self.states.pump_on) {
            Some(next) => {
                self.states.pump_on = next;
                true
            }
            None => false,
        }
    }
}
