//! Menu state machine — screen identity, cursor positions, transitions.
//!
//! ```text
//!  WELCOME ──[splash dwell]──▶ MAIN MENU ◀──────────────┐
//!                               │ confirm                │
//!              ┌────────────────┼──────────────┐         │
//!              ▼                ▼              ▼         │
//!        sensor detail ×5   RELAY MENU ──▶ settings ×3   │
//!              │                │ (back item)  │         │
//!              └──── confirm / cancel ─────────┴─────────┘
//! ```
//!
//! Every state accepts every event; undefined combinations are no-ops.
//! Exactly one event is consumed per control tick and nothing is queued.

use crate::input::NavEvent;

/// Number of entries in the main menu.
pub const MAIN_MENU_LEN: u8 = 6;
/// Number of entries in the relay submenu (three actuators + back).
pub const RELAY_MENU_LEN: u8 = 4;

/// Main menu entries, in cursor order.
pub const MAIN_MENU_ITEMS: [&str; MAIN_MENU_LEN as usize] =
    ["DHT11", "DS18B20", "BH1750", "pH Sensor", "Pressure", "Relay"];
/// Relay submenu entries, in cursor order.
pub const RELAY_MENU_ITEMS: [&str; RELAY_MENU_LEN as usize] = ["Pump", "Light", "Fan", "Back"];

/// Closed set of controller screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    MainMenu,
    ClimateDetail,
    WaterTempDetail,
    LightDetail,
    PhDetail,
    PressureDetail,
    RelayMenu,
    PumpSettings,
    LightSettings,
    FanSettings,
}

/// Current UI position: the active screen plus both menu cursors.
///
/// Cursors are kept in range by construction — every mutation wraps
/// modulo the owning menu's item count.
#[derive(Debug, Clone, Copy)]
pub struct ScreenState {
    pub screen: Screen,
    pub main_cursor: u8,
    pub relay_cursor: u8,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            main_cursor: 0,
            relay_cursor: 0,
        }
    }
}

impl ScreenState {
    /// Leave the boot splash. Called exactly once, after the dwell delay.
    pub fn leave_splash(&mut self) {
        self.screen = Screen::MainMenu;
    }

    /// Consume one navigation event. Returns `true` if the visible state
    /// changed (screen or cursor), which forces a display refresh.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        match event {
            NavEvent::StepUp => self.rotate(-1),
            NavEvent::StepDown => self.rotate(1),
            NavEvent::Confirm => self.confirm(),
            NavEvent::Cancel => self.cancel(),
        }
    }

    fn rotate(&mut self, dir: i8) -> bool {
        match self.screen {
            Screen::MainMenu => {
                self.main_cursor = wrap(self.main_cursor, dir, MAIN_MENU_LEN);
                true
            }
            Screen::RelayMenu => {
                self.relay_cursor = wrap(self.relay_cursor, dir, RELAY_MENU_LEN);
                true
            }
            _ => false,
        }
    }

    fn confirm(&mut self) -> bool {
        let next = match self.screen {
            Screen::MainMenu => match self.main_cursor % MAIN_MENU_LEN {
                0 => Screen::ClimateDetail,
                1 => Screen::WaterTempDetail,
                2 => Screen::LightDetail,
                3 => Screen::PhDetail,
                4 => Screen::PressureDetail,
                _ => Screen::RelayMenu,
            },
            Screen::RelayMenu => match self.relay_cursor % RELAY_MENU_LEN {
                0 => Screen::PumpSettings,
                1 => Screen::LightSettings,
                2 => Screen::FanSettings,
                _ => Screen::MainMenu,
            },
            // Any leaf screen: confirm backs out to the main menu.
            _ => Screen::MainMenu,
        };
        let changed = next != self.screen;
        self.screen = next;
        changed
    }

    fn cancel(&mut self) -> bool {
        if self.screen == Screen::MainMenu {
            return false;
        }
        self.screen = Screen::MainMenu;
        true
    }
}

fn wrap(cursor: u8, dir: i8, len: u8) -> u8 {
    let len = i16::from(len);
    let next = (i16::from(cursor) + i16::from(dir) + len) % len;
    next as u8
}
