//! Display renderer — projects (screen, snapshot, relay state) onto the
//! 20×4 character LCD.
//!
//! Throttled and change-driven: a frame is drawn only when the screen
//! identity changed, a refresh was forced by an input event, or the
//! minimum refresh interval elapsed (live values on detail screens keep
//! ticking at 1 Hz). List menus render a three-line sliding window —
//! previous / selected / next — with a `>` marker on the selected line.

use core::fmt::Write as _;

use crate::app::ports::DisplayPort;
use crate::config::SystemConfig;
use crate::menu::{
    Screen, ScreenState, MAIN_MENU_ITEMS, MAIN_MENU_LEN, RELAY_MENU_ITEMS, RELAY_MENU_LEN,
};
use crate::relays::RelayStates;
use crate::sensors::EnvironmentSnapshot;

/// Character columns on the panel.
pub const COLS: u8 = 20;
/// Character rows on the panel.
pub const ROWS: u8 = 4;

/// One formatted LCD line.
type Line = heapless::String<{ COLS as usize }>;

pub struct Renderer {
    interval_ms: u64,
    last_render_ms: u64,
    previous_screen: Option<Screen>,
    force: bool,
}

impl Renderer {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            interval_ms: config.display_interval_ms,
            last_render_ms: 0,
            previous_screen: None,
            force: true,
        }
    }

    /// Request a redraw on the next tick regardless of the throttle.
    /// Called for every state-affecting input event.
    pub fn force_refresh(&mut self) {
        self.force = true;
    }

    /// Draw a frame if one is due. Returns `true` when the panel was
    /// rewritten.
    pub fn tick(
        &mut self,
        now_ms: u64,
        ui: &ScreenState,
        env: &EnvironmentSnapshot,
        relays: &RelayStates,
        out: &mut impl DisplayPort,
    ) -> bool {
        let screen_changed = self.previous_screen != Some(ui.screen);
        let interval_elapsed = now_ms.saturating_sub(self.last_render_ms) >= self.interval_ms;
        if !screen_changed && !self.force && !interval_elapsed {
            return false;
        }

        out.clear();
        self.last_render_ms = now_ms;
        self.previous_screen = Some(ui.screen);
        self.force = false;

        match ui.screen {
            Screen::Welcome => {
                write_at(out, 3, 1, "WELCOME TO");
                write_at(out, 3, 2, "HYDROPONIC");
            }
            Screen::MainMenu => {
                write_at(out, 0, 0, "==== MAIN MENU ====");
                draw_menu_window(out, &MAIN_MENU_ITEMS, ui.main_cursor, MAIN_MENU_LEN);
            }
            Screen::RelayMenu => {
                write_at(out, 0, 0, "==== RELAY MENU ====");
                draw_menu_window(out, &RELAY_MENU_ITEMS, ui.relay_cursor, RELAY_MENU_LEN);
            }
            Screen::ClimateDetail => {
                write_at(out, 0, 0, "===== DHT11 =====");
                let mut line = Line::new();
                let _ = write!(line, "Temp: {:.1} C", env.air_temp_c);
                write_at(out, 0, 1, &line);
                line.clear();
                let _ = write!(line, "RH: {:.1} %", env.humidity_pct);
                write_at(out, 0, 2, &line);
                write_at(out, 0, 3, ">Back");
            }
            Screen::WaterTempDetail => {
                write_at(out, 0, 0, "==== DS18B20 ====");
                let mut line = Line::new();
                let _ = write!(line, "{:.2} C", env.water_temp_c);
                write_at(out, 0, 2, &line);
                write_at(out, 0, 3, ">Back");
            }
            Screen::LightDetail => {
                write_at(out, 0, 0, "==== BH1750 ====");
                let mut line = Line::new();
                let _ = write!(line, "{:.0} lx", env.lux);
                write_at(out, 0, 2, &line);
                write_at(out, 0, 3, ">Back");
            }
            Screen::PhDetail => {
                write_at(out, 0, 0, "====== pH ======");
                let mut line = Line::new();
                let _ = write!(line, "pH: {:.2}", env.ph);
                write_at(out, 0, 2, &line);
                write_at(out, 0, 3, ">Back");
            }
            Screen::PressureDetail => {
                write_at(out, 0, 0, "=== PRESSURE ===");
                let mut line = Line::new();
                let _ = write!(line, "{:.1} hPa", env.pressure_hpa);
                write_at(out, 0, 2, &line);
                write_at(out, 0, 3, ">Back");
            }
            Screen::PumpSettings => {
                write_at(out, 0, 0, "===== PUMP =====");
                draw_state_line(out, 1, relays.pump_on);
                draw_auto_line(out, 2, relays.pump_auto);
                write_at(out, 0, 3, ">Back");
            }
            Screen::LightSettings => {
                write_at(out, 0, 0, "===== LIGHT =====");
                draw_state_line(out, 1, relays.light_on);
                write_at(out, 0, 3, ">Back");
            }
            Screen::FanSettings => {
                write_at(out, 0, 0, "====== FAN ======");
                draw_state_line(out, 1, relays.fan_on);
                draw_auto_line(out, 2, relays.fan_auto);
                write_at(out, 0, 3, ">Back");
            }
        }

        true
    }
}

fn write_at(out: &mut impl DisplayPort, col: u8, row: u8, text: &str) {
    out.set_cursor(col, row);
    out.write_text(text);
}

/// Three-line window: previous / selected / next, wrapping modulo the
/// item count, selector on the middle line.
fn draw_menu_window(out: &mut impl DisplayPort, items: &[&str], cursor: u8, len: u8) {
    for i in 0..3u8 {
        let idx = (i16::from(cursor) + i16::from(i) - 1 + i16::from(len)) % i16::from(len);
        let mut line = Line::new();
        let _ = write!(
            line,
            "{}{}",
            if i == 1 { ">" } else { " " },
            items[idx as usize]
        );
        write_at(out, 0, i + 1, &line);
    }
}

fn draw_state_line(out: &mut impl DisplayPort, row: u8, on: bool) {
    let mut line = Line::new();
    let _ = write!(line, "State: {}", if on { "ON" } else { "OFF" });
    write_at(out, 0, row, &line);
}

fn draw_auto_line(out: &mut impl DisplayPort, row: u8, auto: bool) {
    let mut line = Line::new();
    let _ = write!(line, "Auto: {}", if auto { "ON" } else { "OFF" });
    write_at(out, 0, row, &line);
}
