//! Mock hardware adapters for integration tests.
//!
//! Records every relay drive and rendered frame so tests can assert on
//! the full command history without touching real GPIO or the I²C bus.

use growpod::app::events::AppEvent;
use growpod::app::ports::{DisplayPort, EventSink, RelayPort, SensorPort, TelemetrySink};
use growpod::relays::RelayId;
use growpod::telemetry::TelemetryRecord;

// ── MockHardware (sensors + relays) ───────────────────────────

pub struct MockHardware {
    pub temp: Option<f32>,
    pub humidity: Option<f32>,
    pub lux: f32,
    pub ph_raw: u16,
    pub pressure_pa: f32,
    /// Every `drive` call in order.
    pub relay_calls: Vec<(RelayId, bool)>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            temp: Some(24.0),
            humidity: Some(55.0),
            lux: 120.0,
            ph_raw: 2048,
            pressure_pa: 101_320.0,
            relay_calls: Vec::new(),
        }
    }

    /// Last commanded logical state for one relay.
    pub fn relay_state(&self, relay: RelayId) -> Option<bool> {
        self.relay_calls
            .iter()
            .rev()
            .find_map(|&(r, on)| (r == relay).then_some(on))
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_air_temperature(&mut self) -> Option<f32> {
        self.temp
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.humidity
    }

    fn read_lux(&mut self) -> f32 {
        self.lux
    }

    fn read_ph_raw(&mut self) -> u16 {
        self.ph_raw
    }

    fn read_pressure_pa(&mut self) -> f32 {
        self.pressure_pa
    }
}

impl RelayPort for MockHardware {
    fn drive(&mut self, relay: RelayId, energized: bool) {
        self.relay_calls.push((relay, energized));
    }
}

// ── MockPanel (20×4 character display) ────────────────────────

pub struct MockPanel {
    pub rows: [String; 4],
    cursor: (u8, u8),
    /// Frames drawn (clear count).
    pub frames: u32,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self {
            rows: core::array::from_fn(|_| " ".repeat(20)),
            cursor: (0, 0),
            frames: 0,
        }
    }

    pub fn row(&self, row: u8) -> &str {
        &self.rows[row as usize]
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockPanel {
    fn clear(&mut self) {
        self.frames += 1;
        for row in &mut self.rows {
            *row = " ".repeat(20);
        }
        self.cursor = (0, 0);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor = (col, row);
    }

    fn write_text(&mut self, text: &str) {
        let (col, row) = self.cursor;
        let mut chars: Vec<char> = self.rows[row as usize].chars().collect();
        for (i, ch) in text.chars().enumerate() {
            let pos = col as usize + i;
            if pos < chars.len() {
                chars[pos] = ch;
            }
        }
        self.rows[row as usize] = chars.into_iter().collect();
        self.cursor = (col + text.len() as u8, row);
    }
}

// ── MockTelemetry ─────────────────────────────────────────────

pub struct MockTelemetry {
    pub subscribers: usize,
    pub published: Vec<TelemetryRecord>,
}

#[allow(dead_code)]
impl MockTelemetry {
    pub fn new(subscribers: usize) -> Self {
        Self {
            subscribers,
            published: Vec::new(),
        }
    }
}

impl TelemetrySink for MockTelemetry {
    fn subscriber_count(&self) -> usize {
        self.subscribers
    }

    fn publish(&mut self, record: &TelemetryRecord) {
        self.published.push(*record);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
