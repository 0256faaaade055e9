//! HTTP adapter — server-push telemetry channel and command endpoint.
//!
//! Two routes on the embedded HTTP server:
//!
//! - `GET /events` — a long-lived SSE stream. Each published record goes
//!   out as a named `telemetry` event. The handler thread parks on the
//!   shared [`TelemetryChannel`] and only ever *reads* controller state,
//!   so it needs no lock against the control loop.
//! - `POST /command?device=motor&state=1` — actuator commands. Decoded
//!   commands are forwarded to the control loop through an `mpsc`
//!   mailbox; the endpoint acknowledges unconditionally, unknown device
//!   names included.
//!
//! The subscriber count lives in an atomic that the publisher's gate
//! reads each tick — with nobody connected, nothing is serialized.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::app::ports::TelemetrySink;
use crate::relays::RelayCommand;
use crate::telemetry::{self, TelemetryRecord};

/// State shared between the control loop (writer) and SSE handler
/// threads (readers).
pub struct TelemetryChannel {
    latest: Mutex<Option<String>>,
    seq: AtomicU64,
    subscribers: AtomicUsize,
}

impl TelemetryChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            latest: Mutex::new(None),
            seq: AtomicU64::new(0),
            subscribers: AtomicUsize::new(0),
        })
    }
}

/// The control-loop side of the channel.
pub struct HttpTelemetrySink {
    channel: Arc<TelemetryChannel>,
}

impl HttpTelemetrySink {
    pub fn new(channel: Arc<TelemetryChannel>) -> Self {
        Self { channel }
    }
}

impl TelemetrySink for HttpTelemetrySink {
    fn subscriber_count(&self) -> usize {
        self.channel.subscribers.load(Ordering::Acquire)
    }

    fn publish(&mut self, record: &TelemetryRecord) {
        match serde_json::to_string(record) {
            Ok(json) => {
                *self.channel.latest.lock().unwrap() = Some(json);
                self.channel.seq.fetch_add(1, Ordering::Release);
            }
            Err(e) => log::warn!("telemetry: serialize failed ({})", e),
        }
    }
}

/// RAII subscriber registration for a push connection. Attach one for
/// the lifetime of a streaming response; the publisher's gate sees the
/// count move.
pub struct SubscriberGuard {
    channel: Arc<TelemetryChannel>,
}

impl SubscriberGuard {
    pub fn attach(channel: &Arc<TelemetryChannel>) -> Self {
        channel.subscribers.fetch_add(1, Ordering::AcqRel);
        Self {
            channel: channel.clone(),
        }
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.channel.subscribers.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Extract the query portion of a request URI.
pub fn query_of(uri: &str) -> &str {
    uri.split_once('?').map_or("", |(_, query)| query)
}

/// Decode `device=...&state=...` into a relay command. `None` for
/// anything unrecognized — the endpoint acknowledges regardless.
pub fn command_from_query(query: &str) -> Option<RelayCommand> {
    let mut device = None;
    let mut state = None;
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("device", v)) => device = Some(v),
            Some(("state", v)) => state = Some(v),
            _ => {}
        }
    }
    telemetry::parse_command(device?, state?)
}

#[cfg(target_os = "espidf")]
pub use espidf::start_server;

#[cfg(target_os = "espidf")]
mod espidf {
    use super::*;

    use std::sync::mpsc::Sender;
    use std::thread;
    use std::time::Duration;

    use anyhow::Result;
    use esp_idf_svc::http::server::{Configuration, EspHttpServer};
    use esp_idf_svc::http::Method;
    use esp_idf_svc::io::Write;
    use log::info;

    /// How often a parked SSE handler re-checks for a fresh record.
    const SSE_POLL: Duration = Duration::from_millis(200);
    /// Idle polls between keepalive comments (disconnect detection).
    const KEEPALIVE_POLLS: u32 = 50;

    /// Bring up the HTTP server with both routes attached.
    pub fn start_server(
        channel: Arc<TelemetryChannel>,
        commands: Sender<RelayCommand>,
    ) -> Result<EspHttpServer<'static>> {
        let cfg = Configuration {
            stack_size: 8 * 1024,
            ..Default::default()
        };
        let mut server = EspHttpServer::new(&cfg)?;

        // --- GET /events : SSE telemetry push ---
        {
            let channel = channel.clone();
            server.fn_handler("/events", Method::Get, move |req| -> Result<()> {
                let headers = [
                    ("Content-Type", "text/event-stream"),
                    ("Cache-Control", "no-cache"),
                ];
                let mut resp = req.into_response(200, Some("OK"), &headers)?;
                let _guard = SubscriberGuard::attach(&channel);
                info!("sse: subscriber attached");

                let mut last_seq = 0u64;
                let mut idle_polls = 0u32;
                loop {
                    let seq = channel.seq.load(Ordering::Acquire);
                    if seq != last_seq {
                        last_seq = seq;
                        idle_polls = 0;
                        let json = channel.latest.lock().unwrap().clone();
                        if let Some(json) = json {
                            let frame = format!("event: telemetry\ndata: {}\n\n", json);
                            if resp.write_all(frame.as_bytes()).is_err() {
                                break;
                            }
                        }
                    } else {
                        idle_polls += 1;
                        if idle_polls >= KEEPALIVE_POLLS {
                            idle_polls = 0;
                            if resp.write_all(b": keepalive\n\n").is_err() {
                                break;
                            }
                        }
                    }
                    thread::sleep(SSE_POLL);
                }
                info!("sse: subscriber detached");
                Ok(())
            })?;
        }

        // --- POST /command : actuator commands ---
        {
            server.fn_handler("/command", Method::Post, move |req| -> Result<()> {
                if let Some(cmd) = command_from_query(query_of(req.uri())) {
                    let _ = commands.send(cmd);
                }
                // Acknowledge unconditionally; there is no error channel.
                let mut resp = req.into_response(200, Some("OK"), &[])?;
                resp.write_all(b"OK")?;
                Ok(())
            })?;
        }

        info!("http: server up (/events, /command)");
        Ok(server)
    }
}
