//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (the console UART in production).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | room={:.2}\u{00b0}C h1={:.2}\u{00b0}C h2={:.2}\u{00b0}C | \
                     temp={:?} link={:?} | pwm={}/{}/{} | \
                     frames ok={} dropped={} unknown={}",
                    t.room_c,
                    t.heater1_c,
                    t.heater2_c,
                    t.temperature_status,
                    t.connection_status,
                    t.outputs.heater1,
                    t.outputs.heater2,
                    t.outputs.cooler,
                    t.protocol.accepted,
                    t.protocol.dropped,
                    t.protocol.unknown,
                );
            }
            AppEvent::TemperatureStatusChanged { from, to } => {
                info!("TEMP | {:?} -> {:?}", from, to);
            }
            AppEvent::ConnectionChanged { from, to } => {
                info!("LINK | {:?} -> {:?}", from, to);
            }
            AppEvent::FrameDropped(e) => {
                info!("FRAME | dropped: {}", e);
            }
            AppEvent::UnknownCommand(tag) => {
                debug!("FRAME | unknown tag 0x{:02X}", tag);
            }
            AppEvent::Started => {
                info!("START | TeCoLab v{}", env!("CARGO_PKG_VERSION"));
            }
        }
    }
}
