//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the console, count them in a
//! test, forward them somewhere else.

use crate::error::FrameError;
use crate::protocol::ProtocolStats;
use crate::registers::{ConnectionStatus, TemperatureStatus};
use crate::safety::ActuatorOutputs;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started its first cycle.
    Started,

    /// A probe sample moved the thermal status.  `from` is `None` when the
    /// register held a byte that is not a known status.
    TemperatureStatusChanged {
        from: Option<TemperatureStatus>,
        to: TemperatureStatus,
    },

    /// The host link status changed.
    ConnectionChanged {
        from: Option<ConnectionStatus>,
        to: ConnectionStatus,
    },

    /// A known command failed validation and was not answered.
    FrameDropped(FrameError),

    /// A frame carried an unrecognised tag.
    UnknownCommand(u8),

    /// Periodic snapshot, every `telemetry_interval_ms`.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub room_c: f32,
    pub heater1_c: f32,
    pub heater2_c: f32,
    pub temperature_status: Option<TemperatureStatus>,
    pub connection_status: Option<ConnectionStatus>,
    pub outputs: ActuatorOutputs,
    pub protocol: ProtocolStats,
}
