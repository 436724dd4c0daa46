//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the register file and the four cycle components.
//! All I/O flows through port traits injected at call sites, so the whole
//! loop runs unchanged against the mocks in `tests/`.
//!
//! ```text
//!  Transport ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                │          AppService          │
//! ActuatorPort ◀─│ Protocol · Link · Probes ·   │
//!                │ Safety      (RegisterFile)   │
//!                └──────────────────────────────┘
//! ```
//!
//! The components never call each other.  Each reads and writes the
//! register file in a fixed order per cycle, so a setpoint accepted from
//! the host is on the outputs by the end of the same cycle.

use log::info;

use crate::config::SystemConfig;
use crate::connection::ConnectionTracker;
use crate::protocol::handler::PollOutcome;
use crate::protocol::{ProtocolHandler, ProtocolStats, Transport};
use crate::registers::RegisterFile;
use crate::safety::{ActuatorOutputs, SafetyController};
use crate::sensors::{Probes, TemperatureMonitor};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, TemperatureProbe};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<P> {
    regs: RegisterFile,
    protocol: ProtocolHandler,
    connection: ConnectionTracker,
    monitor: TemperatureMonitor<P>,
    safety: SafetyController,
    outputs: ActuatorOutputs,
    telemetry_interval_ms: u32,
    last_telemetry_ms: u32,
    tick_count: u64,
}

impl<P: TemperatureProbe> AppService<P> {
    /// Build the service.  Does not touch the probes; call [`start`](Self::start).
    pub fn new(config: &SystemConfig, probes: Probes<P>) -> Self {
        Self {
            regs: RegisterFile::new(),
            protocol: ProtocolHandler::new(),
            connection: ConnectionTracker::new(config),
            monitor: TemperatureMonitor::new(config, probes),
            safety: SafetyController::new(config),
            outputs: ActuatorOutputs::default(),
            telemetry_interval_ms: config.telemetry_interval_ms,
            last_telemetry_ms: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Kick off the first probe conversion.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.monitor.start();
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: host frame → link timeout → probes → outputs.
    pub fn tick(
        &mut self,
        now_ms: u32,
        transport: &mut impl Transport,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> ActuatorOutputs {
        self.tick_count += 1;
        let link_before = self.regs.connection_status();

        // 1. Host protocol
        match self.protocol.poll(transport, &mut self.regs, now_ms) {
            PollOutcome::Idle | PollOutcome::Replied(_) => {}
            PollOutcome::Unknown(tag) => sink.emit(&AppEvent::UnknownCommand(tag)),
            PollOutcome::Dropped(e) => sink.emit(&AppEvent::FrameDropped(e)),
        }

        // 2. Link timeout
        self.connection.update(&mut self.regs, now_ms);
        let link_after = self.regs.connection_status();
        if let Some(to) = link_after {
            if link_after != link_before {
                sink.emit(&AppEvent::ConnectionChanged {
                    from: link_before,
                    to,
                });
            }
        }

        // 3. Probes
        if let Some(readings) = self.monitor.poll(&mut self.regs, now_ms) {
            if let Some((from, to)) = readings.status_change {
                sink.emit(&AppEvent::TemperatureStatusChanged { from, to });
            }
        }

        // 4. Outputs
        self.outputs = self.safety.update(&self.regs, hw, now_ms);

        if now_ms.wrapping_sub(self.last_telemetry_ms) >= self.telemetry_interval_ms {
            self.last_telemetry_ms = now_ms;
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }

        self.outputs
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the register file.
    pub fn build_telemetry(&self) -> TelemetryData {
        let celsius = |centi: i16| f32::from(centi) / 100.0;
        TelemetryData {
            room_c: celsius(self.regs.room_temp()),
            heater1_c: celsius(self.regs.heater1_temp()),
            heater2_c: celsius(self.regs.heater2_temp()),
            temperature_status: self.regs.temperature_status(),
            connection_status: self.regs.connection_status(),
            outputs: self.outputs,
            protocol: self.protocol.stats(),
        }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Outputs applied by the last cycle.
    pub fn outputs(&self) -> ActuatorOutputs {
        self.outputs
    }

    pub fn protocol_stats(&self) -> ProtocolStats {
        self.protocol.stats()
    }

    /// Cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
