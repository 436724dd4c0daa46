//! Mock hardware, host link and event sink for integration tests.
//!
//! Records every actuator call and every reply so tests can assert on the
//! full history without touching real GPIO/PWM/UART registers.

use std::collections::VecDeque;
use std::convert::Infallible;

use tecolab::app::events::AppEvent;
use tecolab::app::ports::{ActuatorPort, EventSink, Led};
use tecolab::protocol::{FRAME_LEN, Transport};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Heater1(u8),
    Heater2(u8),
    Cooler(u8),
    SetLed { led: Led, on: bool },
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    red: bool,
    green: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duties written, `(heater1, heater2, cooler)`.
    pub fn duties(&self) -> (u8, u8, u8) {
        let last = |pick: fn(&ActuatorCall) -> Option<u8>| {
            self.calls.iter().rev().find_map(pick).unwrap_or(0)
        };
        (
            last(|c| match c {
                ActuatorCall::Heater1(d) => Some(*d),
                _ => None,
            }),
            last(|c| match c {
                ActuatorCall::Heater2(d) => Some(*d),
                _ => None,
            }),
            last(|c| match c {
                ActuatorCall::Cooler(d) => Some(*d),
                _ => None,
            }),
        )
    }

    pub fn red(&self) -> bool {
        self.red
    }

    pub fn green(&self) -> bool {
        self.green
    }

    pub fn led_writes(&self, which: Led) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::SetLed { led, .. } if *led == which))
            .count()
    }
}

impl ActuatorPort for MockHardware {
    fn set_heater1(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::Heater1(duty));
    }

    fn set_heater2(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::Heater2(duty));
    }

    fn set_cooler(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::Cooler(duty));
    }

    fn led(&mut self, led: Led) -> bool {
        match led {
            Led::Red => self.red,
            Led::Green => self.green,
        }
    }

    fn set_led(&mut self, led: Led, on: bool) {
        self.calls.push(ActuatorCall::SetLed { led, on });
        match led {
            Led::Red => self.red = on,
            Led::Green => self.green = on,
        }
    }
}

// ── MockLink ──────────────────────────────────────────────────

/// Scripted host link.  Each queued request arrives as one burst followed
/// by a quiet line, like a host that writes a frame and waits.
#[derive(Default)]
pub struct MockLink {
    inbound: VecDeque<Vec<u8>>,
    gap: bool,
    pub replies: Vec<Vec<u8>>,
    pub flushes: usize,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, bytes: &[u8]) {
        self.inbound.push_back(bytes.to_vec());
    }

    /// Queue a host-built request, trimmed of its zero padding the way a
    /// host tool would send it.
    pub fn send_frame(&mut self, frame: &[u8; FRAME_LEN], len: usize) {
        self.send(&frame[..len]);
    }

    pub fn take_reply(&mut self) -> Option<Vec<u8>> {
        if self.replies.is_empty() {
            None
        } else {
            Some(self.replies.remove(0))
        }
    }
}

impl Transport for MockLink {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        if std::mem::take(&mut self.gap) {
            return Ok(0);
        }
        let Some(chunk) = self.inbound.front_mut() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        if chunk.is_empty() {
            self.inbound.pop_front();
            self.gap = n < buf.len();
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Infallible> {
        self.replies.push(data.to_vec());
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.flushes += 1;
        Ok(())
    }

    fn available(&self) -> bool {
        !self.inbound.is_empty()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
