//! Request dispatcher.
//!
//! Turns one validated [`Command`] into register accesses and exactly one
//! reply frame:
//!
//! | Tag | Reply                                   | Length  |
//! |-----|-----------------------------------------|---------|
//! | R   | error, qty data bytes, checksum         | qty + 2 |
//! | W   | error, error                            | 2       |
//! | C   | error, room/h1/h2 temps (LE), checksum  | 8       |
//! | A   | 'A', 'A'                                | 2       |
//! | ?   | 0x01, 0x01                              | 2       |
//!
//! Every accepted R/W/C/A frame refreshes the communication timestamp and
//! marks the link connected.  This is the only place the link is upgraded.

use log::{debug, warn};

use crate::error::{ErrorFlags, FrameError};
use crate::registers::{ConnectionStatus, Register, RegisterFile};

use super::codec::{Command, checksum, parse_frame};
use super::transport::Transport;
use super::{FRAME_LEN, TAG_ACKNOWLEDGE};

/// Reply frame.  Never longer than a request block.
pub type Reply = heapless::Vec<u8, FRAME_LEN>;

/// Running counters, reported in telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtocolStats {
    /// Frames that passed validation (R/W/C/A).
    pub accepted: u32,
    /// Known commands dropped on checksum mismatch.
    pub dropped: u32,
    /// Frames with an unrecognised tag.
    pub unknown: u32,
}

/// What happened to the last polled frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing was waiting on the transport.
    Idle,
    /// A reply was produced and written.
    Replied(Reply),
    /// The tag was not recognised; the error reply was written.
    Unknown(u8),
    /// The frame failed validation; nothing was sent.
    Dropped(FrameError),
}

/// Stateless apart from its counters; all device state lives in the
/// [`RegisterFile`] passed to each call.
#[derive(Debug, Default)]
pub struct ProtocolHandler {
    stats: ProtocolStats,
}

impl ProtocolHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ProtocolStats {
        self.stats
    }

    /// Service the transport once: if a block is waiting, consume it,
    /// dispatch it, and write the reply.
    ///
    /// Transport errors are logged and treated as "no frame".
    pub fn poll<T: Transport>(
        &mut self,
        transport: &mut T,
        regs: &mut RegisterFile,
        now_ms: u32,
    ) -> PollOutcome {
        if !transport.available() {
            return PollOutcome::Idle;
        }
        let frame = match transport.read_frame() {
            Ok(f) => f,
            Err(e) => {
                warn!("host link read failed: {:?}", e);
                return PollOutcome::Idle;
            }
        };

        match self.dispatch(&frame, regs, now_ms) {
            Ok((command, reply)) => {
                send(transport, &reply);
                match command {
                    Command::Unknown(tag) => PollOutcome::Unknown(tag),
                    _ => PollOutcome::Replied(reply),
                }
            }
            Err(e) => PollOutcome::Dropped(e),
        }
    }

    /// Dispatch one request block and return only the reply.
    ///
    /// `Err` means the frame was dropped and the host gets no reply.
    pub fn handle(
        &mut self,
        frame: &[u8; FRAME_LEN],
        regs: &mut RegisterFile,
        now_ms: u32,
    ) -> Result<Reply, FrameError> {
        self.dispatch(frame, regs, now_ms).map(|(_, reply)| reply)
    }

    /// Dispatch one request block against the register file, returning
    /// the decoded command alongside its reply.
    pub fn dispatch<'f>(
        &mut self,
        frame: &'f [u8; FRAME_LEN],
        regs: &mut RegisterFile,
        now_ms: u32,
    ) -> Result<(Command<'f>, Reply), FrameError> {
        let mut error = ErrorFlags::empty();
        if regs.is_overheated() {
            error.insert(ErrorFlags::OVERHEATED);
        }

        let command = match parse_frame(frame) {
            Ok(c) => c,
            Err(e) => {
                self.stats.dropped = self.stats.dropped.wrapping_add(1);
                warn!("dropping frame: {e}");
                return Err(e);
            }
        };

        let mut reply = Reply::new();
        match command {
            Command::Read { addr, qty } => {
                push(&mut reply, error.bits());
                for i in 0..qty {
                    push(&mut reply, regs.read(addr.wrapping_add(i) as usize));
                }
                seal(&mut reply);
            }
            Command::Write { addr, data } => {
                for (i, &byte) in data.iter().enumerate() {
                    regs.write(addr.wrapping_add(i as u8) as usize, byte);
                }
                // A one-byte payload is its own checksum.
                push(&mut reply, error.bits());
                push(&mut reply, error.bits());
            }
            Command::Control {
                heater1,
                heater2,
                cooler,
            } => {
                regs.set_heater1_pwm(heater1);
                regs.set_heater2_pwm(heater2);
                regs.set_cooler_pwm(cooler);
                push(&mut reply, error.bits());
                for reg in [Register::RoomTemp, Register::Heater1Temp, Register::Heater2Temp] {
                    let start = reg.offset() as usize;
                    push(&mut reply, regs.read(start));
                    push(&mut reply, regs.read(start + 1));
                }
                seal(&mut reply);
            }
            Command::Acknowledge => {
                push(&mut reply, TAG_ACKNOWLEDGE);
                push(&mut reply, TAG_ACKNOWLEDGE);
            }
            Command::Unknown(tag) => {
                debug!("unknown command tag 0x{:02X}", tag);
                self.stats.unknown = self.stats.unknown.wrapping_add(1);
                let code = ErrorFlags::UNKNOWN_COMMAND.bits();
                push(&mut reply, code);
                push(&mut reply, code);
                return Ok((command, reply));
            }
        }

        self.stats.accepted = self.stats.accepted.wrapping_add(1);
        regs.set_last_communication_ms(now_ms);
        regs.set_connection_status(ConnectionStatus::Connected);
        Ok((command, reply))
    }
}

/// Write the whole reply and wait for it to leave.  A link that stops
/// accepting bytes leaves a truncated reply; the host times out on it.
fn send<T: Transport>(transport: &mut T, reply: &[u8]) {
    match transport.write_all(reply) {
        Ok(n) if n < reply.len() => {
            warn!("host link short write: {}/{} bytes", n, reply.len());
        }
        Ok(_) => {}
        Err(e) => {
            warn!("host link write failed: {:?}", e);
            return;
        }
    }
    if let Err(e) = transport.flush() {
        warn!("host link flush failed: {:?}", e);
    }
}

/// Append one byte.  Replies top out at 18 bytes, well inside the buffer.
fn push(reply: &mut Reply, byte: u8) {
    let _ = reply.push(byte);
}

/// Append the checksum of everything written so far.
fn seal(reply: &mut Reply) {
    let cks = checksum(reply);
    push(reply, cks);
}
