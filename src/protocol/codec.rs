//! Frame validation and command decoding.
//!
//! Wire format of the requests (the block is always [`FRAME_LEN`] bytes,
//! anything after the checksum is ignored):
//!
//! ```text
//! R  ┌─────┬──────┬─────┬─────┐
//!    │ 'R' │ addr │ qty │ cks │            cks = Σ bytes[0..3]
//!    └─────┴──────┴─────┴─────┘
//! W  ┌─────┬──────┬─────┬────────────┬─────┐
//!    │ 'W' │ addr │ qty │ qty × data │ cks │ cks = Σ bytes[0..3+qty]
//!    └─────┴──────┴─────┴────────────┴─────┘
//! C  ┌─────┬────┬────┬────────┬─────┐
//!    │ 'C' │ h1 │ h2 │ cooler │ cks │      cks = Σ bytes[0..4]
//!    └─────┴────┴────┴────────┴─────┘
//! A  ┌─────┬─────┐
//!    │ 'A' │ cks │                         cks = 'A'
//!    └─────┴─────┘
//! ```
//!
//! `qty` is clamped to [`MAX_TRANSFER`] *before* the checksum position is
//! located, so an oversized write is validated over its first 16 data
//! bytes only.

use crate::error::FrameError;

use super::{FRAME_LEN, MAX_TRANSFER, TAG_ACKNOWLEDGE, TAG_CONTROL, TAG_READ, TAG_WRITE};

/// 8-bit wrapping sum of `bytes`.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Check that the byte at `len` is the checksum of `frame[..len]`.
fn verify(frame: &[u8; FRAME_LEN], len: usize) -> Result<(), FrameError> {
    let expected = checksum(&frame[..len]);
    let received = frame[len];
    if expected == received {
        Ok(())
    } else {
        Err(FrameError::ChecksumMismatch {
            tag: frame[0],
            expected,
            received,
        })
    }
}

/// A validated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Read `qty` register bytes starting at `addr`.
    Read { addr: u8, qty: u8 },
    /// Write `data` into consecutive register bytes starting at `addr`.
    Write { addr: u8, data: &'a [u8] },
    /// Set all three PWM setpoints and sample the temperatures.
    Control { heater1: u8, heater2: u8, cooler: u8 },
    /// Liveness probe; echoed back.
    Acknowledge,
    /// Tag not understood.  Carries the tag for logging.
    Unknown(u8),
}

/// Decode and validate one inbound block.
///
/// Unknown tags are not an error: they decode to [`Command::Unknown`] and
/// still get a reply.  Only a checksum mismatch on a known command fails.
pub fn parse_frame(frame: &[u8; FRAME_LEN]) -> Result<Command<'_>, FrameError> {
    match frame[0] {
        TAG_READ => {
            verify(frame, 3)?;
            Ok(Command::Read {
                addr: frame[1],
                qty: frame[2].min(MAX_TRANSFER),
            })
        }
        TAG_WRITE => {
            let qty = frame[2].min(MAX_TRANSFER) as usize;
            verify(frame, 3 + qty)?;
            Ok(Command::Write {
                addr: frame[1],
                data: &frame[3..3 + qty],
            })
        }
        TAG_CONTROL => {
            verify(frame, 4)?;
            Ok(Command::Control {
                heater1: frame[1],
                heater2: frame[2],
                cooler: frame[3],
            })
        }
        TAG_ACKNOWLEDGE => {
            verify(frame, 1)?;
            Ok(Command::Acknowledge)
        }
        other => Ok(Command::Unknown(other)),
    }
}
