//! Unified error types for the TeCoLab firmware.
//!
//! Two layers live here:
//!
//! - [`ErrorFlags`] is the single status byte carried on the wire in
//!   every reply.  It is a bit set, not a Rust error.
//! - [`Error`] and its sub-enums cover the firmware-internal failures
//!   (probe bus, frame validation, peripheral init).  All variants are
//!   `Copy` so they can be logged and passed around without allocation.
//!
//! Nothing in the core loop is fatal: every error path ends in a log
//! record and a normal return.

use core::fmt;

// ---------------------------------------------------------------------------
// Wire error byte
// ---------------------------------------------------------------------------

/// Error byte placed at the head of every reply frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorFlags(u8);

impl ErrorFlags {
    /// The command tag was not recognised.
    pub const UNKNOWN_COMMAND: Self = Self(0x01);
    /// The thermal safety loop is holding the rig in the overheated state.
    pub const OVERHEATED: Self = Self(0xF0);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible firmware operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A temperature probe could not be read.
    Sensor(SensorError),
    /// An inbound frame failed validation.
    Frame(FrameError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration values are inconsistent.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Bus reset saw no presence pulse: probe missing or wiring open.
    NoPresence,
    /// Scratchpad contents failed the Maxim CRC-8 check.
    CrcMismatch,
    /// The bus pin itself reported an I/O error.
    PinFault,
    /// The bus misbehaved: held low, or a device answered out of protocol.
    BusFault,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPresence => write!(f, "no presence pulse on one-wire bus"),
            Self::CrcMismatch => write!(f, "scratchpad CRC mismatch"),
            Self::PinFault => write!(f, "one-wire pin I/O error"),
            Self::BusFault => write!(f, "one-wire bus fault"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Frame errors
// ---------------------------------------------------------------------------

/// Validation failures of a known command.  These never reach the host;
/// the frame is dropped and the host times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    ChecksumMismatch { tag: u8, expected: u8, received: u8 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChecksumMismatch {
                tag,
                expected,
                received,
            } => write!(
                f,
                "checksum mismatch on '{}' (expected 0x{:02X}, got 0x{:02X})",
                char::from(*tag),
                expected,
                received
            ),
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Peripheral init errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    PwmInitFailed(i32),
    GpioConfigFailed(i32),
    UartInitFailed(i32),
    ProbeBusFailed(i32),
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::ProbeBusFailed(gpio) => write!(f, "one-wire bus on GPIO {} would not release", gpio),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
