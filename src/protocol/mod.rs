//! Host link protocol.
//!
//! Fixed-length request frames, single-byte command tags, 8-bit additive
//! checksums, and replies whose length the host infers from the tag.
//!
//! ```text
//! ┌────────────┐   ┌──────────┐   ┌─────────────────────┐
//! │ Transport  │──▶│  Codec   │──▶│ Handler (dispatch)  │──▶ RegisterFile
//! │ 32 B block │   │ validate │   │ R / W / C / A / ?   │
//! └────────────┘   └──────────┘   └─────────────────────┘
//!       ▲                                   │
//!       └───────────── reply ───────────────┘
//! ```
//!
//! A frame whose checksum does not match is dropped without a reply; the
//! host owns timeouts and retries.

pub mod codec;
pub mod handler;
pub mod host;
pub mod transport;

/// Size of every inbound block read from the transport.
pub const FRAME_LEN: usize = 32;

/// Largest `qty` honoured by read and write commands.
pub const MAX_TRANSFER: u8 = 16;

pub const TAG_READ: u8 = b'R';
pub const TAG_WRITE: u8 = b'W';
pub const TAG_CONTROL: u8 = b'C';
pub const TAG_ACKNOWLEDGE: u8 = b'A';

pub use codec::{Command, checksum, parse_frame};
pub use handler::{ProtocolHandler, ProtocolStats, Reply};
pub use transport::Transport;
