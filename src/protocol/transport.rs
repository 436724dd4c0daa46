//! Transport abstraction: the byte link to the host.
//!
//! Concrete implementations:
//! - UART (`adapters::uart`, ESP-IDF only)
//! - scripted in-memory links in the integration tests
//!
//! The handler is generic over `Transport`; a USB-CDC or TCP link only
//! needs these five methods.

use super::FRAME_LEN;

/// Byte-oriented, non-blocking transport.
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes.  Returns 0 when nothing is pending.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data`, returning the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;

    /// True if at least one inbound byte is waiting.
    fn available(&self) -> bool;

    /// Write all of `data`, retrying partial writes.  Stops early when the
    /// link accepts nothing; returns the number of bytes written.
    fn write_all(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        let mut written = 0;
        while written < data.len() {
            let n = self.write(&data[written..])?;
            if n == 0 {
                break;
            }
            written += n;
        }
        Ok(written)
    }

    /// Consume one request block.
    ///
    /// The block starts zeroed and is filled until [`FRAME_LEN`] bytes have
    /// arrived or the link runs dry; a short request leaves zero padding,
    /// which the validator treats like any other byte.
    fn read_frame(&mut self) -> Result<[u8; FRAME_LEN], Self::Error> {
        let mut frame = [0u8; FRAME_LEN];
        let mut filled = 0;
        while filled < FRAME_LEN {
            let n = self.read(&mut frame[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(frame)
    }
}

/// Link with no host attached: never has input, swallows output.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        false
    }
}
