//! UART host link (ESP-IDF only).
//!
//! The host writes one request and waits for the reply, so a request ends
//! when the line goes quiet.  Each read waits at most [`READ_GAP_MS`] for
//! more bytes; at 115200 baud that is over a hundred byte times.

use esp_idf_svc::hal::delay::TickType;
use esp_idf_svc::hal::uart::UartDriver;
use esp_idf_svc::sys::EspError;

use crate::protocol::Transport;

/// Inter-byte gap that ends a request.
pub const READ_GAP_MS: u64 = 10;

/// Upper bound on waiting for a reply to leave the FIFO.
const TX_DONE_TIMEOUT_MS: u64 = 50;

pub struct UartTransport {
    uart: UartDriver<'static>,
}

impl UartTransport {
    pub fn new(uart: UartDriver<'static>) -> Self {
        Self { uart }
    }
}

impl Transport for UartTransport {
    type Error = EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, TickType::new_millis(READ_GAP_MS).ticks())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, EspError> {
        self.uart.write(data)
    }

    fn flush(&mut self) -> Result<(), EspError> {
        self.uart
            .wait_tx_done(TickType::new_millis(TX_DONE_TIMEOUT_MS).ticks())
    }

    fn available(&self) -> bool {
        matches!(self.uart.remaining_read(), Ok(n) if n > 0)
    }
}
