//! Protocol handler against a byte link: framing, polling and error paths
//! that only show up once a real `Transport` is in the loop.

use crate::mock_hw::MockLink;

use tecolab::error::FrameError;
use tecolab::protocol::handler::PollOutcome;
use tecolab::protocol::host;
use tecolab::protocol::{ProtocolHandler, Transport};
use tecolab::registers::RegisterFile;

#[test]
fn idle_link_is_not_read() {
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    let mut link = MockLink::new();
    assert_eq!(handler.poll(&mut link, &mut regs, 0), PollOutcome::Idle);
    assert!(link.replies.is_empty());
}

#[test]
fn one_poll_answers_one_request() {
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    let mut link = MockLink::new();
    link.send(b"AA");
    link.send(b"Z");

    assert!(matches!(
        handler.poll(&mut link, &mut regs, 0),
        PollOutcome::Replied(_)
    ));
    assert_eq!(link.replies.len(), 1);
    assert_eq!(
        handler.poll(&mut link, &mut regs, 0),
        PollOutcome::Unknown(b'Z')
    );
    assert_eq!(link.replies, vec![b"AA".to_vec(), vec![0x01, 0x01]]);
    assert_eq!(handler.poll(&mut link, &mut regs, 0), PollOutcome::Idle);
}

#[test]
fn oversized_burst_spills_into_the_next_block() {
    // 40 bytes on the line: the first 32 form one block, the remaining 8
    // are read as the next block.
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    let mut link = MockLink::new();
    let mut burst = host::acknowledge_request().to_vec();
    burst.extend_from_slice(&host::read_request(0, 1)[..8]);
    link.send(&burst);

    handler.poll(&mut link, &mut regs, 0);
    handler.poll(&mut link, &mut regs, 0);
    assert_eq!(link.replies.len(), 2);
    assert_eq!(link.replies[0], b"AA".to_vec());
    assert_eq!(link.replies[1].len(), 3);
}

#[test]
fn dropped_frame_reports_checksum_detail() {
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    let mut link = MockLink::new();
    link.send(&[b'C', 1, 2, 3, 0]);
    assert_eq!(
        handler.poll(&mut link, &mut regs, 0),
        PollOutcome::Dropped(FrameError::ChecksumMismatch {
            tag: b'C',
            expected: b'C' + 6,
            received: 0,
        })
    );
    assert!(link.replies.is_empty());
    assert_eq!(regs.heater1_pwm(), 0);
}

/// Link that accepts one byte per write and stops after `budget` bytes.
struct TrickleLink {
    inner: MockLink,
    sent: Vec<u8>,
    budget: usize,
}

impl TrickleLink {
    fn new(budget: usize) -> Self {
        Self {
            inner: MockLink::new(),
            sent: Vec::new(),
            budget,
        }
    }
}

impl Transport for TrickleLink {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.inner.read(buf).unwrap_or(0))
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if self.sent.len() >= self.budget || data.is_empty() {
            return Ok(0);
        }
        self.sent.push(data[0]);
        Ok(1)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        self.inner.available()
    }
}

#[test]
fn byte_at_a_time_link_gets_the_whole_reply() {
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    regs.set_room_temp(2150);
    let mut link = TrickleLink::new(usize::MAX);
    link.inner.send_frame(&host::control_request(1, 2, 3), 5);

    let outcome = handler.poll(&mut link, &mut regs, 0);
    let PollOutcome::Replied(reply) = outcome else {
        panic!("expected a reply, got {outcome:?}");
    };
    assert_eq!(link.sent, reply.to_vec());
    assert_eq!(link.sent.len(), 8);
}

#[test]
fn stalled_link_truncates_without_hanging() {
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    let mut link = TrickleLink::new(3);
    link.inner.send_frame(&host::read_request(0, 16), 4);

    assert!(matches!(
        handler.poll(&mut link, &mut regs, 0),
        PollOutcome::Replied(_)
    ));
    assert_eq!(link.sent.len(), 3);
    assert_eq!(handler.stats().accepted, 1);
}

/// Link whose writes always fail.
struct BrokenLink(MockLink);

impl Transport for BrokenLink {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.0.read(buf).unwrap_or(0))
    }

    fn write(&mut self, _data: &[u8]) -> Result<usize, Self::Error> {
        Err("tx fifo full")
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        self.0.available()
    }
}

#[test]
fn write_failure_still_applies_the_request() {
    let mut handler = ProtocolHandler::new();
    let mut regs = RegisterFile::new();
    let mut link = BrokenLink(MockLink::new());
    let req = host::control_request(5, 6, 7);
    link.0.send_frame(&req, 5);
    assert!(matches!(
        handler.poll(&mut link, &mut regs, 0),
        PollOutcome::Replied(_)
    ));
    assert_eq!(regs.cooler_pwm(), 7);
    assert_eq!(handler.stats().accepted, 1);
}
