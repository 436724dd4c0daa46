//! Fuzz target: `parse_frame` and `ProtocolHandler::handle`
//!
//! Pads arbitrary bytes into one inbound block and dispatches it against a
//! fresh register file.  The handler must never panic, and a reply can
//! never be longer than a full-size read.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use tecolab::protocol::{FRAME_LEN, ProtocolHandler, parse_frame};
use tecolab::registers::RegisterFile;

fuzz_target!(|data: &[u8]| {
    let mut frame = [0u8; FRAME_LEN];
    let n = data.len().min(FRAME_LEN);
    frame[..n].copy_from_slice(&data[..n]);

    let parsed_ok = parse_frame(&frame).is_ok();

    let mut regs = RegisterFile::new();
    let mut handler = ProtocolHandler::new();
    match handler.handle(&frame, &mut regs, 0) {
        Ok(reply) => {
            assert!(parsed_ok, "handler accepted a frame the codec rejects");
            assert!(reply.len() >= 2 && reply.len() <= 18, "reply length {}", reply.len());
        }
        Err(_) => {
            assert!(!parsed_ok);
            assert_eq!(regs, RegisterFile::new(), "dropped frame touched registers");
        }
    }
});
