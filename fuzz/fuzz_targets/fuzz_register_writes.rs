//! Fuzz target: `RegisterFile::write` / `RegisterFile::read`
//!
//! Interprets the input as `(offset, value)` pairs and applies them to the
//! byte view.  Every in-range write must read back, and nothing may panic
//! on out-of-range offsets.
//!
//! cargo fuzz run fuzz_register_writes

#![no_main]

use libfuzzer_sys::fuzz_target;
use tecolab::registers::{REGISTER_FILE_SIZE, RegisterFile};

fuzz_target!(|data: &[u8]| {
    let mut regs = RegisterFile::new();
    for pair in data.chunks_exact(2) {
        let offset = pair[0] as usize;
        let value = pair[1];
        regs.write(offset, value);
        if offset < REGISTER_FILE_SIZE {
            assert_eq!(regs.read(offset), value);
        } else {
            assert_eq!(regs.read(offset), 0);
        }
    }
    assert_eq!(regs.snapshot().len(), REGISTER_FILE_SIZE);
});
