//! Host-side helpers: build well-formed requests and decode replies.
//!
//! The firmware never calls these; the bench tooling, the integration
//! tests, and the fuzz harness do.  Requests are returned already padded to
//! the [`FRAME_LEN`] block the firmware consumes.

use super::codec::checksum;
use super::{FRAME_LEN, MAX_TRANSFER, TAG_ACKNOWLEDGE, TAG_CONTROL, TAG_READ, TAG_WRITE};

/// Append the checksum of `body` and zero-pad to a full block.
fn seal(body: &[u8]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[..body.len()].copy_from_slice(body);
    frame[body.len()] = checksum(body);
    frame
}

/// `R` request.  `qty` above [`MAX_TRANSFER`] is clamped here too, so the
/// expected reply length stays correct.
pub fn read_request(addr: u8, qty: u8) -> [u8; FRAME_LEN] {
    seal(&[TAG_READ, addr, qty.min(MAX_TRANSFER)])
}

/// `W` request.  Only the first [`MAX_TRANSFER`] bytes of `data` are sent.
pub fn write_request(addr: u8, data: &[u8]) -> [u8; FRAME_LEN] {
    let n = data.len().min(MAX_TRANSFER as usize);
    let mut body = [0u8; 3 + MAX_TRANSFER as usize];
    body[0] = TAG_WRITE;
    body[1] = addr;
    body[2] = n as u8;
    body[3..3 + n].copy_from_slice(&data[..n]);
    seal(&body[..3 + n])
}

/// `C` request.
pub fn control_request(heater1: u8, heater2: u8, cooler: u8) -> [u8; FRAME_LEN] {
    seal(&[TAG_CONTROL, heater1, heater2, cooler])
}

/// `A` request.
pub fn acknowledge_request() -> [u8; FRAME_LEN] {
    seal(&[TAG_ACKNOWLEDGE])
}

/// Reply length the host must wait for after sending `request`.
///
/// There is no length prefix on the wire; the host derives it from the tag.
pub fn expected_reply_len(request: &[u8; FRAME_LEN]) -> usize {
    match request[0] {
        TAG_READ => request[2].min(MAX_TRANSFER) as usize + 2,
        TAG_CONTROL => 8,
        _ => 2,
    }
}

/// Decoded `C` reply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlReply {
    pub error: u8,
    pub room_c: f32,
    pub heater1_c: f32,
    pub heater2_c: f32,
}

impl ControlReply {
    /// Decode an 8-byte control reply.  `None` on wrong length or checksum.
    pub fn decode(reply: &[u8]) -> Option<Self> {
        if reply.len() != 8 || checksum(&reply[..7]) != reply[7] {
            return None;
        }
        let temp = |lo: usize| f32::from(i16::from_le_bytes([reply[lo], reply[lo + 1]])) / 100.0;
        Some(Self {
            error: reply[0],
            room_c: temp(1),
            heater1_c: temp(3),
            heater2_c: temp(5),
        })
    }

    pub fn overheated(&self) -> bool {
        self.error & crate::error::ErrorFlags::OVERHEATED.bits() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledge_matches_the_handshake_bytes() {
        let req = acknowledge_request();
        assert_eq!(&req[..2], b"AA");
        assert_eq!(expected_reply_len(&req), 2);
    }

    #[test]
    fn write_request_clamps_payload() {
        let data = [0x11u8; 20];
        let req = write_request(0, &data);
        assert_eq!(req[2], 16);
        assert_eq!(req[19], checksum(&req[..19]));
        assert_eq!(req[20], 0);
    }

    #[test]
    fn read_reply_len_tracks_qty() {
        assert_eq!(expected_reply_len(&read_request(0, 6)), 8);
        assert_eq!(expected_reply_len(&read_request(0, 200)), 18);
    }

    #[test]
    fn control_reply_decodes_signed_centi_degrees() {
        let mut reply = [0xF0u8, 0, 0, 0, 0, 0, 0, 0];
        reply[1..3].copy_from_slice(&2150i16.to_le_bytes());
        reply[3..5].copy_from_slice(&(-550i16).to_le_bytes());
        reply[5..7].copy_from_slice(&10_000i16.to_le_bytes());
        reply[7] = checksum(&reply[..7]);

        let r = ControlReply::decode(&reply).unwrap();
        assert!((r.room_c - 21.5).abs() < 1e-4);
        assert!((r.heater1_c + 5.5).abs() < 1e-4);
        assert!((r.heater2_c - 100.0).abs() < 1e-4);
        assert!(r.overheated());
    }

    #[test]
    fn control_reply_rejects_bad_checksum() {
        let reply = [0u8, 1, 2, 3, 4, 5, 6, 0];
        assert!(ControlReply::decode(&reply).is_none());
        assert!(ControlReply::decode(&reply[..7]).is_none());
    }
}
