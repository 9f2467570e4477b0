//! Outbound UBX frame encoding

use super::checksum::{ubx_checksum, Checksum};
use super::{CHECKSUM_LEN, HEADER_LEN, SYNC_CHAR_1, SYNC_CHAR_2};
use heapless::Vec;

/// Largest encoded frame the tracker ever sends
pub const MAX_FRAME_LEN: usize = 64;

/// Largest payload that fits in [`MAX_FRAME_LEN`]
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN - HEADER_LEN - CHECKSUM_LEN;

/// Encoded frame buffer
pub type FrameBuffer = Vec<u8, MAX_FRAME_LEN>;

/// A UBX command: class, id and a static payload
///
/// Length and checksum are derived, never stored, so a template cannot carry
/// a stale checksum after its payload is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    /// Message class
    pub class: u8,
    /// Message id
    pub id: u8,
    /// Payload bytes
    pub payload: &'static [u8],
}

impl CommandFrame {
    /// Build a command template
    ///
    /// Evaluated in a `const` item, an oversized payload fails the build.
    pub const fn new(class: u8, id: u8, payload: &'static [u8]) -> Self {
        assert!(payload.len() <= MAX_PAYLOAD_LEN, "UBX payload too large");
        Self { class, id, payload }
    }

    /// Build a zero-length poll request for `class`/`id`
    pub const fn poll(class: u8, id: u8) -> Self {
        Self::new(class, id, &[])
    }

    /// Payload length as carried in the length field
    pub const fn payload_len(&self) -> u16 {
        self.payload.len() as u16
    }

    /// Total encoded length including sync characters and checksum
    pub const fn frame_len(&self) -> usize {
        HEADER_LEN + self.payload.len() + CHECKSUM_LEN
    }

    /// Checksum over class, id, length and payload
    pub const fn checksum(&self) -> (u8, u8) {
        let [len_lo, len_hi] = self.payload_len().to_le_bytes();
        let mut sum = Checksum::new()
            .update(self.class)
            .update(self.id)
            .update(len_lo)
            .update(len_hi);
        let mut i = 0;
        while i < self.payload.len() {
            sum = sum.update(self.payload[i]);
            i += 1;
        }
        sum.value()
    }

    /// Wire bytes of the frame, in transmission order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let [len_lo, len_hi] = self.payload_len().to_le_bytes();
        let (ck_a, ck_b) = self.checksum();
        [SYNC_CHAR_1, SYNC_CHAR_2, self.class, self.id, len_lo, len_hi]
            .into_iter()
            .chain(self.payload.iter().copied())
            .chain([ck_a, ck_b])
    }

    /// Encode the complete wire frame
    pub fn encode(&self) -> FrameBuffer {
        // `new` bounds the payload, so the frame always fits.
        self.bytes().collect()
    }
}

/// Check that a complete frame carries a correct checksum and length field
pub fn frame_checksum_valid(frame: &[u8]) -> bool {
    if frame.len() < HEADER_LEN + CHECKSUM_LEN
        || frame[0] != SYNC_CHAR_1
        || frame[1] != SYNC_CHAR_2
    {
        return false;
    }

    let declared = u16::from_le_bytes([frame[4], frame[5]]) as usize;
    if declared + HEADER_LEN + CHECKSUM_LEN != frame.len() {
        return false;
    }

    let body_end = frame.len() - CHECKSUM_LEN;
    let (ck_a, ck_b) = ubx_checksum(&frame[2..body_end]);
    frame[body_end] == ck_a && frame[body_end + 1] == ck_b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_request_encoding() {
        let pvt = CommandFrame::poll(0x01, 0x07);
        assert_eq!(
            pvt.encode().as_slice(),
            &[0xB5, 0x62, 0x01, 0x07, 0x00, 0x00, 0x08, 0x19]
        );
    }

    #[test]
    fn test_payload_frame_encoding() {
        const RXM: CommandFrame = CommandFrame::new(0x06, 0x11, &[0x08, 0x01]);
        let frame = RXM.encode();
        assert_eq!(RXM.frame_len(), 10);
        assert_eq!(
            frame.as_slice(),
            &[0xB5, 0x62, 0x06, 0x11, 0x02, 0x00, 0x08, 0x01, 0x22, 0x92]
        );
        assert!(frame_checksum_valid(&frame));
    }

    #[test]
    fn test_bytes_matches_encode() {
        let cmd = CommandFrame::new(0x06, 0x24, &[1, 2, 3, 4, 5]);
        let collected: heapless::Vec<u8, MAX_FRAME_LEN> = cmd.bytes().collect();
        assert_eq!(collected, cmd.encode());
    }

    #[test]
    fn test_frame_checksum_valid_rejects_corruption() {
        let mut frame = CommandFrame::new(0x06, 0x11, &[0x08, 0x00]).encode();
        assert!(frame_checksum_valid(&frame));

        frame[6] ^= 0x01;
        assert!(!frame_checksum_valid(&frame));
    }

    #[test]
    fn test_frame_checksum_valid_rejects_bad_length() {
        let frame = [0xB5, 0x62, 0x01, 0x07, 0x05, 0x00, 0x08, 0x19];
        assert!(!frame_checksum_valid(&frame));
        assert!(!frame_checksum_valid(&[0xB5, 0x62]));
    }
}
