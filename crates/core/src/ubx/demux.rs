//! Payload demultiplexer
//!
//! Picks the payload of one (class, id) frame out of a byte stream that may
//! carry any number of other frames, partial frames and noise.
//!
//! ```text
//! Sync1 -> Sync2 -> Class -> Id -> LengthLow -> LengthHigh -> Payload -> ChecksumA -> ChecksumB
//!   ^        |        |       |                     |                                   |
//!   +--------+--------+-------+---- mismatch -------+--- too long ----------------------+
//! ```
//!
//! Payload bytes are copied straight into the caller's buffer; the frame is
//! only reported complete when its checksum verifies.

use super::checksum::Checksum;
use super::{SYNC_CHAR_1, SYNC_CHAR_2};
use core::fmt;

/// Protocol-level receive errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UbxError {
    /// Frame declares a payload larger than the receive buffer
    BufferCapacityExceeded {
        /// Payload length from the frame header
        declared: u16,
        /// Receive buffer capacity
        capacity: usize,
    },
}

impl fmt::Display for UbxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UbxError::BufferCapacityExceeded { declared, capacity } => write!(
                f,
                "UBX payload of {} bytes exceeds buffer capacity {}",
                declared, capacity
            ),
        }
    }
}

/// Position of the demultiplexer within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemuxState {
    /// Waiting for 0xB5
    Sync1,
    /// Waiting for 0x62
    Sync2,
    /// Expecting the target class
    Class,
    /// Expecting the target id
    Id,
    /// Length, low byte
    LengthLow,
    /// Length, high byte
    LengthHigh {
        /// Low byte already received
        low: u8,
    },
    /// Copying payload bytes
    Payload {
        /// Declared payload length
        len: u16,
        /// Bytes copied so far
        received: u16,
    },
    /// First checksum byte
    ChecksumA {
        /// Declared payload length
        len: u16,
    },
    /// Second checksum byte
    ChecksumB {
        /// Declared payload length
        len: u16,
        /// First checksum byte as received
        ck_a: u8,
    },
}

/// What a single byte did to the demultiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemuxEvent {
    /// Frame not complete yet
    Pending,
    /// Target frame received; payload length in bytes
    Complete(usize),
    /// Target frame received but its checksum was wrong; frame dropped
    ChecksumMismatch,
}

/// Byte-at-a-time demultiplexer for one (class, id) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadDemux {
    class: u8,
    id: u8,
    state: DemuxState,
    checksum: Checksum,
}

impl PayloadDemux {
    /// Create a demultiplexer waiting for frames of `class`/`id`
    pub const fn new(class: u8, id: u8) -> Self {
        Self {
            class,
            id,
            state: DemuxState::Sync1,
            checksum: Checksum::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> DemuxState {
        self.state
    }

    /// Return to sync search, re-examining `byte` as a possible frame start
    fn restart(&mut self, byte: u8) {
        self.state = if byte == SYNC_CHAR_1 {
            DemuxState::Sync2
        } else {
            DemuxState::Sync1
        };
    }

    /// Feed one received byte
    ///
    /// Payload bytes are written to `buf`. The declared length is checked
    /// against `buf.len()` before any payload byte is written.
    ///
    /// # Errors
    ///
    /// Returns [`UbxError::BufferCapacityExceeded`] when the target frame
    /// declares a payload longer than `buf`. The demultiplexer is back in
    /// sync search afterwards.
    pub fn feed(&mut self, byte: u8, buf: &mut [u8]) -> Result<DemuxEvent, UbxError> {
        match self.state {
            DemuxState::Sync1 => {
                if byte == SYNC_CHAR_1 {
                    self.state = DemuxState::Sync2;
                }
            }
            DemuxState::Sync2 => {
                if byte == SYNC_CHAR_2 {
                    self.state = DemuxState::Class;
                } else {
                    self.restart(byte);
                }
            }
            DemuxState::Class => {
                if byte == self.class {
                    self.checksum = Checksum::new().update(byte);
                    self.state = DemuxState::Id;
                } else {
                    self.restart(byte);
                }
            }
            DemuxState::Id => {
                if byte == self.id {
                    self.checksum = self.checksum.update(byte);
                    self.state = DemuxState::LengthLow;
                } else {
                    self.restart(byte);
                }
            }
            DemuxState::LengthLow => {
                self.checksum = self.checksum.update(byte);
                self.state = DemuxState::LengthHigh { low: byte };
            }
            DemuxState::LengthHigh { low } => {
                self.checksum = self.checksum.update(byte);
                let len = u16::from_le_bytes([low, byte]);
                if len as usize > buf.len() {
                    self.state = DemuxState::Sync1;
                    return Err(UbxError::BufferCapacityExceeded {
                        declared: len,
                        capacity: buf.len(),
                    });
                }
                self.state = if len == 0 {
                    DemuxState::ChecksumA { len }
                } else {
                    DemuxState::Payload { len, received: 0 }
                };
            }
            DemuxState::Payload { len, received } => {
                buf[received as usize] = byte;
                self.checksum = self.checksum.update(byte);
                let received = received + 1;
                self.state = if received == len {
                    DemuxState::ChecksumA { len }
                } else {
                    DemuxState::Payload { len, received }
                };
            }
            DemuxState::ChecksumA { len } => {
                self.state = DemuxState::ChecksumB { len, ck_a: byte };
            }
            DemuxState::ChecksumB { len, ck_a } => {
                self.state = DemuxState::Sync1;
                return Ok(if (ck_a, byte) == self.checksum.value() {
                    DemuxEvent::Complete(len as usize)
                } else {
                    DemuxEvent::ChecksumMismatch
                });
            }
        }

        Ok(DemuxEvent::Pending)
    }
}
