//! ACK/NAK matcher
//!
//! A configuration command is answered by one of two fixed frames that only
//! differ in their message id:
//!
//! ```text
//! ACK: B5 62 05 01 02 00 <class> <id>
//! NAK: B5 62 05 00 02 00 <class> <id>
//! ```
//!
//! The matcher walks both templates at once and records which branch the byte
//! at index 3 took. The trailing checksum of the reply is not inspected.

use super::{class, id, SYNC_CHAR_1, SYNC_CHAR_2};

/// Length of the matched prefix of an ACK/NAK frame
pub const ACK_TEMPLATE_LEN: usize = 8;

/// Index of the byte distinguishing ACK from NAK
const BRANCH_INDEX: usize = 3;

/// Result of waiting for a reply to a configuration command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// Receiver accepted the command
    Acknowledged,
    /// Receiver rejected the command
    Rejected,
    /// No reply within the time budget
    TimedOut,
}

impl AckOutcome {
    /// `true` only for an explicit ACK
    pub fn is_acknowledged(self) -> bool {
        self == AckOutcome::Acknowledged
    }
}

/// Byte-at-a-time matcher for the ACK/NAK reply to one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckMatcher {
    ack: [u8; ACK_TEMPLATE_LEN],
    position: usize,
    acknowledged: bool,
}

impl AckMatcher {
    /// Create a matcher for the reply to the command `class`/`msg_id`
    pub const fn new(msg_class: u8, msg_id: u8) -> Self {
        Self {
            ack: [
                SYNC_CHAR_1,
                SYNC_CHAR_2,
                class::ACK,
                id::ACK_ACK,
                0x02,
                0x00,
                msg_class,
                msg_id,
            ],
            position: 0,
            acknowledged: false,
        }
    }

    /// Number of template bytes matched so far
    pub fn position(&self) -> usize {
        self.position
    }

    fn expects(&self, position: usize, byte: u8) -> bool {
        byte == self.ack[position] || (position == BRANCH_INDEX && byte == id::ACK_NAK)
    }

    /// Feed one received byte
    ///
    /// Returns the outcome once a full ACK or NAK has been matched. A byte that
    /// breaks the match resets the position and is retried as a sync byte.
    pub fn feed(&mut self, byte: u8) -> Option<AckOutcome> {
        if !self.expects(self.position, byte) {
            self.position = 0;
            if !self.expects(0, byte) {
                return None;
            }
        }

        if self.position == BRANCH_INDEX {
            self.acknowledged = byte == id::ACK_ACK;
        }

        if self.position == ACK_TEMPLATE_LEN - 1 {
            self.position = 0;
            return Some(if self.acknowledged {
                AckOutcome::Acknowledged
            } else {
                AckOutcome::Rejected
            });
        }

        self.position += 1;
        None
    }
}
