//! UBX binary protocol
//!
//! Framing, checksum and byte-stream matching for the u-blox native protocol.
//!
//! ```text
//! 0xB5 0x62 <class> <id> <len_lo> <len_hi> <payload...> <ck_a> <ck_b>
//! ```
//!
//! Everything in this module is a pure function of its inputs: the matchers are
//! fed one byte at a time and never touch a bus or a clock, so the firmware
//! crate wraps them in its own time-budgeted polling loops.
//!
//! # Modules
//!
//! - [`checksum`]: 8-bit Fletcher accumulator
//! - [`frame`]: `CommandFrame` encoder
//! - [`commands`]: configuration and poll request templates
//! - [`ack`]: ACK/NAK matcher
//! - [`demux`]: payload demultiplexer

pub mod ack;
pub mod checksum;
pub mod commands;
pub mod demux;
pub mod frame;

pub use ack::{AckMatcher, AckOutcome};
pub use checksum::{ubx_checksum, Checksum};
pub use demux::{DemuxEvent, DemuxState, PayloadDemux, UbxError};
pub use frame::{frame_checksum_valid, CommandFrame, MAX_FRAME_LEN, MAX_PAYLOAD_LEN};

/// First sync character of every UBX frame
pub const SYNC_CHAR_1: u8 = 0xB5;
/// Second sync character of every UBX frame
pub const SYNC_CHAR_2: u8 = 0x62;

/// Bytes before the payload: sync (2), class, id, length (2)
pub const HEADER_LEN: usize = 6;
/// Trailing checksum bytes
pub const CHECKSUM_LEN: usize = 2;

/// Message classes used by the tracker
pub mod class {
    /// Navigation results
    pub const NAV: u8 = 0x01;
    /// ACK/NAK replies to configuration commands
    pub const ACK: u8 = 0x05;
    /// Configuration input
    pub const CFG: u8 = 0x06;
}

/// Message ids, grouped by class
pub mod id {
    /// NAV-POSLLH: geodetic position solution
    pub const NAV_POSLLH: u8 = 0x02;
    /// NAV-SOL: navigation solution information
    pub const NAV_SOL: u8 = 0x06;
    /// NAV-PVT: position, velocity and time solution
    pub const NAV_PVT: u8 = 0x07;
    /// NAV-TIMEUTC: UTC time solution
    pub const NAV_TIMEUTC: u8 = 0x21;

    /// ACK-NAK
    pub const ACK_NAK: u8 = 0x00;
    /// ACK-ACK
    pub const ACK_ACK: u8 = 0x01;

    /// CFG-PRT: port configuration
    pub const CFG_PRT: u8 = 0x00;
    /// CFG-RXM: receiver power mode
    pub const CFG_RXM: u8 = 0x11;
    /// CFG-NAV5: navigation engine settings
    pub const CFG_NAV5: u8 = 0x24;
    /// CFG-PM2: extended power management
    pub const CFG_PM2: u8 = 0x3B;
    /// CFG-GNSS: constellation configuration
    pub const CFG_GNSS: u8 = 0x3E;
}
