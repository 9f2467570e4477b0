//! NAV message parsers
//!
//! Each parser reads the fields the tracker uses from a demultiplexed payload
//! at their fixed offsets. All multi-byte fields are little-endian.
//!
//! | Message     | Class/Id  | Fields used                                 |
//! |-------------|-----------|---------------------------------------------|
//! | NAV-PVT     | 0x01 0x07 | time, fix type, satellites, lon, lat, hMSL  |
//! | NAV-POSLLH  | 0x01 0x02 | lon, lat, hMSL                              |
//! | NAV-SOL     | 0x01 0x06 | fix type, satellites                        |
//! | NAV-TIMEUTC | 0x01 0x21 | time                                        |

use super::fix::{altitude_from_mm, Fix, FixTime};
use core::fmt;

/// Payload could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload shorter than the message layout requires
    Truncated {
        /// Minimum length of the message
        expected: usize,
        /// Length received
        actual: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { expected, actual } => write!(
                f,
                "payload truncated: {} bytes, expected at least {}",
                actual, expected
            ),
        }
    }
}

fn require(payload: &[u8], expected: usize) -> Result<(), DecodeError> {
    if payload.len() < expected {
        Err(DecodeError::Truncated {
            expected,
            actual: payload.len(),
        })
    } else {
        Ok(())
    }
}

fn read_u16(payload: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([payload[offset], payload[offset + 1]])
}

fn read_i32(payload: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        payload[offset],
        payload[offset + 1],
        payload[offset + 2],
        payload[offset + 3],
    ])
}

fn read_time(payload: &[u8], offset: usize) -> FixTime {
    FixTime {
        year: read_u16(payload, offset),
        month: payload[offset + 2],
        day: payload[offset + 3],
        hour: payload[offset + 4],
        minute: payload[offset + 5],
        second: payload[offset + 6],
    }
}

/// NAV-PVT: complete solution in one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPvt {
    /// UTC time
    pub time: FixTime,
    /// Fix type code
    pub fix_type: u8,
    /// Satellites used
    pub num_svs: u8,
    /// Longitude, degrees * 1e7
    pub longitude: i32,
    /// Latitude, degrees * 1e7
    pub latitude: i32,
    /// Height above mean sea level, mm
    pub height_msl_mm: i32,
}

impl NavPvt {
    /// Payload length on u-blox 7; u-blox 8 appends fields up to 92 bytes
    pub const MIN_LEN: usize = 84;

    /// Parse a NAV-PVT payload
    pub fn parse(payload: &[u8]) -> Result<Self, DecodeError> {
        require(payload, Self::MIN_LEN)?;
        Ok(Self {
            time: read_time(payload, 4),
            fix_type: payload[20],
            num_svs: payload[23],
            longitude: read_i32(payload, 24),
            latitude: read_i32(payload, 28),
            height_msl_mm: read_i32(payload, 36),
        })
    }

    /// Copy every field into `fix`
    pub fn apply(&self, fix: &mut Fix) {
        fix.time = self.time;
        fix.fix_type = self.fix_type;
        fix.num_svs = self.num_svs;
        fix.longitude = self.longitude;
        fix.latitude = self.latitude;
        fix.altitude = altitude_from_mm(self.height_msl_mm);
    }
}

/// NAV-POSLLH: geodetic position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPosllh {
    /// Longitude, degrees * 1e7
    pub longitude: i32,
    /// Latitude, degrees * 1e7
    pub latitude: i32,
    /// Height above mean sea level, mm
    pub height_msl_mm: i32,
}

impl NavPosllh {
    /// Payload length
    pub const LEN: usize = 28;

    /// Parse a NAV-POSLLH payload
    pub fn parse(payload: &[u8]) -> Result<Self, DecodeError> {
        require(payload, Self::LEN)?;
        Ok(Self {
            longitude: read_i32(payload, 4),
            latitude: read_i32(payload, 8),
            height_msl_mm: read_i32(payload, 16),
        })
    }

    /// Copy position and altitude into `fix`
    pub fn apply(&self, fix: &mut Fix) {
        fix.longitude = self.longitude;
        fix.latitude = self.latitude;
        fix.altitude = altitude_from_mm(self.height_msl_mm);
    }
}

/// NAV-SOL: solution quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSol {
    /// Fix type code
    pub fix_type: u8,
    /// Satellites used
    pub num_svs: u8,
}

impl NavSol {
    /// Payload length
    pub const LEN: usize = 52;

    /// Parse a NAV-SOL payload
    pub fn parse(payload: &[u8]) -> Result<Self, DecodeError> {
        require(payload, Self::LEN)?;
        Ok(Self {
            fix_type: payload[10],
            num_svs: payload[47],
        })
    }

    /// Copy fix type and satellite count into `fix`
    pub fn apply(&self, fix: &mut Fix) {
        fix.fix_type = self.fix_type;
        fix.num_svs = self.num_svs;
    }
}

/// NAV-TIMEUTC: UTC time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTimeUtc {
    /// UTC time
    pub time: FixTime,
}

impl NavTimeUtc {
    /// Payload length
    pub const LEN: usize = 20;

    /// Parse a NAV-TIMEUTC payload
    pub fn parse(payload: &[u8]) -> Result<Self, DecodeError> {
        require(payload, Self::LEN)?;
        Ok(Self {
            time: read_time(payload, 12),
        })
    }

    /// Copy the time into `fix`
    pub fn apply(&self, fix: &mut Fix) {
        fix.time = self.time;
    }
}
