//! GPS receiver driver (u-blox UBX protocol over DDC)
//!
//! Platform-independent driver for the tracker's u-blox receiver, built on
//! the platform abstraction traits and the pure protocol logic in
//! `tracker_core::ubx`/`tracker_core::nav`.
//!
//! # Layers
//!
//! - [`transport`]: `UbxTransport` byte access, `DdcTransport` over I2C
//! - [`port`]: `UbxPort`, time-budgeted ACK and payload waits
//! - [`protocol`]: Gen1 (u-blox 6) and Gen2 (u-blox 7/8) fix acquisition
//! - [`receiver`]: power sequencing, configuration, fix entry point
//! - [`config`]: timing budgets and protocol selection
//!
//! # Example
//!
//! ```ignore
//! use balloon_tracker::devices::gps::{DdcTransport, GpsConfig, GpsReceiver};
//!
//! let config = GpsConfig::default();
//! let transport = DdcTransport::new(i2c, config.ddc_address);
//! let mut gps = GpsReceiver::new(transport, timer, enable_pin, reset_pin, config);
//!
//! gps.init()?;
//! let report = gps.acquire_fix();
//! if report.fix.valid {
//!     log_info!("Lat: {}, Lon: {}", report.fix.latitude, report.fix.longitude);
//! }
//! ```

use crate::platform::PlatformError;
use core::fmt;
use tracker_core::ubx::UbxError;

pub mod config;
pub mod port;
pub mod protocol;
pub mod receiver;
pub mod transport;

pub use config::{GpsConfig, ProtocolVariant};
pub use port::{PortStats, UbxLink, UbxPort};
pub use protocol::{FixProtocol, FixReport, Gen1Protocol, Gen2Protocol};
pub use receiver::{GpsReceiver, ReceiverState};
pub use tracker_core::nav::{Fix, FixTime, FixType};
pub use transport::{DdcTransport, UbxTransport, DEFAULT_DDC_ADDRESS};

/// GPS driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsError {
    /// Bus, pin or timer failure
    Platform(PlatformError),
    /// UBX protocol failure
    Ubx(UbxError),
}

impl From<PlatformError> for GpsError {
    fn from(error: PlatformError) -> Self {
        GpsError::Platform(error)
    }
}

impl From<UbxError> for GpsError {
    fn from(error: UbxError) -> Self {
        GpsError::Ubx(error)
    }
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::Platform(e) => write!(f, "GPS platform error: {}", e),
            GpsError::Ubx(e) => write!(f, "GPS protocol error: {}", e),
        }
    }
}

/// Wire-level frame builders for tests
#[cfg(test)]
pub(crate) mod testing {
    use std::vec::Vec;
    use tracker_core::ubx::ubx_checksum;

    /// Complete UBX frame with a valid checksum
    pub fn ubx_frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
        let len = (payload.len() as u16).to_le_bytes();
        let mut frame = std::vec![0xB5, 0x62, class, id, len[0], len[1]];
        frame.extend_from_slice(payload);
        let (ck_a, ck_b) = ubx_checksum(&frame[2..]);
        frame.push(ck_a);
        frame.push(ck_b);
        frame
    }

    /// ACK-ACK for a command
    pub fn ack(class: u8, id: u8) -> Vec<u8> {
        ubx_frame(0x05, 0x01, &[class, id])
    }

    /// ACK-NAK for a command
    pub fn nak(class: u8, id: u8) -> Vec<u8> {
        ubx_frame(0x05, 0x00, &[class, id])
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::platform::error::I2cError;
    use std::string::ToString;

    #[test]
    fn test_ack_frame_checksum() {
        assert_eq!(
            ack(0x06, 0x00),
            std::vec![0xB5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x00, 0x0E, 0x37]
        );
        assert_eq!(
            nak(0x06, 0x00),
            std::vec![0xB5, 0x62, 0x05, 0x00, 0x02, 0x00, 0x06, 0x00, 0x0D, 0x32]
        );
    }

    #[test]
    fn test_error_conversions() {
        let platform: GpsError = PlatformError::I2c(I2cError::Nack).into();
        assert_eq!(platform, GpsError::Platform(PlatformError::I2c(I2cError::Nack)));

        let ubx: GpsError = UbxError::BufferCapacityExceeded {
            declared: 100,
            capacity: 92,
        }
        .into();
        assert_eq!(
            ubx.to_string(),
            "GPS protocol error: UBX payload of 100 bytes exceeds buffer capacity 92"
        );
    }
}
