//! Byte transport to the receiver
//!
//! The UBX engine needs only three primitives from the bus: send a buffer,
//! read one byte, and ask how many bytes are waiting. [`DdcTransport`]
//! provides them over the u-blox DDC port (I2C):
//!
//! | Register | Access | Content                                  |
//! |----------|--------|------------------------------------------|
//! | `0xFD`   | read 2 | bytes available, big-endian              |
//! | `0xFF`   | read n | message stream (`0xFF` when empty)       |
//! | -        | write  | UBX frames written without a register    |

use crate::platform::{traits::I2cInterface, Result};

/// Default 7-bit DDC address of u-blox receivers
pub const DEFAULT_DDC_ADDRESS: u8 = 0x42;

/// Bytes-available register (2 bytes, big-endian)
const REG_BYTES_AVAILABLE: u8 = 0xFD;
/// Data stream register
const REG_STREAM: u8 = 0xFF;

/// Raw byte access to the receiver
pub trait UbxTransport {
    /// Send `data` to the receiver
    ///
    /// # Errors
    ///
    /// Returns the platform error if the bus transfer fails.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read the next byte of the receiver output stream
    ///
    /// Failed reads yield `0`.
    fn read_byte(&mut self) -> u8;

    /// Number of bytes waiting in the receiver output stream
    ///
    /// Failed reads yield `0`, so callers treat a bus error like an empty
    /// stream and keep polling until their time budget runs out.
    fn bytes_available(&mut self) -> u16;
}

/// u-blox DDC (I2C) transport
pub struct DdcTransport<I: I2cInterface> {
    i2c: I,
    address: u8,
}

impl<I: I2cInterface> DdcTransport<I> {
    /// Create a transport for the receiver at `address`
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Get mutable reference to the I2C interface
    pub fn i2c_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Release the I2C interface
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cInterface> UbxTransport for DdcTransport<I> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.i2c.write(self.address, data)
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        match self.i2c.write_read(self.address, &[REG_STREAM], &mut byte) {
            Ok(()) => byte[0],
            Err(_) => {
                crate::log_trace!("GPS: DDC stream read failed");
                0
            }
        }
    }

    fn bytes_available(&mut self) -> u16 {
        let mut count = [0u8; 2];
        match self
            .i2c
            .write_read(self.address, &[REG_BYTES_AVAILABLE], &mut count)
        {
            Ok(()) => u16::from_be_bytes(count),
            Err(_) => {
                crate::log_trace!("GPS: DDC length read failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::{I2cError, PlatformError};
    use crate::platform::mock::{I2cTransaction, MockI2c};

    #[test]
    fn test_ddc_bytes_available_register() {
        let mut i2c = MockI2c::new();
        i2c.push_stream(&[0xAA; 0x0123]);
        let mut ddc = DdcTransport::new(i2c, DEFAULT_DDC_ADDRESS);

        assert_eq!(ddc.bytes_available(), 0x0123);
        assert_eq!(
            ddc.i2c_mut().transactions()[0],
            I2cTransaction::WriteRead {
                addr: 0x42,
                write_data: vec![0xFD],
                read_len: 2
            }
        );
    }

    #[test]
    fn test_ddc_read_byte_from_stream() {
        let mut i2c = MockI2c::new();
        i2c.push_stream(&[0xB5, 0x62]);
        let mut ddc = DdcTransport::new(i2c, DEFAULT_DDC_ADDRESS);

        assert_eq!(ddc.read_byte(), 0xB5);
        assert_eq!(ddc.read_byte(), 0x62);
        assert_eq!(ddc.read_byte(), 0xFF);
        assert!(matches!(
            ddc.i2c_mut().transactions()[0],
            I2cTransaction::WriteRead { addr: 0x42, ref write_data, read_len: 1 } if write_data == &[0xFF]
        ));
    }

    #[test]
    fn test_ddc_write_goes_to_device_address() {
        let mut ddc = DdcTransport::new(MockI2c::new(), 0x43);
        ddc.write(&[0xB5, 0x62, 0x01, 0x07, 0x00, 0x00, 0x08, 0x19])
            .unwrap();

        assert_eq!(ddc.address(), 0x43);
        assert_eq!(
            ddc.release().transactions()[0],
            I2cTransaction::Write {
                addr: 0x43,
                data: vec![0xB5, 0x62, 0x01, 0x07, 0x00, 0x00, 0x08, 0x19]
            }
        );
    }

    #[test]
    fn test_ddc_bus_errors_read_as_zero() {
        let mut i2c = MockI2c::new();
        i2c.push_stream(&[0xB5]);
        i2c.fail_reads(I2cError::Nack);
        i2c.fail_writes(I2cError::BusError);
        let mut ddc = DdcTransport::new(i2c, DEFAULT_DDC_ADDRESS);

        assert_eq!(ddc.bytes_available(), 0);
        assert_eq!(ddc.read_byte(), 0);
        assert_eq!(
            ddc.write(&[0x00]),
            Err(PlatformError::I2c(I2cError::BusError))
        );
    }
}
