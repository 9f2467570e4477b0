//! embedded-hal 1.0 adapters
//!
//! Wraps any board's `embedded_hal` I2C bus and digital pins so they can be
//! handed to the GNSS driver. Board support crates only need to build the
//! HAL peripherals; error mapping to [`PlatformError`] happens here.
//!
//! # Example
//!
//! ```ignore
//! use balloon_tracker::platform::hal::{HalI2c, HalInputPin, HalOutputPin};
//!
//! let i2c = HalI2c::new(board_i2c);
//! let enable = HalOutputPin::new(board_gps_enable);
//! let timepulse = HalInputPin::new(board_gps_timepulse);
//! ```

use crate::platform::{
    error::{GpioError, I2cError, PlatformError},
    traits::{GpioInterface, I2cInterface},
    Result,
};
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

/// I2C bus adapter over `embedded_hal::i2c::I2c`
pub struct HalI2c<I> {
    bus: I,
}

impl<I: I2c> HalI2c<I> {
    /// Wrap a HAL I2C bus
    pub fn new(bus: I) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn release(self) -> I {
        self.bus
    }
}

impl<I: I2c> I2cInterface for HalI2c<I> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.bus
            .write(addr, data)
            .map_err(|e| map_i2c_error(e.kind()))
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.bus
            .read(addr, buffer)
            .map_err(|e| map_i2c_error(e.kind()))
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.bus
            .write_read(addr, write_data, read_buffer)
            .map_err(|e| map_i2c_error(e.kind()))
    }
}

/// Map HAL I2C error kinds to platform I2C errors
fn map_i2c_error(kind: ErrorKind) -> PlatformError {
    match kind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => {
            PlatformError::I2c(I2cError::Nack)
        }
        ErrorKind::ArbitrationLoss => PlatformError::I2c(I2cError::ArbitrationLost),
        _ => PlatformError::I2c(I2cError::BusError),
    }
}

/// Output pin adapter over `embedded_hal::digital::OutputPin`
pub struct HalOutputPin<P> {
    pin: P,
}

impl<P: OutputPin> HalOutputPin<P> {
    /// Wrap a HAL output pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> GpioInterface for HalOutputPin<P> {
    fn set_high(&mut self) -> Result<()> {
        self.pin
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }

    fn read(&mut self) -> bool {
        false
    }
}

/// Input pin adapter over `embedded_hal::digital::InputPin`
pub struct HalInputPin<P> {
    pin: P,
}

impl<P: InputPin> HalInputPin<P> {
    /// Wrap a HAL input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> GpioInterface for HalInputPin<P> {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn read(&mut self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }
}
