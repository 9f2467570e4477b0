//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use balloon_tracker::platform::mock::{MockI2c, MockTimer};
//!
//! let mut i2c = MockI2c::new();
//! i2c.push_stream(&[0xB5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x24, 0x32, 0x5B]);
//! let timer = MockTimer::new();
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod i2c;
mod timer;

pub use gpio::MockGpio;
pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
