//! Platform abstraction layer
//!
//! This module provides the hardware services the GNSS driver consumes: an
//! I2C bus for the receiver's DDC port, GPIO pins for power sequencing and the
//! timepulse input, and a timer for time budgets and sleeps. All
//! platform-specific code must be isolated to this module.

pub mod error;
pub mod hal;
pub mod traits;

#[cfg(feature = "embassy")]
pub mod embassy;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, I2cInterface, TimerInterface};
