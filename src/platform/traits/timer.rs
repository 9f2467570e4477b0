//! Timer interface trait
//!
//! Monotonic clock and blocking delays. Every time budget in the GNSS driver
//! is measured against `now_us`, and every "nothing to read yet" branch
//! sleeps through `delay_ms`, so a mock timer makes timeouts deterministic.

use crate::platform::Result;

/// Timer interface trait
pub trait TimerInterface {
    /// Block the calling task for `us` microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the duration cannot be represented.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block the calling task for `ms` milliseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the duration cannot be represented.
    fn delay_ms(&mut self, ms: u32) -> Result<()>;

    /// Microseconds since system start
    fn now_us(&self) -> u64;

    /// Milliseconds since system start
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
