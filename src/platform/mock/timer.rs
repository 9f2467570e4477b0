//! Mock Timer implementation for testing

use crate::platform::error::{PlatformError, TimerError};
use crate::platform::{traits::TimerInterface, Result};

/// Mock Timer implementation
///
/// Simulated clock: delays advance `now_us` instantly, so a 1 s timeout
/// loop completes in microseconds of test time while observing exactly the
/// same clock values the hardware would.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
    delayed_us: u64,
    fail_delays: bool,
}

impl MockTimer {
    /// Create a new mock timer at time zero
    pub fn new() -> Self {
        Self::starting_at_ms(0)
    }

    /// Create a mock timer whose clock starts at `ms`
    pub fn starting_at_ms(ms: u64) -> Self {
        Self {
            now_us: ms * 1000,
            delayed_us: 0,
            fail_delays: false,
        }
    }

    /// Move the clock without counting it as a delay
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_us = self.now_us.wrapping_add(ms * 1000);
    }

    /// Make every following delay fail without moving the clock
    pub fn fail_delays(&mut self, fail: bool) {
        self.fail_delays = fail;
    }

    /// Total time spent in `delay_us`/`delay_ms`, in milliseconds
    pub fn delayed_ms(&self) -> u64 {
        self.delayed_us / 1000
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        if self.fail_delays {
            return Err(PlatformError::Timer(TimerError::DelayFailed));
        }
        self.now_us = self.now_us.wrapping_add(us as u64);
        self.delayed_us = self.delayed_us.wrapping_add(us as u64);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}
