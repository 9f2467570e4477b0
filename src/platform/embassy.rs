//! Embassy time driver adapter
//!
//! Implements [`TimerInterface`] on top of `embassy-time`'s global time
//! driver. Delays busy-wait with `block_for`, matching the blocking receiver
//! protocol; run the GNSS driver from a task that may block.

use crate::platform::{traits::TimerInterface, Result};
use embassy_time::{block_for, Duration, Instant};

/// Timer backed by the embassy time driver
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

impl EmbassyTimer {
    /// Create a new timer handle
    pub fn new() -> Self {
        Self
    }
}

impl TimerInterface for EmbassyTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        block_for(Duration::from_micros(us as u64));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        block_for(Duration::from_millis(ms as u64));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
