//! Mock GPIO implementation for testing

use crate::platform::{traits::GpioInterface, Result};
use std::collections::VecDeque;
use std::vec::Vec;

/// Mock GPIO implementation
///
/// As an output it tracks the driven level and keeps every transition for
/// test verification. As an input it replays a script of `(level, samples)`
/// runs, one sample per [`read`](GpioInterface::read), then holds the last
/// driven level.
#[derive(Debug, Default)]
pub struct MockGpio {
    level: bool,
    history: Vec<bool>,
    script: VecDeque<(bool, u32)>,
}

impl MockGpio {
    /// Create a new mock GPIO, low
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input that replays `runs`
    pub fn with_input(runs: &[(bool, u32)]) -> Self {
        let mut gpio = Self::new();
        for &(level, samples) in runs {
            gpio.push_input(level, samples);
        }
        gpio
    }

    /// Append a run of `samples` reads at `level`
    pub fn push_input(&mut self, level: bool, samples: u32) {
        if samples > 0 {
            self.script.push_back((level, samples));
        }
    }

    /// Every level driven through `set_high`/`set_low`, in order
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    /// Current driven level
    pub fn is_high(&self) -> bool {
        self.level
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        self.level = true;
        self.history.push(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.level = false;
        self.history.push(false);
        Ok(())
    }

    fn read(&mut self) -> bool {
        match self.script.front_mut() {
            Some((level, remaining)) => {
                let level = *level;
                *remaining -= 1;
                if *remaining == 0 {
                    self.script.pop_front();
                }
                level
            }
            None => self.level,
        }
    }
}
