//! MCU clock measurement against the GPS timepulse
//!
//! With a lock, the receiver drives its timepulse pin high for 100 ms at the
//! start of every UTC second. Counting busy-loop iterations over one full
//! high+low period and multiplying by the cycles one iteration costs gives
//! the MCU core frequency in Hz, to within one iteration.
//!
//! The count runs inside a critical section so that no interrupt stretches
//! the loop. Without a lock the pin never toggles and the measurement gives
//! up after a fixed iteration budget.

use crate::platform::traits::GpioInterface;

/// CPU cycles per polling iteration of the counting loop
pub const DEFAULT_CYCLES_PER_ITERATION: u32 = 9;

/// Iterations spent at most on one measurement (about 1.3 s at 216 MHz)
pub const DEFAULT_TIMEOUT_ITERATIONS: u32 = 32_000_000;

/// Timepulse-based frequency counter
pub struct TimepulseCounter<P: GpioInterface> {
    pin: P,
    cycles_per_iteration: u32,
    timeout_iterations: u32,
}

impl<P: GpioInterface> TimepulseCounter<P> {
    /// Create a counter on the timepulse input pin
    pub fn new(pin: P) -> Self {
        Self::with_calibration(pin, DEFAULT_CYCLES_PER_ITERATION, DEFAULT_TIMEOUT_ITERATIONS)
    }

    /// Create a counter with an explicit loop cost and iteration budget
    pub fn with_calibration(pin: P, cycles_per_iteration: u32, timeout_iterations: u32) -> Self {
        Self {
            pin,
            cycles_per_iteration,
            timeout_iterations,
        }
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }

    /// Measure the MCU frequency in Hz
    ///
    /// Blocks with interrupts disabled for up to two timepulse periods.
    /// Returns `None` if the pin did not complete a period within the
    /// iteration budget (no lock, or receiver off).
    pub fn measure_frequency(&mut self) -> Option<u32> {
        let frequency = critical_section::with(|_| self.count_period());
        match frequency {
            Some(hz) => crate::log_info!("GPS: MCU frequency {} Hz", hz),
            None => crate::log_warn!("GPS: Timepulse measurement timed out"),
        }
        frequency
    }

    fn count_period(&mut self) -> Option<u32> {
        let mut budget = self.timeout_iterations;

        // Sync to the next rising edge
        self.count_while(true, &mut budget)?;
        self.count_while(false, &mut budget)?;

        let high = self.count_while(true, &mut budget)?;
        let low = self.count_while(false, &mut budget)?;
        Some((high + low).saturating_mul(self.cycles_per_iteration))
    }

    /// Count reads while the pin stays at `level`
    fn count_while(&mut self, level: bool, budget: &mut u32) -> Option<u32> {
        let mut count: u32 = 0;
        while self.pin.read() == level {
            if *budget == 0 {
                return None;
            }
            *budget -= 1;
            count += 1;
        }
        Some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockGpio;

    #[test]
    fn test_measure_full_period() {
        // Mid-pulse start, then one 100/900 period. The read that ends a
        // phase is the first sample of the next one.
        let pin = MockGpio::with_input(&[
            (true, 5),
            (false, 3),
            (true, 100),
            (false, 900),
            (true, 10),
        ]);
        let mut counter = TimepulseCounter::new(pin);

        assert_eq!(counter.measure_frequency(), Some((99 + 899) * 9));
    }

    #[test]
    fn test_scaled_to_real_clock() {
        // 48 MHz core, 9 cycles per iteration: 5_333_333 iterations per second
        let pin = MockGpio::with_input(&[
            (false, 1),
            (true, 533_334),
            (false, 4_800_001),
            (true, 1),
        ]);
        let mut counter = TimepulseCounter::new(pin);

        assert_eq!(counter.measure_frequency(), Some(47_999_997));
    }

    #[test]
    fn test_timeout_without_pulse() {
        let pin = MockGpio::new();
        let mut counter = TimepulseCounter::with_calibration(pin, 9, 1000);
        assert_eq!(counter.measure_frequency(), None);
    }

    #[test]
    fn test_timeout_mid_period() {
        let pin = MockGpio::with_input(&[(false, 2), (true, 50), (false, 5000)]);
        let mut counter = TimepulseCounter::with_calibration(pin, 9, 1000);
        assert_eq!(counter.measure_frequency(), None);
    }
}
