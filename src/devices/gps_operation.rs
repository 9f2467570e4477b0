//! GPS tracking cycle
//!
//! Runs one position search per tracking cycle: switch the receiver on and
//! configure it, poll for a fix until the receiver reports a lock or the
//! cycle's search budget runs out, then switch it off again once locked.
//!
//! # Architecture
//!
//! - `GpsOperation`: owns the `GpsReceiver` and drives one search per call
//! - `GpsState`: latest fix, lock flag and timestamp for the rest of the
//!   firmware (telemetry encoding, clock setting)
//! - `SearchOutcome`: result of one search, including time to first fix
//!
//! The search ends 2 s before the cycle does so that the caller keeps its
//! cycle period.

use crate::devices::gps::{GpsError, GpsReceiver, UbxTransport};
use crate::platform::traits::{GpioInterface, TimerInterface};
use tracker_core::nav::Fix;

/// Part of each cycle reserved for the caller after the search (ms)
pub const CYCLE_MARGIN_MS: u32 = 2000;

/// Result of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Last fix received (a lock if `locked`)
    pub fix: Fix,
    /// Lock predicate held for `fix`
    pub locked: bool,
    /// Time from search start to the end of the search (ms)
    pub ttff_ms: u64,
    /// Fix polls performed
    pub polls: u32,
}

/// GPS state for the rest of the firmware
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpsState {
    /// Latest fix (None before the first search)
    pub fix: Option<Fix>,
    /// Latest search ended with a lock
    pub locked: bool,
    /// Receiver clock when the state was last updated (ms)
    pub last_update_ms: u64,
}

/// GPS tracking cycle manager
pub struct GpsOperation<T: UbxTransport, C: TimerInterface, P: GpioInterface> {
    gps: GpsReceiver<T, C, P>,
    state: GpsState,
}

impl<T: UbxTransport, C: TimerInterface, P: GpioInterface> GpsOperation<T, C, P> {
    /// Create a new tracking cycle manager
    ///
    /// # Arguments
    ///
    /// * `gps` - Receiver driver
    pub fn new(gps: GpsReceiver<T, C, P>) -> Self {
        Self {
            gps,
            state: GpsState::default(),
        }
    }

    /// Get current GPS state
    pub fn state(&self) -> GpsState {
        self.state
    }

    /// Get mutable reference to the receiver
    pub fn receiver_mut(&mut self) -> &mut GpsReceiver<T, C, P> {
        &mut self.gps
    }

    /// Search for a fix within one tracking cycle of `cycle_ms`
    ///
    /// Polls every `fix_retry_ms` until a lock or until `cycle_ms - 2 s`
    /// has elapsed. A locked receiver is switched off; without a lock it
    /// stays on so the next cycle starts warm.
    ///
    /// # Errors
    ///
    /// Returns an error if power sequencing or the timer fails.
    pub fn search(&mut self, cycle_ms: u32) -> Result<SearchOutcome, GpsError> {
        let start = self.gps.now_ms();
        let budget = cycle_ms.saturating_sub(CYCLE_MARGIN_MS) as u64;
        let retry_ms = self.gps.config().fix_retry_ms;

        crate::log_info!("GPS: Search start, budget {} ms", budget);
        if !self.gps.init()? {
            crate::log_warn!("GPS: Configuration incomplete, searching anyway");
        }

        let mut polls: u32 = 0;
        let fix = loop {
            self.gps.delay_ms(retry_ms)?;
            let report = self.gps.acquire_fix();
            polls += 1;
            if report.success {
                crate::log_info!("GPS: Polling OK");
            } else {
                crate::log_error!("GPS: Polling FAILED");
            }

            if report.fix.valid || self.gps.now_ms().saturating_sub(start) > budget {
                break report.fix;
            }
        };

        let ttff_ms = self.gps.now_ms().saturating_sub(start);
        if fix.valid {
            self.gps.power_off()?;
            crate::log_info!("GPS: Search finished with lock, TTFF {} ms", ttff_ms);
        } else {
            crate::log_warn!("GPS: Search finished without lock");
        }

        self.state = GpsState {
            fix: Some(fix),
            locked: fix.valid,
            last_update_ms: self.gps.now_ms(),
        };

        Ok(SearchOutcome {
            fix,
            locked: fix.valid,
            ttff_ms,
            polls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::gps::testing::{ack, ubx_frame};
    use crate::devices::gps::{DdcTransport, GpsConfig, ProtocolVariant, ReceiverState};
    use crate::platform::mock::{MockGpio, MockI2c, MockTimer};
    use std::vec::Vec;
    use tracker_core::ubx::commands::{POLL_NAV_PVT, PVT_RECEIVER_SEQUENCE};
    use tracker_core::ubx::CommandFrame;

    type TestOperation = GpsOperation<DdcTransport<MockI2c>, MockTimer, MockGpio>;

    fn wire(frame: &CommandFrame) -> Vec<u8> {
        frame.bytes().collect()
    }

    fn configured_i2c() -> MockI2c {
        let mut i2c = MockI2c::new();
        for step in PVT_RECEIVER_SEQUENCE {
            i2c.on_write(&wire(&step.command), &ack(step.command.class, step.command.id));
        }
        i2c
    }

    fn operation(i2c: MockI2c) -> TestOperation {
        GpsOperation::new(GpsReceiver::new(
            DdcTransport::new(i2c, 0x42),
            MockTimer::new(),
            MockGpio::new(),
            MockGpio::new(),
            GpsConfig::for_variant(ProtocolVariant::Gen2),
        ))
    }

    fn pvt(fix_type: u8, num_svs: u8) -> Vec<u8> {
        let mut p = [0u8; 92];
        p[20] = fix_type;
        p[23] = num_svs;
        p[36..40].copy_from_slice(&25_000_000i32.to_le_bytes());
        ubx_frame(0x01, 0x07, &p)
    }

    #[test]
    fn test_search_locks_and_powers_off() {
        let mut i2c = configured_i2c();
        i2c.on_write(&wire(&POLL_NAV_PVT), &pvt(3, 9));
        let mut op = operation(i2c);

        let outcome = op.search(60_000).unwrap();
        assert!(outcome.locked);
        assert_eq!(outcome.polls, 1);
        assert_eq!(outcome.fix.altitude, 25_000);
        // Settle delay plus one retry interval
        assert_eq!(outcome.ttff_ms, 3100);
        assert_eq!(op.receiver_mut().state(), ReceiverState::PoweredOff);

        let state = op.state();
        assert!(state.locked);
        assert_eq!(state.fix, Some(outcome.fix));
    }

    #[test]
    fn test_search_without_lock_respects_budget() {
        let mut i2c = configured_i2c();
        i2c.on_write(&wire(&POLL_NAV_PVT), &pvt(2, 3));
        let mut op = operation(i2c);

        let outcome = op.search(10_000).unwrap();
        assert!(!outcome.locked);
        assert!(outcome.polls > 1);
        // Budget is cycle minus margin, overrun by at most one poll interval
        assert!(outcome.ttff_ms > 8_000);
        assert!(outcome.ttff_ms <= 8_000 + 100);
        assert_eq!(op.receiver_mut().state(), ReceiverState::Idle);
        assert!(!op.state().locked);
    }

    #[test]
    fn test_search_silent_receiver_terminates() {
        let mut op = operation(MockI2c::new());

        let outcome = op.search(10_000).unwrap();
        assert!(!outcome.locked);
        assert!(outcome.polls >= 1);
        assert_eq!(outcome.fix, Fix::default());
    }

    #[test]
    fn test_state_default() {
        let op = operation(MockI2c::new());
        assert_eq!(op.state(), GpsState::default());
        assert!(op.state().fix.is_none());
    }
}
