//! Receiver lifecycle
//!
//! ```text
//! Uninitialized -> PoweredOn -> Configured -> Polling <-> Idle -> PoweredOff
//! ```
//!
//! Power sequencing drives the enable and reset pins, configuration sends the
//! generation's ACK-gated command table, and fix acquisition delegates to the
//! selected [`FixProtocol`]. Configuration is fail-soft: every step is
//! attempted and the overall result is the AND of the steps.

use super::config::{GpsConfig, ProtocolVariant};
use super::port::{PortStats, UbxLink, UbxPort};
use super::protocol::{FixProtocol, FixReport};
use super::transport::UbxTransport;
use super::GpsError;
use crate::platform::traits::{GpioInterface, TimerInterface};
use tracker_core::nav::Fix;
use tracker_core::ubx::commands::{CONTINUOUS_MODE, POWER_SAVE_MODE};

/// Lifecycle state of the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverState {
    /// Never powered in this session
    Uninitialized,
    /// Powered and settled, not configured yet
    PoweredOn,
    /// Configuration sequence sent
    Configured,
    /// Fix acquisition in progress
    Polling,
    /// Between fix acquisitions
    Idle,
    /// Enable pin released
    PoweredOff,
}

impl ReceiverState {
    /// Whether the receiver is supplied and can answer commands
    pub fn is_powered(self) -> bool {
        !matches!(self, ReceiverState::Uninitialized | ReceiverState::PoweredOff)
    }
}

/// u-blox receiver driver
///
/// Generic over the byte transport, the timer and the GPIO type of the
/// enable and reset pins, so it runs unchanged against the mocks.
pub struct GpsReceiver<T: UbxTransport, C: TimerInterface, P: GpioInterface> {
    port: UbxPort<T, C>,
    enable: P,
    reset: P,
    protocol: &'static dyn FixProtocol,
    config: GpsConfig,
    state: ReceiverState,
}

impl<T: UbxTransport, C: TimerInterface, P: GpioInterface> GpsReceiver<T, C, P> {
    /// Create a receiver driver
    ///
    /// # Arguments
    ///
    /// * `transport` - Byte transport to the receiver
    /// * `timer` - Clock and sleep for every time budget
    /// * `enable` - Power enable pin (high = on)
    /// * `reset` - Reset pin (low = held in reset)
    /// * `config` - Timing and protocol configuration
    pub fn new(transport: T, timer: C, enable: P, reset: P, config: GpsConfig) -> Self {
        Self {
            port: UbxPort::new(transport, timer, config.ack_poll_ms, config.payload_poll_ms),
            enable,
            reset,
            protocol: config.variant.protocol(),
            config,
            state: ReceiverState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ReceiverState {
        self.state
    }

    /// Protocol generation in use
    pub fn variant(&self) -> ProtocolVariant {
        self.protocol.variant()
    }

    /// Configuration in use
    pub fn config(&self) -> &GpsConfig {
        &self.config
    }

    /// Get port statistics
    pub fn stats(&self) -> PortStats {
        self.port.stats()
    }

    /// Get mutable reference to the UBX port
    pub fn port_mut(&mut self) -> &mut UbxPort<T, C> {
        &mut self.port
    }

    /// Milliseconds on the receiver's clock
    pub fn now_ms(&self) -> u64 {
        self.port.timer().now_ms()
    }

    /// Sleep on the receiver's clock
    ///
    /// # Errors
    ///
    /// Returns an error if the timer fails.
    pub fn delay_ms(&mut self, ms: u32) -> Result<(), GpsError> {
        self.port.timer_mut().delay_ms(ms)?;
        Ok(())
    }

    /// Get mutable references to the enable and reset pins
    pub fn pins_mut(&mut self) -> (&mut P, &mut P) {
        (&mut self.enable, &mut self.reset)
    }

    /// Switch the receiver on and wait for it to boot
    ///
    /// Asserts enable, releases reset, then sleeps for the settle delay.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the timer fails.
    pub fn power_on(&mut self) -> Result<(), GpsError> {
        crate::log_info!("GPS: Switch on");
        self.enable.set_high()?;
        self.reset.set_high()?;
        self.port.timer_mut().delay_ms(self.config.settle_delay_ms)?;
        self.state = ReceiverState::PoweredOn;
        Ok(())
    }

    /// Send the configuration sequence
    ///
    /// Every step is attempted even after a failure. Returns `true` only if
    /// every step was acknowledged. A receiver that is not powered is left
    /// untouched and reports `false`.
    pub fn configure(&mut self) -> bool {
        if !self.state.is_powered() {
            crate::log_warn!("GPS: configure while powered off");
            return false;
        }

        let mut all_ok = true;
        for step in self.protocol.configuration() {
            let ok = self.port.transact(&step.command, self.config.ack_timeout_ms);
            if ok {
                crate::log_info!("GPS: {} OK", step.name);
            } else {
                crate::log_error!("GPS: {} FAILED", step.name);
            }
            all_ok &= ok;
        }
        self.state = ReceiverState::Configured;
        all_ok
    }

    /// Power on and configure
    ///
    /// Returns whether every configuration step was acknowledged.
    ///
    /// # Errors
    ///
    /// Returns an error if power sequencing fails.
    pub fn init(&mut self) -> Result<bool, GpsError> {
        self.power_on()?;
        let configured = self.configure();
        crate::log_info!(
            "GPS: {} receiver init {}",
            self.protocol.variant().as_str(),
            if configured { "OK" } else { "FAILED" }
        );
        Ok(configured)
    }

    /// Switch between cyclic power save and continuous mode
    ///
    /// Returns whether the receiver acknowledged the change.
    pub fn set_power_save(&mut self, on: bool) -> bool {
        let command = if on { &POWER_SAVE_MODE } else { &CONTINUOUS_MODE };
        let ok = self.port.transact(command, self.config.ack_timeout_ms);
        crate::log_info!(
            "GPS: {} power save {}",
            if on { "Enable" } else { "Disable" },
            if ok { "OK" } else { "FAILED" }
        );
        ok
    }

    /// Lock predicate: 3D solution with enough satellites
    pub fn is_locked(&self, fix: &Fix) -> bool {
        fix.fix_kind().has_3d_position() && fix.num_svs >= self.config.min_satellites
    }

    /// Poll the receiver for one fix
    ///
    /// `fix.valid` is set when every poll succeeded and the lock predicate
    /// holds. A receiver that is not powered returns a failed report without
    /// touching the bus.
    pub fn acquire_fix(&mut self) -> FixReport {
        if !self.state.is_powered() {
            crate::log_warn!("GPS: acquire fix while powered off");
            return FixReport::default();
        }

        self.state = ReceiverState::Polling;
        let mut report = self
            .protocol
            .acquire(&mut self.port, self.config.payload_timeout_ms);
        report.fix.valid = report.success && self.is_locked(&report.fix);
        self.state = ReceiverState::Idle;
        report
    }

    /// Switch the receiver off
    ///
    /// Releases the enable pin; receiver configuration is not saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin fails.
    pub fn power_off(&mut self) -> Result<(), GpsError> {
        crate::log_info!("GPS: Switch off");
        self.enable.set_low()?;
        self.state = ReceiverState::PoweredOff;
        Ok(())
    }
}
