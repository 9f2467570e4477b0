//! Time-budgeted UBX exchanges
//!
//! [`UbxPort`] drives the byte-level matchers from `tracker_core::ubx`
//! against a [`UbxTransport`], sleeping on the injected timer whenever the
//! receiver has nothing to say. Every wait is bounded by a caller-supplied
//! budget measured on the same timer.

use super::transport::UbxTransport;
use super::GpsError;
use crate::platform::traits::TimerInterface;
use tracker_core::ubx::{AckMatcher, AckOutcome, CommandFrame, DemuxEvent, PayloadDemux, UbxError};

/// Port statistics for monitoring and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortStats {
    /// Frames sent to the receiver
    pub frames_sent: u32,
    /// Target payload frames received intact
    pub frames_received: u32,
    /// Target frames dropped for a bad checksum
    pub checksum_failures: u32,
    /// Commands acknowledged
    pub acks: u32,
    /// Commands rejected
    pub naks: u32,
    /// Waits that ran out of time
    pub timeouts: u32,
}

/// Command/response link to a UBX receiver
///
/// Object safe, so fix protocols can be written once against `dyn UbxLink`.
pub trait UbxLink {
    /// Encode and send one command frame
    ///
    /// # Errors
    ///
    /// Returns [`GpsError::Platform`] if the transport write fails.
    fn send(&mut self, frame: &CommandFrame) -> Result<(), GpsError>;

    /// Milliseconds on the clock that bounds every wait
    fn now_ms(&self) -> u64;

    /// Wait up to `timeout_ms` for the ACK/NAK answering `class`/`id`
    ///
    /// Returns `true` only for an ACK; a NAK and a timeout both yield `false`.
    fn receive_ack(&mut self, class: u8, id: u8, timeout_ms: u32) -> bool;

    /// Wait up to `timeout_ms` for a `class`/`id` frame and copy its payload
    /// into `buf`
    ///
    /// Returns `Ok(Some(len))` with the payload length, or `Ok(None)` on
    /// timeout. Other frames and frames with a bad checksum are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`UbxError::BufferCapacityExceeded`] when the target frame
    /// does not fit in `buf`.
    fn receive_payload(
        &mut self,
        class: u8,
        id: u8,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<Option<usize>, UbxError>;

    /// Send a configuration command and wait for its acknowledgement
    fn transact(&mut self, frame: &CommandFrame, timeout_ms: u32) -> bool {
        match self.send(frame) {
            Ok(()) => self.receive_ack(frame.class, frame.id, timeout_ms),
            Err(_) => {
                crate::log_warn!("GPS: write failed for class {} id {}", frame.class, frame.id);
                false
            }
        }
    }

    /// Send a poll request and wait for the matching response payload
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the response does
    /// not fit in `buf`.
    fn poll(
        &mut self,
        frame: &CommandFrame,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<Option<usize>, GpsError> {
        self.send(frame)?;
        Ok(self.receive_payload(frame.class, frame.id, buf, timeout_ms)?)
    }
}

/// UBX link over a byte transport and a timer
pub struct UbxPort<T: UbxTransport, C: TimerInterface> {
    transport: T,
    timer: C,
    ack_poll_ms: u32,
    payload_poll_ms: u32,
    stats: PortStats,
}

impl<T: UbxTransport, C: TimerInterface> UbxPort<T, C> {
    /// Create a port
    ///
    /// # Arguments
    ///
    /// * `transport` - Byte transport to the receiver
    /// * `timer` - Clock and sleep used for every time budget
    /// * `ack_poll_ms` - Sleep while no ACK bytes are pending
    /// * `payload_poll_ms` - Sleep while no payload bytes are pending
    pub fn new(transport: T, timer: C, ack_poll_ms: u32, payload_poll_ms: u32) -> Self {
        Self {
            transport,
            timer,
            ack_poll_ms,
            payload_poll_ms,
            stats: PortStats::default(),
        }
    }

    /// Get port statistics
    pub fn stats(&self) -> PortStats {
        self.stats
    }

    /// Reset port statistics
    pub fn reset_stats(&mut self) {
        self.stats = PortStats::default();
    }

    /// Get mutable reference to the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Get reference to the timer
    pub fn timer(&self) -> &C {
        &self.timer
    }

    /// Get mutable reference to the timer
    pub fn timer_mut(&mut self) -> &mut C {
        &mut self.timer
    }

    /// Sleep one poll interval; `false` if the timer failed
    fn idle(&mut self, ms: u32) -> bool {
        match self.timer.delay_ms(ms) {
            Ok(()) => true,
            Err(_) => {
                crate::log_error!("GPS: timer delay failed");
                false
            }
        }
    }

    fn deadline(&self, timeout_ms: u32) -> u64 {
        self.timer.now_ms().saturating_add(timeout_ms as u64)
    }
}

impl<T: UbxTransport, C: TimerInterface> UbxLink for UbxPort<T, C> {
    fn send(&mut self, frame: &CommandFrame) -> Result<(), GpsError> {
        let encoded = frame.encode();
        self.transport.write(&encoded)?;
        self.stats.frames_sent = self.stats.frames_sent.wrapping_add(1);
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.timer.now_ms()
    }

    fn receive_ack(&mut self, class: u8, id: u8, timeout_ms: u32) -> bool {
        let mut matcher = AckMatcher::new(class, id);
        let deadline = self.deadline(timeout_ms);

        while self.timer.now_ms() <= deadline {
            if self.transport.bytes_available() == 0 {
                if !self.idle(self.ack_poll_ms) {
                    break;
                }
                continue;
            }

            match matcher.feed(self.transport.read_byte()) {
                Some(AckOutcome::Acknowledged) => {
                    self.stats.acks = self.stats.acks.wrapping_add(1);
                    return true;
                }
                Some(_) => {
                    self.stats.naks = self.stats.naks.wrapping_add(1);
                    crate::log_debug!("GPS: NAK for class {} id {}", class, id);
                    return false;
                }
                None => {}
            }
        }

        self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
        crate::log_debug!("GPS: ACK timeout for class {} id {}", class, id);
        false
    }

    fn receive_payload(
        &mut self,
        class: u8,
        id: u8,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<Option<usize>, UbxError> {
        let mut demux = PayloadDemux::new(class, id);
        let deadline = self.deadline(timeout_ms);
        let mut available: u16 = 0;

        while self.timer.now_ms() <= deadline {
            if available == 0 {
                available = self.transport.bytes_available();
                if available == 0 {
                    if !self.idle(self.payload_poll_ms) {
                        break;
                    }
                    continue;
                }
            }

            available -= 1;
            let byte = self.transport.read_byte();
            match demux.feed(byte, buf) {
                Ok(DemuxEvent::Complete(len)) => {
                    self.stats.frames_received = self.stats.frames_received.wrapping_add(1);
                    return Ok(Some(len));
                }
                Ok(DemuxEvent::ChecksumMismatch) => {
                    self.stats.checksum_failures = self.stats.checksum_failures.wrapping_add(1);
                    crate::log_warn!("GPS: checksum mismatch on class {} id {}", class, id);
                }
                Ok(DemuxEvent::Pending) => {}
                Err(e) => {
                    crate::log_error!("GPS: payload for class {} id {} too large", class, id);
                    return Err(e);
                }
            }
        }

        self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
        crate::log_debug!("GPS: payload timeout for class {} id {}", class, id);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::gps::testing::{ack, nak, ubx_frame};
    use crate::devices::gps::transport::DdcTransport;
    use crate::platform::error::I2cError;
    use crate::platform::mock::{MockI2c, MockTimer};
    use tracker_core::ubx::commands::{AIRBORNE_MODEL, POLL_NAV_PVT};

    type TestPort = UbxPort<DdcTransport<MockI2c>, MockTimer>;

    fn port_with(stream: &[u8]) -> TestPort {
        let mut i2c = MockI2c::new();
        i2c.push_stream(stream);
        UbxPort::new(DdcTransport::new(i2c, 0x42), MockTimer::new(), 100, 50)
    }

    #[test]
    fn test_ack_received_before_timeout() {
        let mut port = port_with(&ack(0x06, 0x24));
        assert!(port.receive_ack(0x06, 0x24, 1000));
        assert!(port.timer().now_ms() < 1000);
        assert_eq!(port.stats().acks, 1);
    }

    #[test]
    fn test_nak_is_not_acknowledged() {
        let mut port = port_with(&nak(0x06, 0x24));
        assert!(!port.receive_ack(0x06, 0x24, 1000));
        assert_eq!(port.stats().naks, 1);
        assert_eq!(port.stats().timeouts, 0);
    }

    #[test]
    fn test_ack_after_noise() {
        let mut stream = std::vec![0x00, 0x11, 0x22];
        stream.extend_from_slice(&ack(0x06, 0x00));
        let mut port = port_with(&stream);
        assert!(port.receive_ack(0x06, 0x00, 1000));
    }

    #[test]
    fn test_ack_for_other_command_times_out() {
        let mut port = port_with(&ack(0x06, 0x3B));
        assert!(!port.receive_ack(0x06, 0x24, 1000));
        assert_eq!(port.stats().timeouts, 1);
    }

    #[test]
    fn test_ack_timeout_on_empty_stream() {
        let mut port = port_with(&[]);
        assert!(!port.receive_ack(0x06, 0x24, 1000));

        let elapsed = port.timer().now_ms();
        assert!(elapsed >= 1000);
        assert!(elapsed <= 1000 + 100);
    }

    #[test]
    fn test_failed_delay_ends_wait() {
        let mut port = port_with(&[]);
        port.timer_mut().fail_delays(true);

        assert!(!port.receive_ack(0x06, 0x24, 1000));
        let mut buf = [0u8; 8];
        assert_eq!(port.receive_payload(0x01, 0x07, &mut buf, 1000), Ok(None));
        assert_eq!(port.stats().timeouts, 2);
        assert_eq!(port.timer().now_ms(), 0);
    }

    #[test]
    fn test_payload_demux_across_unrelated_frame() {
        let mut stream = ubx_frame(0x01, 0x03, &[9, 9, 9, 9]);
        stream.extend_from_slice(&ubx_frame(0x01, 0x07, &[1, 2, 3]));
        let mut port = port_with(&stream);

        let mut buf = [0u8; 8];
        assert_eq!(port.receive_payload(0x01, 0x07, &mut buf, 1000), Ok(Some(3)));
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(port.stats().frames_received, 1);
    }

    #[test]
    fn test_payload_capacity_exceeded() {
        let mut port = port_with(&ubx_frame(0x01, 0x07, &[0u8; 100]));
        let mut buf = [0u8; 92];
        assert_eq!(
            port.receive_payload(0x01, 0x07, &mut buf, 1000),
            Err(UbxError::BufferCapacityExceeded {
                declared: 100,
                capacity: 92
            })
        );
    }

    #[test]
    fn test_payload_bad_checksum_skipped() {
        let mut corrupt = ubx_frame(0x01, 0x07, &[1, 2, 3]);
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0xFF;
        corrupt.extend_from_slice(&ubx_frame(0x01, 0x07, &[4, 5, 6]));
        let mut port = port_with(&corrupt);

        let mut buf = [0u8; 8];
        assert_eq!(port.receive_payload(0x01, 0x07, &mut buf, 1000), Ok(Some(3)));
        assert_eq!(&buf[..3], &[4, 5, 6]);
        assert_eq!(port.stats().checksum_failures, 1);
    }

    #[test]
    fn test_payload_timeout_on_empty_stream() {
        let mut port = port_with(&[]);
        let mut buf = [0u8; 92];
        assert_eq!(port.receive_payload(0x01, 0x07, &mut buf, 1000), Ok(None));

        let elapsed = port.timer().now_ms();
        assert!(elapsed >= 1000);
        assert!(elapsed <= 1000 + 50);
        assert_eq!(port.stats().timeouts, 1);
    }

    #[test]
    fn test_payload_read_in_available_chunks() {
        let mut port = port_with(&ubx_frame(0x01, 0x07, &[7; 12]));
        port.transport_mut().i2c_mut().limit_available(5);

        let mut buf = [0u8; 16];
        assert_eq!(port.receive_payload(0x01, 0x07, &mut buf, 1000), Ok(Some(12)));
        assert_eq!(port.timer().now_ms(), 0);
    }

    #[test]
    fn test_transact_sends_encoded_frame() {
        let mut i2c = MockI2c::new();
        let frame: std::vec::Vec<u8> = AIRBORNE_MODEL.bytes().collect();
        i2c.on_write(&frame, &ack(0x06, 0x24));
        let mut port = UbxPort::new(DdcTransport::new(i2c, 0x42), MockTimer::new(), 100, 50);

        assert!(port.transact(&AIRBORNE_MODEL, 1000));
        assert_eq!(port.transport_mut().i2c_mut().written(), std::vec![frame]);
        assert_eq!(port.stats().frames_sent, 1);
    }

    #[test]
    fn test_transact_write_failure() {
        let mut port = port_with(&ack(0x06, 0x24));
        port.transport_mut().i2c_mut().fail_writes(I2cError::Nack);
        assert!(!port.transact(&AIRBORNE_MODEL, 1000));
        assert_eq!(port.stats().frames_sent, 0);
    }

    #[test]
    fn test_poll_round_trip() {
        let mut i2c = MockI2c::new();
        let request: std::vec::Vec<u8> = POLL_NAV_PVT.bytes().collect();
        i2c.on_write(&request, &ubx_frame(0x01, 0x07, &[0xAB; 84]));
        let mut port = UbxPort::new(DdcTransport::new(i2c, 0x42), MockTimer::new(), 100, 50);

        let mut buf = [0u8; 92];
        assert_eq!(port.poll(&POLL_NAV_PVT, &mut buf, 1000), Ok(Some(84)));
        assert_eq!(buf[83], 0xAB);
    }
}
