//! Fix acquisition per receiver generation
//!
//! u-blox 7/8 receivers deliver a complete solution in one NAV-PVT message;
//! u-blox 6 receivers need NAV-POSLLH, NAV-SOL and NAV-TIMEUTC polled one
//! after another. Both are expressed as a [`FixProtocol`], chosen once from
//! the [`ProtocolVariant`] when the receiver driver is built.

use super::config::ProtocolVariant;
use super::port::UbxLink;
use tracker_core::nav::{DecodeError, Fix, NavPosllh, NavPvt, NavSol, NavTimeUtc};
use tracker_core::ubx::commands::{
    ConfigStep, LEGACY_RECEIVER_SEQUENCE, POLL_NAV_POSLLH, POLL_NAV_PVT, POLL_NAV_SOL,
    POLL_NAV_TIMEUTC, PVT_RECEIVER_SEQUENCE,
};
use tracker_core::ubx::CommandFrame;

/// Receive buffer for one navigation response (a u-blox 8 NAV-PVT)
pub const RESPONSE_BUFFER_LEN: usize = 92;

/// Outcome of one fix acquisition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixReport {
    /// Decoded fix; fields of failed polls keep their defaults
    pub fix: Fix,
    /// Every poll of the acquisition was answered and decoded
    pub success: bool,
}

/// Receiver-generation specific behavior
pub trait FixProtocol {
    /// Generation implemented
    fn variant(&self) -> ProtocolVariant;

    /// ACK-gated configuration commands, in order
    fn configuration(&self) -> &'static [ConfigStep];

    /// Poll the receiver and decode one fix
    ///
    /// `timeout_ms` bounds the whole acquisition; polls share one deadline
    /// and a poll with no budget left is not sent.
    fn acquire(&self, link: &mut dyn UbxLink, timeout_ms: u32) -> FixReport;
}

/// u-blox 6: three-message fix
#[derive(Debug, Clone, Copy, Default)]
pub struct Gen1Protocol;

/// u-blox 7/8: NAV-PVT fix
#[derive(Debug, Clone, Copy, Default)]
pub struct Gen2Protocol;

static GEN1: Gen1Protocol = Gen1Protocol;
static GEN2: Gen2Protocol = Gen2Protocol;

impl ProtocolVariant {
    /// Protocol implementation for this generation
    pub fn protocol(self) -> &'static dyn FixProtocol {
        match self {
            ProtocolVariant::Gen1 => &GEN1,
            ProtocolVariant::Gen2 => &GEN2,
        }
    }
}

fn acquisition_deadline(link: &dyn UbxLink, timeout_ms: u32) -> u64 {
    link.now_ms().saturating_add(timeout_ms as u64)
}

/// Poll one message and parse it before `deadline`
///
/// Logs the result under `name`; any failure yields `None`.
fn poll_message<M>(
    link: &mut dyn UbxLink,
    request: &CommandFrame,
    buf: &mut [u8],
    deadline: u64,
    name: &str,
    parse: fn(&[u8]) -> Result<M, DecodeError>,
) -> Option<M> {
    let remaining = deadline.saturating_sub(link.now_ms());
    if remaining == 0 {
        crate::log_warn!("GPS: Polling {} FAILED (no time left)", name);
        return None;
    }
    let timeout_ms = u32::try_from(remaining).unwrap_or(u32::MAX);

    let message = match link.poll(request, buf, timeout_ms) {
        Ok(Some(len)) => match parse(&buf[..len]) {
            Ok(message) => Some(message),
            Err(_) => {
                crate::log_warn!("GPS: {} payload too short ({} bytes)", name, len);
                None
            }
        },
        Ok(None) => None,
        Err(_) => None,
    };

    if message.is_some() {
        crate::log_debug!("GPS: Polling {} OK", name);
    } else {
        crate::log_warn!("GPS: Polling {} FAILED", name);
    }
    message
}

impl FixProtocol for Gen2Protocol {
    fn variant(&self) -> ProtocolVariant {
        ProtocolVariant::Gen2
    }

    fn configuration(&self) -> &'static [ConfigStep] {
        PVT_RECEIVER_SEQUENCE
    }

    fn acquire(&self, link: &mut dyn UbxLink, timeout_ms: u32) -> FixReport {
        let deadline = acquisition_deadline(link, timeout_ms);
        let mut buf = [0u8; RESPONSE_BUFFER_LEN];
        let mut fix = Fix::default();

        let pvt = poll_message(
            link,
            &POLL_NAV_PVT,
            &mut buf,
            deadline,
            "PVT",
            NavPvt::parse,
        );
        if let Some(pvt) = &pvt {
            pvt.apply(&mut fix);
        }

        FixReport {
            fix,
            success: pvt.is_some(),
        }
    }
}

impl FixProtocol for Gen1Protocol {
    fn variant(&self) -> ProtocolVariant {
        ProtocolVariant::Gen1
    }

    fn configuration(&self) -> &'static [ConfigStep] {
        LEGACY_RECEIVER_SEQUENCE
    }

    fn acquire(&self, link: &mut dyn UbxLink, timeout_ms: u32) -> FixReport {
        let deadline = acquisition_deadline(link, timeout_ms);
        let mut buf = [0u8; RESPONSE_BUFFER_LEN];
        let mut fix = Fix::default();
        let mut success = true;

        match poll_message(
            link,
            &POLL_NAV_POSLLH,
            &mut buf,
            deadline,
            "POSLLH",
            NavPosllh::parse,
        ) {
            Some(posllh) => posllh.apply(&mut fix),
            None => success = false,
        }

        match poll_message(
            link,
            &POLL_NAV_SOL,
            &mut buf,
            deadline,
            "SOL",
            NavSol::parse,
        ) {
            Some(sol) => sol.apply(&mut fix),
            None => success = false,
        }

        match poll_message(
            link,
            &POLL_NAV_TIMEUTC,
            &mut buf,
            deadline,
            "TIMEUTC",
            NavTimeUtc::parse,
        ) {
            Some(time) => time.apply(&mut fix),
            None => success = false,
        }

        FixReport { fix, success }
    }
}
