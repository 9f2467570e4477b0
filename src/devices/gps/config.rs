//! GPS receiver configuration
//!
//! Timing budgets and selection of the fix protocol. Defaults match a
//! u-blox MAX-M8 on the tracker board; the receiver generation can be changed
//! at build time with the `GPS_RECEIVER` environment variable (`max6`,
//! `max7` or `max8`).

use super::transport::DEFAULT_DDC_ADDRESS;

/// Receiver model selected at build time (parsed by build.rs)
const GPS_RECEIVER: &str = env!("GPS_RECEIVER");

/// Which message set the receiver speaks for fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolVariant {
    /// u-blox 6: NAV-POSLLH, NAV-SOL and NAV-TIMEUTC polled separately
    Gen1,
    /// u-blox 7/8: single NAV-PVT poll
    Gen2,
}

impl ProtocolVariant {
    /// Variant for a receiver model name
    ///
    /// Unknown names fall back to [`ProtocolVariant::Gen2`].
    pub const fn from_model(model: &str) -> Self {
        match model.as_bytes() {
            b"max6" => ProtocolVariant::Gen1,
            _ => ProtocolVariant::Gen2,
        }
    }

    /// Variant of the receiver this firmware was built for
    pub const fn build_default() -> Self {
        Self::from_model(GPS_RECEIVER)
    }

    /// Name used in log output
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolVariant::Gen1 => "Gen1",
            ProtocolVariant::Gen2 => "Gen2",
        }
    }
}

/// GPS receiver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsConfig {
    /// Fix protocol, fixed for the lifetime of the receiver
    pub variant: ProtocolVariant,
    /// 7-bit DDC (I2C) address
    pub ddc_address: u8,
    /// Delay after power-on before the receiver accepts commands (ms)
    pub settle_delay_ms: u32,
    /// Time budget for the ACK/NAK of one configuration command (ms)
    pub ack_timeout_ms: u32,
    /// Time budget for one navigation poll response (ms)
    pub payload_timeout_ms: u32,
    /// Sleep while waiting for ACK bytes (ms)
    pub ack_poll_ms: u32,
    /// Sleep while waiting for payload bytes (ms)
    pub payload_poll_ms: u32,
    /// Satellites required before a 3D fix counts as a lock
    pub min_satellites: u8,
    /// Interval between fix polls while searching (ms)
    pub fix_retry_ms: u32,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            variant: ProtocolVariant::build_default(),
            ddc_address: DEFAULT_DDC_ADDRESS,
            settle_delay_ms: 3000,
            ack_timeout_ms: 1000,
            payload_timeout_ms: 5000,
            ack_poll_ms: 100,
            payload_poll_ms: 50,
            min_satellites: 5,
            fix_retry_ms: 100,
        }
    }
}

impl GpsConfig {
    /// Default configuration for an explicit receiver generation
    pub fn for_variant(variant: ProtocolVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_model() {
        assert_eq!(ProtocolVariant::from_model("max6"), ProtocolVariant::Gen1);
        assert_eq!(ProtocolVariant::from_model("max7"), ProtocolVariant::Gen2);
        assert_eq!(ProtocolVariant::from_model("max8"), ProtocolVariant::Gen2);
        assert_eq!(ProtocolVariant::from_model("neo"), ProtocolVariant::Gen2);
    }

    #[test]
    fn test_default_config() {
        let config = GpsConfig::default();
        assert_eq!(config.variant, ProtocolVariant::build_default());
        assert_eq!(config.ddc_address, 0x42);
        assert_eq!(config.settle_delay_ms, 3000);
        assert_eq!(config.ack_timeout_ms, 1000);
        assert_eq!(config.ack_poll_ms, 100);
        assert_eq!(config.payload_poll_ms, 50);
        assert_eq!(config.min_satellites, 5);
    }

    #[test]
    fn test_for_variant_keeps_defaults() {
        let config = GpsConfig::for_variant(ProtocolVariant::Gen1);
        assert_eq!(config.variant, ProtocolVariant::Gen1);
        assert_eq!(config.payload_timeout_ms, 5000);
    }
}
