//! UBX command templates used by the tracker
//!
//! Configuration commands are sent once after power-up; each is answered by
//! an ACK or NAK echoing its class and id. Poll requests carry no payload and
//! are answered by the navigation message of the same class and id.
//!
//! # References
//!
//! - [u-blox 8 / M8 Receiver Description (UBX-13003221)](https://content.u-blox.com/sites/default/files/products/documents/u-blox8-M8_ReceiverDescrProtSpec_UBX-13003221.pdf)

use super::frame::CommandFrame;
use super::{class, id};

/// CFG-PRT: UART1 at 9600 8N1 with UBX as the only input and output protocol
///
/// Turns off the default NMEA sentences so the stream only carries frames
/// the tracker asked for.
pub const DISABLE_NMEA_OUTPUT: CommandFrame = CommandFrame::new(
    class::CFG,
    id::CFG_PRT,
    &[
        0x01, 0x00, 0x00, 0x00, // port UART1, reserved, txReady off
        0xE0, 0x08, 0x00, 0x00, // mode: 8 data bits, no parity, 1 stop bit
        0x80, 0x25, 0x00, 0x00, // 9600 baud
        0x01, 0x00, // inProtoMask: UBX
        0x01, 0x00, // outProtoMask: UBX
        0x00, 0x00, // flags
        0x00, 0x00, // reserved
    ],
);

/// CFG-GNSS: track GPS only on all 32 channels
///
/// Not understood by u-blox 6 receivers.
pub const GPS_ONLY: CommandFrame = CommandFrame::new(
    class::CFG,
    id::CFG_GNSS,
    &[
        0x00, 32, 32, 4, // msgVer, 32 hw channels, 32 to use, 4 blocks
        0x00, 16, 32, 0, 0x01, 0x00, 0x00, 0x00, // GPS: enabled
        0x03, 0, 0, 0, 0x00, 0x00, 0x00, 0x00, // BeiDou: disabled
        0x05, 0, 0, 0, 0x00, 0x00, 0x00, 0x00, // QZSS: disabled
        0x06, 0, 0, 0, 0x00, 0x00, 0x00, 0x00, // GLONASS: disabled
    ],
);

/// CFG-NAV5: airborne (<1g) dynamic model
///
/// Required to keep a lock above 12 km. 3D fixes only, 5 degree elevation
/// mask, PDOP/TDOP limit 25.0, position accuracy 100 m, time accuracy 300 m.
pub const AIRBORNE_MODEL: CommandFrame = CommandFrame::new(
    class::CFG,
    id::CFG_NAV5,
    &[
        0xFF, 0xFF, // apply all settings
        0x06, // dynModel: airborne <1g
        0x03, // fixMode: auto 2D/3D
        0x00, 0x00, 0x00, 0x00, // fixedAlt
        0x10, 0x27, 0x00, 0x00, // fixedAltVar
        0x05, // minElev
        0x00, // drLimit
        0xFA, 0x00, // pDop
        0xFA, 0x00, // tDop
        0x64, 0x00, // pAcc
        0x2C, 0x01, // tAcc
        0x00, // staticHoldThresh
        0x3C, // dgnssTimeout
        0x00, // cnoThreshNumSVs
        0x00, // cnoThresh
        0x00, 0x00, // reserved
        0xC8, 0x00, // staticHoldMaxDist
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reserved
    ],
);

/// CFG-PM2: cyclic tracking with a 10 s update and search period
pub const CYCLIC_TRACKING_PROFILE: CommandFrame = CommandFrame::new(
    class::CFG,
    id::CFG_PM2,
    &[
        0x01, 0x00, 0x00, 0x00, // version 1, reserved
        0x00, 0b0001_0000, 0b0000_0010, 0x00, // flags: update ephemeris, cyclic tracking
        0x10, 0x27, 0x00, 0x00, // updatePeriod (ms)
        0x10, 0x27, 0x00, 0x00, // searchPeriod (ms)
        0x00, 0x00, 0x00, 0x00, // gridOffset
        0x00, 0x00, // onTime
        0x01, 0x00, // minAcqTime
        0x00, 0x00, 0x00, 0x00, // reserved
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
    ],
);

/// CFG-RXM: enter the power save mode configured by CFG-PM2
pub const POWER_SAVE_MODE: CommandFrame =
    CommandFrame::new(class::CFG, id::CFG_RXM, &[0x08, 0x01]);

/// CFG-RXM: continuous (full power) mode
pub const CONTINUOUS_MODE: CommandFrame =
    CommandFrame::new(class::CFG, id::CFG_RXM, &[0x08, 0x00]);

/// Poll NAV-PVT
pub const POLL_NAV_PVT: CommandFrame = CommandFrame::poll(class::NAV, id::NAV_PVT);
/// Poll NAV-POSLLH
pub const POLL_NAV_POSLLH: CommandFrame = CommandFrame::poll(class::NAV, id::NAV_POSLLH);
/// Poll NAV-SOL
pub const POLL_NAV_SOL: CommandFrame = CommandFrame::poll(class::NAV, id::NAV_SOL);
/// Poll NAV-TIMEUTC
pub const POLL_NAV_TIMEUTC: CommandFrame = CommandFrame::poll(class::NAV, id::NAV_TIMEUTC);

/// One ACK-gated step of the configuration sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigStep {
    /// Name used in log output
    pub name: &'static str,
    /// Command sent to the receiver
    pub command: CommandFrame,
}

impl ConfigStep {
    const fn new(name: &'static str, command: CommandFrame) -> Self {
        Self { name, command }
    }
}

/// Configuration sequence for receivers reporting fixes with NAV-PVT (u-blox 7/8)
pub const PVT_RECEIVER_SEQUENCE: &[ConfigStep] = &[
    ConfigStep::new("Disable NMEA output", DISABLE_NMEA_OUTPUT),
    ConfigStep::new("Set GPS only", GPS_ONLY),
    ConfigStep::new("Set airborne model", AIRBORNE_MODEL),
    ConfigStep::new("Configure power save", CYCLIC_TRACKING_PROFILE),
    ConfigStep::new("Disable power save", CONTINUOUS_MODE),
];

/// Configuration sequence for u-blox 6 receivers
///
/// Identical to [`PVT_RECEIVER_SEQUENCE`] minus CFG-GNSS.
pub const LEGACY_RECEIVER_SEQUENCE: &[ConfigStep] = &[
    ConfigStep::new("Disable NMEA output", DISABLE_NMEA_OUTPUT),
    ConfigStep::new("Set airborne model", AIRBORNE_MODEL),
    ConfigStep::new("Configure power save", CYCLIC_TRACKING_PROFILE),
    ConfigStep::new("Disable power save", CONTINUOUS_MODE),
];
