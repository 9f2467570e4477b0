//! Navigation solution types and decoders
//!
//! - [`fix`]: the normalized `Fix` record and altitude policy
//! - [`decode`]: NAV-PVT, NAV-POSLLH, NAV-SOL and NAV-TIMEUTC parsers

pub mod decode;
pub mod fix;

pub use decode::{DecodeError, NavPosllh, NavPvt, NavSol, NavTimeUtc};
pub use fix::{altitude_from_mm, Fix, FixTime, FixType, ALTITUDE_CEILING_M, ALTITUDE_FLOOR_M};
