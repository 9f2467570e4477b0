//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! so they run unchanged on hardware and against the mocks.
//!
//! ## Modules
//!
//! - `gps`: u-blox receiver driver (UBX over DDC)
//! - `gps_operation`: GPS tracking cycle
//! - `timepulse`: MCU clock measurement against the GPS timepulse

pub mod gps;
pub mod gps_operation;
pub mod timepulse;
