//! Core infrastructure
//!
//! Cross-cutting pieces shared by the platform layer and device drivers.

pub mod logging;
