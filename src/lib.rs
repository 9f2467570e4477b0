#![cfg_attr(not(test), no_std)]

//! balloon_tracker - GNSS receiver driver for a high-altitude balloon tracker
//!
//! This library provides the platform abstraction, the u-blox receiver driver
//! and the tracking cycle built on the pure protocol logic in `tracker_core`.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer (bus, pins, clock)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core infrastructure (logging)
pub mod core;

pub use tracker_core::{nav, ubx};
