//! tracker_core - Pure no_std GNSS protocol logic for the balloon tracker
//!
//! This crate contains the platform-agnostic part of the GNSS receiver
//! driver: everything that can be expressed as a function of bytes, with no
//! bus, clock or pin involved. It is tested on host without feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Byte-fed state machines**: Matchers consume one byte per call and
//!   never block, so time budgets live with the caller
//!
//! # Modules
//!
//! - [`ubx`]: UBX framing, checksum, command templates, ACK matcher and
//!   payload demultiplexer
//! - [`nav`]: `Fix` record and NAV message decoders

#![no_std]

pub mod nav;
pub mod ubx;
