//! EVSE pilot firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod config;
pub mod drivers;
pub mod error;
pub mod pilot;

mod pins;

// Runtime symbols for the critical-section crate on the ESP-IDF target; the
// implementation is guarded by cfg attributes inside.
mod esp_link_shims;
