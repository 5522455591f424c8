#![allow(dead_code)] // Funnel variants reserved for subsystems beyond the pilot core

//! Unified error types for the EVSE pilot firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level control path's error handling uniform.  All variants are `Copy`
//! so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Pilot signal generation failed.
    Pilot(PilotError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pilot(e) => write!(f, "pilot: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pilot errors
// ---------------------------------------------------------------------------

/// Errors from the pilot controller and its waveform backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotError {
    /// Requested amperage maps to no valid duty cycle.  The logical state
    /// has already moved to `Pwm`; the hardware was not touched.
    InvalidAmps(i32),
    /// Pilot timer setup failed (rc = `esp_err_t`).
    TimerInitFailed(i32),
    /// Pilot output channel / generator setup failed (rc = `esp_err_t`).
    ChannelInitFailed(i32),
}

impl fmt::Display for PilotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmps(amps) => write!(f, "{} A outside supported envelope", amps),
            Self::TimerInitFailed(rc) => write!(f, "timer init failed (rc={})", rc),
            Self::ChannelInitFailed(rc) => write!(f, "channel init failed (rc={})", rc),
        }
    }
}

impl From<PilotError> for Error {
    fn from(e: PilotError) -> Self {
        Self::Pilot(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
