//! Pilot waveform backends and the build-time strategy selection.
//!
//! Both backends are always compiled; the `pilot-mcpwm` cargo feature picks
//! which one a firmware image actually drives the pilot line with.

pub mod pilot_ledc;
pub mod pilot_mcpwm;

#[cfg(feature = "pilot-mcpwm")]
pub use pilot_mcpwm::McpwmPilotBackend as BoardPilotBackend;
#[cfg(not(feature = "pilot-mcpwm"))]
pub use pilot_ledc::LedcPilotBackend as BoardPilotBackend;
