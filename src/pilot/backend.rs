//! Port trait between the pilot controller and the waveform hardware.
//!
//! Two timer strategies implement this contract (LEDC and MCPWM); exactly
//! one is compiled into a firmware image.  The controller consumes it via a
//! generic parameter, so the domain core never touches registers directly.

use super::PilotState;
use crate::error::PilotError;

/// Capability contract of a pilot waveform generator.
///
/// `apply` is always invoked with the caller's critical section held;
/// implementations write their registers directly and must not open a
/// nested section.
pub trait PilotBackend {
    /// One-time timer/pin setup.  Calling this twice is unsupported.
    fn configure(&mut self) -> Result<(), PilotError>;

    /// Realize `state` on the pilot pin.  `duty_percent` is meaningful only
    /// for [`PilotState::Pwm`]; DC-level writes pass 0.
    fn apply(&mut self, state: PilotState, duty_percent: u8);
}
