//! GPIO / peripheral assignments for the EVSE controller main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Control pilot (J1772)
// ---------------------------------------------------------------------------

/// Pilot line driver input (±12 V op-amp stage).  HIGH = +12 V on the pilot,
/// LOW = −12 V.  Carries either a steady level or the 1 kHz PWM waveform.
pub const PILOT_PWM_GPIO: i32 = 1;

/// Pilot waveform frequency mandated by J1772.
pub const PILOT_PWM_FREQ_HZ: u32 = 1_000;

// ---------------------------------------------------------------------------
// LEDC pilot backend
// ---------------------------------------------------------------------------

/// LEDC timer dedicated to the pilot waveform.
pub const PILOT_LEDC_TIMER: u32 = 0;
/// LEDC channel driving [`PILOT_PWM_GPIO`].
pub const PILOT_LEDC_CHANNEL: u32 = 0;
/// LEDC duty resolution (bits).  10-bit keeps 1 % duty steps ≈ 10 counts.
pub const PILOT_LEDC_RESOLUTION_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// MCPWM pilot backend
// ---------------------------------------------------------------------------

/// MCPWM group owning the pilot timer/operator/generator chain.
pub const PILOT_MCPWM_GROUP: i32 = 0;
/// MCPWM timer tick rate.  1 MHz gives 1 µs resolution on the 1 kHz wave.
pub const PILOT_MCPWM_TICK_HZ: u32 = 1_000_000;
