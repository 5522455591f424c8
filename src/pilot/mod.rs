//! J1772 control-pilot signal controller.
//!
//! The pilot line tells the vehicle two things: its DC level (steady +12 V =
//! ready / no vehicle, steady −12 V = fault) and, in PWM mode, the maximum
//! current the station offers, encoded in the duty cycle of a 1 kHz square
//! wave.
//!
//! This module owns the logical state and the amps→duty arithmetic; the
//! waveform itself comes from a [`PilotBackend`] bound at build time.  Every
//! mutating operation serializes the state store and the backend register
//! write inside one `critical_section` scope, so a preempting reader never
//! observes a state whose hardware write has not completed.

pub mod backend;

pub use backend::PilotBackend;

use core::sync::atomic::{AtomicU8, Ordering};

use log::info;

use crate::error::PilotError;

/// Lowest amperage J1772 allows a station to offer.
pub const MIN_OFFER_AMPS: i32 = 6;
/// Highest amperage the upper duty-cycle formula covers.
pub const MAX_OFFER_AMPS: i32 = 80;
/// Boundary between the two linear duty formulas.  51 A resolves through
/// the lower formula, never the upper.
const LOW_RANGE_MAX_AMPS: i32 = 51;

/// Commanded condition of the pilot line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PilotState {
    /// Steady +12 V — no vehicle connected / not offering current.
    P12 = 0,
    /// 1 kHz square wave whose duty cycle encodes the offered amperage.
    Pwm = 1,
    /// Steady −12 V — fault.
    N12 = 2,
}

fn state_from_u8(raw: u8) -> PilotState {
    match raw {
        0 => PilotState::P12,
        1 => PilotState::Pwm,
        // Only the three discriminants are ever stored; anything else
        // decodes as the fault level.
        _ => PilotState::N12,
    }
}

/// Duty-cycle percentage for an offered amperage, per the two-segment
/// linear J1772 mapping.  Returns 0 outside the supported envelope.
///
/// J1772: available current = duty% × 0.6 up to 51 A, and
/// (duty% − 64) × 2.5 above.
pub fn duty_from_amps(amps: i32) -> i32 {
    if (MIN_OFFER_AMPS..=LOW_RANGE_MAX_AMPS).contains(&amps) {
        10 * amps / 6
    } else if amps > LOW_RANGE_MAX_AMPS && amps <= MAX_OFFER_AMPS {
        25 * amps / 10 + 64
    } else {
        0
    }
}

/// The pilot-signal controller.
///
/// Owns the logical [`PilotState`] and exactly one waveform backend, bound
/// through the generic parameter — only one physical timer drives the pilot
/// line in any deployment, so there is no runtime dispatch.
pub struct Pilot<B: PilotBackend> {
    /// Last committed state.  Atomic so an ISR-context reader always sees a
    /// whole value without taking a lock.
    state: AtomicU8,
    backend: B,
}

impl<B: PilotBackend> Pilot<B> {
    pub fn new(backend: B) -> Self {
        Self {
            state: AtomicU8::new(PilotState::P12 as u8),
            backend,
        }
    }

    /// One-time hardware bring-up, then drive +12 V steady.
    ///
    /// Must be called exactly once before any other operation.  A failure
    /// here is a wiring/build defect; the caller is expected to halt.
    pub fn init(&mut self) -> Result<(), PilotError> {
        info!("pilot: init");
        self.backend.configure()?;
        self.set_state(PilotState::P12);
        Ok(())
    }

    /// Drive a steady DC level (`P12` or `N12`).  Always succeeds.
    ///
    /// Passing `Pwm` here is accepted and forwards a 0 % placeholder duty;
    /// use [`set_pwm`](Self::set_pwm) to offer current.
    pub fn set_state(&mut self, state: PilotState) {
        critical_section::with(|_| {
            self.state.store(state as u8, Ordering::Release);
            self.backend.apply(state, 0);
        });
    }

    /// Last committed state.  Pure atomic load; safe from ISR context.
    pub fn state(&self) -> PilotState {
        state_from_u8(self.state.load(Ordering::Acquire))
    }

    /// Offer `amps` to the vehicle as a 1 kHz PWM wave.
    ///
    /// The logical state moves to `Pwm` before validation — the caller has
    /// already committed to a variable-rate offer.  If the amperage maps
    /// outside the valid duty range `(1, 100)` the backend is left untouched
    /// and the state nonetheless remains `Pwm`.
    pub fn set_pwm(&mut self, amps: i32) -> Result<(), PilotError> {
        info!("pilot: offering {} A", amps);

        self.state.store(PilotState::Pwm as u8, Ordering::Release);

        let duty = duty_from_amps(amps);
        if duty > 1 && duty < 100 {
            critical_section::with(|_| {
                self.backend.apply(PilotState::Pwm, duty as u8);
            });
            Ok(())
        } else {
            Err(PilotError::InvalidAmps(amps))
        }
    }

    /// Backend access for inspection (telemetry, tests).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_formula_endpoints() {
        assert_eq!(duty_from_amps(6), 10);
        assert_eq!(duty_from_amps(51), 85);
    }

    #[test]
    fn boundary_amperage_uses_lower_formula() {
        // 51 A through the upper formula would give 191, not 85.
        assert_eq!(duty_from_amps(51), 10 * 51 / 6);
    }

    #[test]
    fn upper_formula_values() {
        assert_eq!(duty_from_amps(52), 25 * 52 / 10 + 64);
        assert_eq!(duty_from_amps(80), 204);
    }

    #[test]
    fn out_of_envelope_maps_to_zero() {
        assert_eq!(duty_from_amps(0), 0);
        assert_eq!(duty_from_amps(5), 0);
        assert_eq!(duty_from_amps(81), 0);
        assert_eq!(duty_from_amps(-6), 0);
    }

    #[test]
    fn state_decodes_round_trip() {
        for s in [PilotState::P12, PilotState::Pwm, PilotState::N12] {
            assert_eq!(state_from_u8(s as u8), s);
        }
    }
}
