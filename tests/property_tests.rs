//! Property tests for the amps→duty mapping and the offer path.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use evsepilot::error::PilotError;
use evsepilot::pilot::{duty_from_amps, Pilot, PilotBackend, PilotState};
use proptest::prelude::*;

// ── Counting mock backend ─────────────────────────────────────

#[derive(Default)]
struct CountingBackend {
    duty_writes: usize,
    last_duty: Option<u8>,
}

impl PilotBackend for CountingBackend {
    fn configure(&mut self) -> Result<(), PilotError> {
        Ok(())
    }

    fn apply(&mut self, state: PilotState, duty_percent: u8) {
        if state == PilotState::Pwm && duty_percent > 0 {
            self.duty_writes += 1;
            self.last_duty = Some(duty_percent);
        }
    }
}

fn make_pilot() -> Pilot<CountingBackend> {
    let mut pilot = Pilot::new(CountingBackend::default());
    pilot.init().expect("mock configure cannot fail");
    pilot
}

// ── Duty formula segments ─────────────────────────────────────

proptest! {
    /// The lower segment is exactly floor(10·amps/6), always lands inside
    /// the valid duty range, and always reaches the backend.
    #[test]
    fn lower_segment_offers_always_succeed(amps in 6i32..=51) {
        let duty = duty_from_amps(amps);
        prop_assert_eq!(duty, 10 * amps / 6);
        prop_assert!(duty > 1 && duty < 100);

        let mut pilot = make_pilot();
        prop_assert!(pilot.set_pwm(amps).is_ok());
        prop_assert_eq!(pilot.backend().last_duty, Some(duty as u8));
    }

    /// The upper segment is exactly floor(25·amps/10)+64, which lands at or
    /// above 194 — every such offer is rejected without a backend write,
    /// yet the logical state still reads PWM.
    #[test]
    fn upper_segment_offers_are_always_rejected(amps in 52i32..=80) {
        let duty = duty_from_amps(amps);
        prop_assert_eq!(duty, 25 * amps / 10 + 64);
        prop_assert!(duty >= 100);

        let mut pilot = make_pilot();
        prop_assert_eq!(pilot.set_pwm(amps), Err(PilotError::InvalidAmps(amps)));
        prop_assert_eq!(pilot.backend().duty_writes, 0);
        prop_assert_eq!(pilot.state(), PilotState::Pwm);
    }

    /// Outside [6, 80] the mapping collapses to zero and the backend is
    /// never touched.
    #[test]
    fn out_of_envelope_amps_map_to_zero(amps in prop_oneof![
        i32::MIN..=5,
        81i32..=i32::MAX / 25,
    ]) {
        prop_assert_eq!(duty_from_amps(amps), 0);

        let mut pilot = make_pilot();
        prop_assert!(pilot.set_pwm(amps).is_err());
        prop_assert_eq!(pilot.backend().duty_writes, 0);
    }

    /// More amps never means less duty within the lower segment.
    #[test]
    fn duty_is_monotonic_in_lower_segment(a in 6i32..=51, b in 6i32..=51) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(duty_from_amps(lo) <= duty_from_amps(hi));
    }
}
