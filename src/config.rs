//! Pilot timer configuration
//!
//! The 1 kHz timing invariant lives here as a small typed value computed
//! from tick rate and target frequency, instead of magic numbers spread
//! across the register writes.  Both waveform backends consume an instance
//! of [`PilotTimerConfig`] for their period/compare arithmetic.

use crate::pins;

/// Frequency-determining parameters of a pilot PWM timer.
///
/// `tick_hz / pwm_freq_hz` gives the period in timer counts (the "top"
/// value).  A symmetric (up-down counting) timer crosses the compare value
/// twice per period, so its usable compare span is half the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PilotTimerConfig {
    /// Rate at which the timer counter advances.
    pub tick_hz: u32,
    /// Target output frequency of the square wave.
    pub pwm_freq_hz: u32,
    /// Up-down counting (phase-correct) rather than edge-aligned.
    pub symmetric: bool,
}

impl PilotTimerConfig {
    /// Waveform period in timer counts.
    pub const fn period_ticks(&self) -> u32 {
        self.tick_hz / self.pwm_freq_hz
    }

    /// Largest compare value, i.e. the value that holds the output high for
    /// the full period.
    pub const fn compare_span(&self) -> u32 {
        if self.symmetric {
            self.period_ticks() / 2
        } else {
            self.period_ticks()
        }
    }

    /// Compare value whose high-time fraction equals `duty_percent`,
    /// to within rounding of one timer count.
    pub const fn compare_for_duty(&self, duty_percent: u8) -> u32 {
        self.compare_span() * duty_percent as u32 / 100
    }
}

/// LEDC backend timing: edge-aligned counter, 10-bit resolution, so the
/// effective tick rate is `2^bits × 1 kHz`.
pub const PILOT_LEDC_TIMING: PilotTimerConfig = PilotTimerConfig {
    tick_hz: (1 << pins::PILOT_LEDC_RESOLUTION_BITS) * pins::PILOT_PWM_FREQ_HZ,
    pwm_freq_hz: pins::PILOT_PWM_FREQ_HZ,
    symmetric: false,
};

/// MCPWM backend timing: symmetric up-down counter at 1 MHz tick.
pub const PILOT_MCPWM_TIMING: PilotTimerConfig = PilotTimerConfig {
    tick_hz: pins::PILOT_MCPWM_TICK_HZ,
    pwm_freq_hz: pins::PILOT_PWM_FREQ_HZ,
    symmetric: true,
};

/// Current offered on the demo path in `main` until a session controller
/// exists to decide ampacity.
pub const DEFAULT_OFFER_AMPS: i32 = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledc_timing_holds_1khz() {
        let t = PILOT_LEDC_TIMING;
        assert_eq!(t.tick_hz / t.period_ticks(), 1_000);
        assert_eq!(t.period_ticks(), 1 << pins::PILOT_LEDC_RESOLUTION_BITS);
    }

    #[test]
    fn ledc_period_is_power_of_two() {
        // LEDC duty resolution is expressed in bits, so the period must be
        // exactly representable.
        assert!(PILOT_LEDC_TIMING.period_ticks().is_power_of_two());
    }

    #[test]
    fn mcpwm_timing_holds_1khz() {
        let t = PILOT_MCPWM_TIMING;
        assert_eq!(t.tick_hz / t.period_ticks(), 1_000);
        assert_eq!(t.period_ticks(), 1_000);
        assert_eq!(t.compare_span(), 500);
    }

    #[test]
    fn compare_scales_linearly() {
        let t = PILOT_LEDC_TIMING;
        assert_eq!(t.compare_for_duty(0), 0);
        assert_eq!(t.compare_for_duty(100), t.compare_span());
        assert_eq!(t.compare_for_duty(50), t.compare_span() / 2);

        let m = PILOT_MCPWM_TIMING;
        assert_eq!(m.compare_for_duty(10), 50);
        assert_eq!(m.compare_for_duty(85), 425);
    }

    #[test]
    fn default_offer_is_within_envelope() {
        assert!((6..=80).contains(&DEFAULT_OFFER_AMPS));
    }
}
