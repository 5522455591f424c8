//! LEDC pilot waveform backend (build default).
//!
//! Fast-PWM flavour of the pilot generator.  DC levels park the LEDC
//! channel at an idle level (a plain pin drive before the channel has ever
//! run), and every duty update rewrites the frequency-determining timer
//! configuration together with the channel duty.  LEDC latches duty changes
//! at counter overflow, so the rewrite lands between periods — but timer
//! config and duty must still change as a pair, which is why `apply` runs
//! entirely inside the controller's critical section.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real LEDC/GPIO registers.
//! On host/test: tracks the would-be register values in-memory only.

use crate::config::{self, PilotTimerConfig};
use crate::error::PilotError;
use crate::pilot::{PilotBackend, PilotState};
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Last write delivered to the hardware, mirrored for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedcWrite {
    /// Pin parked at a DC level (true = +12 V equivalent).
    Level(bool),
    /// PWM running with this compare value in timer counts.
    Duty(u32),
}

pub struct LedcPilotBackend {
    timing: PilotTimerConfig,
    /// Whether the LEDC channel has ever been attached to the pin.
    channel_live: bool,
    last_write: Option<LedcWrite>,
}

impl LedcPilotBackend {
    pub fn new() -> Self {
        Self {
            timing: config::PILOT_LEDC_TIMING,
            channel_live: false,
            last_write: None,
        }
    }

    pub fn last_write(&self) -> Option<LedcWrite> {
        self.last_write
    }

    fn drive_level(&mut self, high: bool) {
        if self.channel_live {
            self.ledc_park_hw(high);
        } else {
            self.gpio_write_hw(high);
        }
        self.last_write = Some(LedcWrite::Level(high));
    }
}

impl PilotBackend for LedcPilotBackend {
    fn configure(&mut self) -> Result<(), PilotError> {
        // Plain output first, so DC levels work before the LEDC channel has
        // ever been attached.
        self.gpio_init_hw()
    }

    fn apply(&mut self, state: PilotState, duty_percent: u8) {
        match state {
            PilotState::P12 => self.drive_level(true),
            PilotState::N12 => self.drive_level(false),
            PilotState::Pwm => {
                let ticks = self.timing.compare_for_duty(duty_percent);
                self.pwm_reconfigure_hw(ticks);
                self.channel_live = true;
                self.last_write = Some(LedcWrite::Duty(ticks));
            }
        }
    }
}

// ── Register layer (ESP-IDF) ──────────────────────────────────

#[cfg(target_os = "espidf")]
impl LedcPilotBackend {
    fn gpio_init_hw(&self) -> Result<(), PilotError> {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::PILOT_PWM_GPIO,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: one-time configuration of an output pin from the init path.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(PilotError::ChannelInitFailed(ret));
        }
        Ok(())
    }

    fn gpio_write_hw(&self, high: bool) {
        // SAFETY: writes to an already-configured output pin.
        unsafe {
            gpio_set_level(pins::PILOT_PWM_GPIO, u32::from(high));
        }
    }

    fn ledc_park_hw(&self, high: bool) {
        // SAFETY: the channel was configured by the last PWM update;
        // stopping it holds the pin at the idle level.
        unsafe {
            ledc_stop(
                ledc_mode_t_LEDC_LOW_SPEED_MODE,
                pins::PILOT_LEDC_CHANNEL,
                u32::from(high),
            );
        }
    }

    fn pwm_reconfigure_hw(&self, duty_ticks: u32) {
        let timer = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: pins::PILOT_LEDC_TIMER,
            duty_resolution: pins::PILOT_LEDC_RESOLUTION_BITS,
            freq_hz: self.timing.pwm_freq_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: LEDC timer/channel are owned exclusively by this backend;
        // the caller's critical section makes the config + duty pair atomic.
        unsafe {
            ledc_timer_config(&timer);
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel: pins::PILOT_LEDC_CHANNEL,
                timer_sel: pins::PILOT_LEDC_TIMER,
                gpio_num: pins::PILOT_PWM_GPIO,
                duty: duty_ticks,
                hpoint: 0,
                ..Default::default()
            });
        }
    }
}

// ── Register layer (host/simulation) ──────────────────────────

#[cfg(not(target_os = "espidf"))]
impl LedcPilotBackend {
    fn gpio_init_hw(&self) -> Result<(), PilotError> {
        Ok(())
    }

    fn gpio_write_hw(&self, _high: bool) {}

    fn ledc_park_hw(&self, _high: bool) {}

    fn pwm_reconfigure_hw(&self, _duty_ticks: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_maps_to_timer_counts() {
        let mut b = LedcPilotBackend::new();
        b.configure().unwrap();
        b.apply(PilotState::Pwm, 50);
        // 10-bit period: 50 % of 1024 counts.
        assert_eq!(b.last_write(), Some(LedcWrite::Duty(512)));
    }

    #[test]
    fn dc_levels_map_to_rail_levels() {
        let mut b = LedcPilotBackend::new();
        b.configure().unwrap();
        b.apply(PilotState::P12, 0);
        assert_eq!(b.last_write(), Some(LedcWrite::Level(true)));
        b.apply(PilotState::N12, 0);
        assert_eq!(b.last_write(), Some(LedcWrite::Level(false)));
    }

    #[test]
    fn channel_stays_parked_after_pwm() {
        let mut b = LedcPilotBackend::new();
        b.configure().unwrap();
        b.apply(PilotState::Pwm, 25);
        assert!(b.channel_live);
        b.apply(PilotState::P12, 0);
        assert_eq!(b.last_write(), Some(LedcWrite::Level(true)));
    }
}
