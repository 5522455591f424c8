//! MCPWM pilot waveform backend.
//!
//! Phase-and-frequency-correct flavour: a symmetric up-down timer whose
//! period is fixed once at configure time.  Every subsequent update — DC
//! level or duty — is a single comparator write: `P12` parks the compare at
//! the full span (output high for the whole period), `N12` at zero, and PWM
//! at `duty × span / 100`.  The comparator latches new values when the
//! counter reaches empty, so a write never shortens the period in flight.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real MCPWM timer/operator/generator chain.
//! On host/test: tracks the would-be compare value in-memory only.

use crate::config::{self, PilotTimerConfig};
use crate::error::PilotError;
use crate::pilot::{PilotBackend, PilotState};
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

pub struct McpwmPilotBackend {
    timing: PilotTimerConfig,
    last_compare: Option<u32>,
    #[cfg(target_os = "espidf")]
    timer: mcpwm_timer_handle_t,
    #[cfg(target_os = "espidf")]
    oper: mcpwm_oper_handle_t,
    #[cfg(target_os = "espidf")]
    cmpr: mcpwm_cmpr_handle_t,
    #[cfg(target_os = "espidf")]
    generator: mcpwm_gen_handle_t,
}

impl McpwmPilotBackend {
    pub fn new() -> Self {
        Self {
            timing: config::PILOT_MCPWM_TIMING,
            last_compare: None,
            #[cfg(target_os = "espidf")]
            timer: core::ptr::null_mut(),
            #[cfg(target_os = "espidf")]
            oper: core::ptr::null_mut(),
            #[cfg(target_os = "espidf")]
            cmpr: core::ptr::null_mut(),
            #[cfg(target_os = "espidf")]
            generator: core::ptr::null_mut(),
        }
    }

    pub fn last_compare(&self) -> Option<u32> {
        self.last_compare
    }
}

impl PilotBackend for McpwmPilotBackend {
    fn configure(&mut self) -> Result<(), PilotError> {
        self.build_chain_hw()
    }

    fn apply(&mut self, state: PilotState, duty_percent: u8) {
        let compare = match state {
            PilotState::P12 => self.timing.compare_span(),
            PilotState::N12 => 0,
            PilotState::Pwm => self.timing.compare_for_duty(duty_percent),
        };
        self.set_compare_hw(compare);
        self.last_compare = Some(compare);
    }
}

// ── Register layer (ESP-IDF) ──────────────────────────────────

#[cfg(target_os = "espidf")]
impl McpwmPilotBackend {
    fn build_chain_hw(&mut self) -> Result<(), PilotError> {
        // SAFETY: one-time construction of driver objects this backend owns
        // exclusively, called from the single-threaded init path.
        unsafe {
            let timer_cfg = mcpwm_timer_config_t {
                group_id: pins::PILOT_MCPWM_GROUP,
                clk_src: mcpwm_timer_clock_source_t_MCPWM_TIMER_CLK_SRC_DEFAULT,
                resolution_hz: self.timing.tick_hz,
                count_mode: mcpwm_timer_count_mode_t_MCPWM_TIMER_COUNT_MODE_UP_DOWN,
                period_ticks: self.timing.period_ticks(),
                ..Default::default()
            };
            let ret = mcpwm_new_timer(&timer_cfg, &raw mut self.timer);
            if ret != ESP_OK as i32 {
                return Err(PilotError::TimerInitFailed(ret));
            }

            let oper_cfg = mcpwm_operator_config_t {
                group_id: pins::PILOT_MCPWM_GROUP,
                ..Default::default()
            };
            let ret = mcpwm_new_operator(&oper_cfg, &raw mut self.oper);
            if ret != ESP_OK as i32 {
                return Err(PilotError::TimerInitFailed(ret));
            }

            let ret = mcpwm_operator_connect_timer(self.oper, self.timer);
            if ret != ESP_OK as i32 {
                return Err(PilotError::TimerInitFailed(ret));
            }

            // Compare updates latch at count-empty so a mid-period write
            // cannot produce a runt pulse.
            let mut cmpr_cfg = mcpwm_comparator_config_t::default();
            cmpr_cfg.flags.set_update_cmp_on_tez(1);
            let ret = mcpwm_new_comparator(self.oper, &cmpr_cfg, &raw mut self.cmpr);
            if ret != ESP_OK as i32 {
                return Err(PilotError::ChannelInitFailed(ret));
            }

            let gen_cfg = mcpwm_generator_config_t {
                gen_gpio_num: pins::PILOT_PWM_GPIO,
                ..Default::default()
            };
            let ret = mcpwm_new_generator(self.oper, &gen_cfg, &raw mut self.generator);
            if ret != ESP_OK as i32 {
                return Err(PilotError::ChannelInitFailed(ret));
            }

            // Symmetric waveform: low past the compare while counting up,
            // high again past it while counting down.
            let ret = mcpwm_generator_set_action_on_compare_event(
                self.generator,
                mcpwm_gen_compare_event_action_t {
                    direction: mcpwm_timer_direction_t_MCPWM_TIMER_DIRECTION_UP,
                    comparator: self.cmpr,
                    action: mcpwm_generator_action_t_MCPWM_GEN_ACTION_LOW,
                },
            );
            if ret != ESP_OK as i32 {
                return Err(PilotError::ChannelInitFailed(ret));
            }
            let ret = mcpwm_generator_set_action_on_compare_event(
                self.generator,
                mcpwm_gen_compare_event_action_t {
                    direction: mcpwm_timer_direction_t_MCPWM_TIMER_DIRECTION_DOWN,
                    comparator: self.cmpr,
                    action: mcpwm_generator_action_t_MCPWM_GEN_ACTION_HIGH,
                },
            );
            if ret != ESP_OK as i32 {
                return Err(PilotError::ChannelInitFailed(ret));
            }

            mcpwm_comparator_set_compare_value(self.cmpr, 0);

            let ret = mcpwm_timer_enable(self.timer);
            if ret != ESP_OK as i32 {
                return Err(PilotError::TimerInitFailed(ret));
            }
            let ret = mcpwm_timer_start_stop(
                self.timer,
                mcpwm_timer_start_stop_cmd_t_MCPWM_TIMER_START_NO_STOP,
            );
            if ret != ESP_OK as i32 {
                return Err(PilotError::TimerInitFailed(ret));
            }
        }
        Ok(())
    }

    fn set_compare_hw(&self, compare: u32) {
        // SAFETY: comparator handle was created in build_chain_hw(); routine
        // compare writes are race-free under the caller's critical section.
        unsafe {
            mcpwm_comparator_set_compare_value(self.cmpr, compare);
        }
    }
}

// ── Register layer (host/simulation) ──────────────────────────

#[cfg(not(target_os = "espidf"))]
impl McpwmPilotBackend {
    fn build_chain_hw(&mut self) -> Result<(), PilotError> {
        Ok(())
    }

    fn set_compare_hw(&self, _compare: u32) {}
}
