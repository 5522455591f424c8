//! EVSE Pilot Firmware — Main Entry Point
//!
//! Brings up the J1772 control-pilot generator and parks it in the ready
//! state.  The charging-session controller that decides *when* to change
//! the offer lives above this crate; until it exists, `main` offers the
//! configured demo current so the waveform can be probed on the bench.
//!
//! ```text
//!  main ──▶ Pilot<BoardPilotBackend> ──▶ LEDC / MCPWM registers ──▶ pilot pin
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod esp_link_shims;
mod pins;

pub mod drivers;
pub mod pilot;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use drivers::BoardPilotBackend;
use pilot::Pilot;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  EVSE Pilot v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Pilot bring-up ─────────────────────────────────────
    let mut pilot = Pilot::new(BoardPilotBackend::new());
    if let Err(e) = pilot.init() {
        // Pilot timer init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("pilot init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    info!("pilot ready: +12 V steady at 1 kHz capability");

    // ── 3. Demo current offer ─────────────────────────────────
    match pilot.set_pwm(config::DEFAULT_OFFER_AMPS) {
        Ok(()) => info!("pilot: PWM offer active, state {:?}", pilot.state()),
        Err(e) => warn!("pilot: offer rejected ({}), state {:?}", e, pilot.state()),
    }

    // ── 4. Idle loop ──────────────────────────────────────────
    // The waveform runs from the timer without CPU involvement; nothing to
    // do until a session controller issues new commands.
    loop {
        // On real hardware, yield to FreeRTOS; on simulation targets,
        // approximate the tick with a thread sleep.
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(1_000);
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(1_000));
    }
}
