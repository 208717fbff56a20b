//! Front-panel button task
//!
//! One instance per button. Buttons pull their pin low when pressed; a
//! press counts once, and the task waits for release before re-arming.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Timer};

use thermoctl_core::control::{ButtonAction, ButtonOutcome, Debouncer};

use crate::channels::STORE;

/// Button task - applies `action` on every debounced press
#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(mut input: Input<'static>, action: ButtonAction, debounce_ms: u32) {
    info!("Button task started ({:?})", action);

    let mut debouncer = Debouncer::new(debounce_ms);

    loop {
        input.wait_for_falling_edge().await;

        if debouncer.accept(Instant::now().as_millis() as u32) {
            report(action.apply(&STORE));
        } else {
            trace!("Bounce ignored ({:?})", action);
        }

        // Wait for release, then let the contacts settle
        input.wait_for_high().await;
        Timer::after(Duration::from_millis(u64::from(debounce_ms))).await;
    }
}

fn report(outcome: ButtonOutcome) {
    match outcome {
        ButtonOutcome::Power(on) => {
            info!("System now {}", if on { "ON" } else { "OFF" });
        }
        ButtonOutcome::Setpoint(setpoint) => {
            info!("Setpoint {} C", setpoint);
        }
        ButtonOutcome::AtMaximum(max) => {
            warn!("Setpoint already at maximum ({} C)", max);
        }
        ButtonOutcome::AtMinimum(min) => {
            warn!("Setpoint already at minimum ({} C)", min);
        }
        ButtonOutcome::Status(state) => {
            info!(
                "Status: system {}, setpoint {} C, current {} C, limits [{}, {}] C, sampling {} ms",
                if state.system_on() { "ON" } else { "OFF" },
                state.setpoint(),
                state.current_temp(),
                state.min_temp(),
                state.max_temp(),
                state.sampling_rate_ms()
            );
        }
    }
}
