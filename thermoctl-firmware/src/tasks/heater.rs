//! Heater control task
//!
//! On/off control with hysteresis around the store's setpoint, bounded by
//! its min/max limits.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use thermoctl_core::control::{HeatReason, Thermostat};
use thermoctl_core::traits::HeaterOutput;
use thermoctl_drivers::heater::GpioHeater;

use crate::channels::STORE;

/// Heater task - one decision per control interval
#[embassy_executor::task]
pub async fn heater_task(mut heater: GpioHeater<Output<'static>>, hysteresis_c: i16, interval_ms: u32) {
    info!(
        "Heater task started (hysteresis {} C, every {} ms)",
        hysteresis_c, interval_ms
    );

    let mut thermostat = Thermostat::new(hysteresis_c);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms)));
    let mut last_reason = HeatReason::SystemOff;

    loop {
        let was_on = thermostat.heater_on();
        let state = STORE.snapshot();
        let decision = thermostat.drive(&state, &mut heater);
        if heater.is_on() != decision.heater_on {
            warn!("Heater pin did not switch {}", if decision.heater_on { "ON" } else { "OFF" });
        }

        if decision.heater_on != was_on {
            info!(
                "Heater {} ({:?}) at {} C, setpoint {} C",
                if decision.heater_on { "ON" } else { "OFF" },
                decision.reason,
                state.current_temp(),
                state.setpoint()
            );
        } else if decision.reason != last_reason {
            debug!("Heater {:?} at {} C", decision.reason, state.current_temp());
        }
        last_reason = decision.reason;

        ticker.next().await;
    }
}
