//! Status LED task

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use thermoctl_core::control::IndicatorState;
use thermoctl_core::traits::StatusIndicator;
use thermoctl_drivers::indicator::StatusLeds;

use crate::channels::STORE;

/// Indicator task - refreshes the four LEDs from the store
#[embassy_executor::task]
pub async fn indicator_task(mut leds: StatusLeds<Output<'static>>, band_c: i16, interval_ms: u32) {
    info!("Indicator task started (band {} C)", band_c);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms)));

    loop {
        let state = IndicatorState::classify(&STORE.snapshot(), band_c);
        // A failed update leaves `shown` empty and is retried next tick
        if leds.shown() != Some(state) {
            debug!("Indicator: {:?}", state);
            leds.show(state);
        }

        ticker.next().await;
    }
}
