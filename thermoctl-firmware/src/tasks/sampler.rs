//! Temperature sampler task
//!
//! Reads the TC74 and publishes the value as the store's current reading.
//! The period is re-read from the store every cycle so a set-rate command
//! takes effect on the next sample.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};

use thermoctl_drivers::sensor::Tc74;

use crate::channels::STORE;

pub type SensorBus = I2c<'static, I2C0, Async>;

/// Ready polls after wake, about one second in total
const READY_ATTEMPTS: u8 = 20;

/// Sampler task - one TC74 read per sampling period
#[embassy_executor::task]
pub async fn sampler_task(mut sensor: Tc74<SensorBus>) {
    info!("Sampler task started (TC74 at {:#x})", sensor.address());

    // The part can power up in standby
    if let Err(e) = sensor.wake_async().await {
        warn!("TC74 wake failed: {:?}", e);
    }

    // Don't publish a reading before the first conversion
    match sensor.wait_ready_async(&mut Delay, READY_ATTEMPTS).await {
        Ok(()) => debug!("TC74 conversion ready"),
        Err(e) => warn!("TC74 not ready: {:?}", e),
    }

    let mut faulted = false;

    loop {
        match sensor.read_celsius_async().await {
            Ok(temp) => {
                if faulted {
                    info!("Sensor recovered");
                    faulted = false;
                }
                trace!("Sample: {} C", temp);
                STORE.set_current_temp(temp);
            }
            Err(e) => {
                // Keep the last good reading
                if !faulted {
                    warn!("Sensor read failed: {:?}", e);
                    faulted = true;
                }
            }
        }

        Timer::after_millis(u64::from(STORE.get_sampling_rate_ms())).await;
    }
}
