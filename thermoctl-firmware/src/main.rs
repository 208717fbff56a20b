//! thermoctl - Heater Controller Firmware
//!
//! Main firmware binary for RP2040-based boards. A TC74 sensor is sampled
//! into a shared control-state store; a heater GPIO, four status LEDs and
//! four buttons act on it, and the console UART speaks the
//! `#<CMD><DATA><CS>!` command protocol against the same store.
//!
//! Pin map:
//!
//! | function | pin |
//! |----------|-----|
//! | console UART0 TX / RX | GPIO0 / GPIO1 |
//! | TC74 I2C0 SDA / SCL | GPIO4 / GPIO5 |
//! | heater gate (active-low) | GPIO15 |
//! | LED power / normal / low / high | GPIO25 / GPIO16 / GPIO17 / GPIO18 |
//! | SW0 power, SW1 up, SW2 status, SW3 down | GPIO10 .. GPIO13 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermoctl_core::control::ButtonAction;
use thermoctl_drivers::heater::GpioHeater;
use thermoctl_drivers::indicator::StatusLeds;
use thermoctl_drivers::sensor::Tc74;

use crate::channels::STORE;
use crate::config::load_config;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Console baud rate
const UART_BAUD: u32 = 115_200;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("thermoctl firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    STORE.reinitialize(config.initial_state());
    info!(
        "Store: setpoint {} C, limits [{}, {}] C, sampling {} ms",
        config.store.setpoint_c,
        config.store.min_temp_c,
        config.store.max_temp_c,
        config.store.sampling_rate_ms
    );

    // Console UART
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUD;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let (tx, rx) = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config)
        .into_buffered(Irqs, tx_buf, rx_buf)
        .split();

    info!("Console UART initialized at {} baud", UART_BAUD);

    // TC74 on I2C0
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let sensor = Tc74::new(i2c, config.sensor.i2c_address);

    // Heater gate idles high (off) until the first decision
    let heater = GpioHeater::new_active_low(Output::new(p.PIN_15, Level::High));

    let leds = StatusLeds::new(
        Output::new(p.PIN_25, Level::Low),
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_18, Level::Low),
    );

    let debounce_ms = config.buttons.debounce_ms;
    let sw_power = Input::new(p.PIN_10, Pull::Up);
    let sw_up = Input::new(p.PIN_11, Pull::Up);
    let sw_status = Input::new(p.PIN_12, Pull::Up);
    let sw_down = Input::new(p.PIN_13, Pull::Up);

    // Spawn tasks
    spawner
        .spawn(tasks::serial_task(tx, rx, config.protocol.line_endings))
        .unwrap();
    spawner.spawn(tasks::sampler_task(sensor)).unwrap();
    spawner
        .spawn(tasks::heater_task(
            heater,
            config.control.hysteresis_c,
            config.control.control_interval_ms,
        ))
        .unwrap();
    spawner
        .spawn(tasks::indicator_task(
            leds,
            config.control.indicator_band_c,
            config.control.indicator_interval_ms,
        ))
        .unwrap();
    spawner
        .spawn(tasks::button_task(sw_power, ButtonAction::TogglePower, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(sw_up, ButtonAction::Increment, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(sw_status, ButtonAction::Status, debounce_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(sw_down, ButtonAction::Decrement, debounce_ms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
