//! Microchip TC74 digital temperature sensor
//!
//! SMBus/I2C sensor reporting whole degrees Celsius as one two's-complement
//! byte. Reading is a write of the register pointer (RTR, 0x00) followed by
//! a one-byte read.
//!
//! Both bus flavours are supported: the blocking [`TemperatureSensor`] impl
//! for `embedded_hal::i2c::I2c`, and [`Tc74::read_celsius_async`] for
//! `embedded_hal_async::i2c::I2c`.

use embedded_hal_async::delay::DelayNs;
use thermoctl_core::traits::{SensorError, TemperatureSensor};

/// Address of the TC74A0 variant (the common part)
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Temperature register
const REG_RTR: u8 = 0x00;
/// Configuration register
const REG_RWCR: u8 = 0x01;

/// RWCR: standby (shutdown) select
const CONFIG_STANDBY: u8 = 0x80;
/// RWCR: a conversion has completed since power-up or wake
const CONFIG_DATA_READY: u8 = 0x40;

/// Interval between ready polls; one conversion takes about 125 ms
pub const READY_POLL_MS: u32 = 50;

/// TC74 on an I2C bus
pub struct Tc74<I> {
    i2c: I,
    address: u8,
}

impl<I> Tc74<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

fn check_config(config: u8) -> Result<(), SensorError> {
    if config & CONFIG_STANDBY != 0 || config & CONFIG_DATA_READY == 0 {
        Err(SensorError::NotReady)
    } else {
        Ok(())
    }
}

fn to_celsius(raw: u8) -> i16 {
    i16::from(raw as i8)
}

impl<I: embedded_hal::i2c::I2c> Tc74<I> {
    /// Check that the sensor is awake and has a conversion ready
    pub fn check_ready(&mut self) -> Result<(), SensorError> {
        let mut config = [0u8];
        self.i2c
            .write_read(self.address, &[REG_RWCR], &mut config)
            .map_err(|_| SensorError::Bus)?;
        check_config(config[0])
    }

    /// Leave standby
    pub fn wake(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[REG_RWCR, 0x00])
            .map_err(|_| SensorError::Bus)
    }
}

impl<I: embedded_hal::i2c::I2c> TemperatureSensor for Tc74<I> {
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        let mut raw = [0u8];
        self.i2c
            .write(self.address, &[REG_RTR])
            .map_err(|_| SensorError::Bus)?;
        self.i2c
            .read(self.address, &mut raw)
            .map_err(|_| SensorError::Bus)?;
        Ok(to_celsius(raw[0]))
    }
}

impl<I: embedded_hal_async::i2c::I2c> Tc74<I> {
    /// Async variant of [`TemperatureSensor::read_celsius`]
    pub async fn read_celsius_async(&mut self) -> Result<i16, SensorError> {
        let mut raw = [0u8];
        self.i2c
            .write(self.address, &[REG_RTR])
            .await
            .map_err(|_| SensorError::Bus)?;
        self.i2c
            .read(self.address, &mut raw)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(to_celsius(raw[0]))
    }

    /// Async variant of [`Tc74::check_ready`]
    pub async fn check_ready_async(&mut self) -> Result<(), SensorError> {
        let mut config = [0u8];
        self.i2c
            .write_read(self.address, &[REG_RWCR], &mut config)
            .await
            .map_err(|_| SensorError::Bus)?;
        check_config(config[0])
    }

    /// Poll until a conversion is available, up to `attempts` times
    ///
    /// Bus errors end the wait immediately.
    pub async fn wait_ready_async<D: DelayNs>(
        &mut self,
        delay: &mut D,
        attempts: u8,
    ) -> Result<(), SensorError> {
        let mut result = Err(SensorError::NotReady);
        for attempt in 0..attempts {
            if attempt > 0 {
                delay.delay_ms(READY_POLL_MS).await;
            }
            result = self.check_ready_async().await;
            if result != Err(SensorError::NotReady) {
                break;
            }
        }
        result
    }

    /// Async variant of [`Tc74::wake`]
    pub async fn wake_async(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[REG_RWCR, 0x00])
            .await
            .map_err(|_| SensorError::Bus)
    }
}
