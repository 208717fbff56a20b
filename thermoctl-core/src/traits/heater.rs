//! Heater and temperature sensor traits

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed (NAK, arbitration loss, timeout)
    Bus,
    /// Sensor is in standby or has not finished its first conversion
    NotReady,
}

/// Trait for temperature sensors
///
/// Readings are whole degrees Celsius, the resolution the store and the
/// wire protocol carry.
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Takes `&mut self` because bus reads require mutable access.
    fn read_celsius(&mut self) -> Result<i16, SensorError>;
}

/// Trait for heater output control
///
/// Implementations drive the heater element via GPIO, PWM, or SSR.
pub trait HeaterOutput {
    /// Turn the heater on or off
    fn set_on(&mut self, on: bool);

    /// Check if the heater is currently on
    fn is_on(&self) -> bool;
}
