//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use thermoctl_protocol::LineEndingPolicy;

use crate::store::{
    ControlState, DEFAULT_MAX_TEMP_C, DEFAULT_MIN_TEMP_C, DEFAULT_SAMPLING_RATE_MS,
    DEFAULT_SETPOINT_C, MAX_SAMPLING_RATE_MS, MIN_SAMPLING_RATE_MS,
};

/// Default heater hysteresis (°C)
pub const DEFAULT_HYSTERESIS_C: i16 = 1;
/// Default heater decision period (ms)
pub const DEFAULT_CONTROL_INTERVAL_MS: u32 = 2000;
/// Default half-width of the indicator's "normal" band (°C)
pub const DEFAULT_INDICATOR_BAND_C: i16 = 2;
/// Default LED refresh period (ms)
pub const DEFAULT_INDICATOR_INTERVAL_MS: u32 = 250;
/// Default button debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;
/// Default TC74 bus address (TC74A0)
pub const DEFAULT_SENSOR_ADDRESS: u8 = 0x48;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Document could not be parsed
    Parse(ParseError),
    /// `min_temp_c` exceeds `max_temp_c`
    InvalidBounds,
    /// `setpoint_c` outside `[min_temp_c, max_temp_c]`
    SetpointOutOfRange,
    /// `sampling_rate_ms` outside `[10, 60000]`
    InvalidSamplingRate,
    /// A task period is zero
    InvalidInterval,
    /// Negative hysteresis or indicator band
    InvalidBand,
}

/// Parse failure with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed `[section]` header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value of the wrong type or out of its type's range
    InvalidValue,
    /// Line is neither a header nor `key = value`
    MalformedLine,
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Boot values for the control-state store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct StoreConfig {
    pub setpoint_c: i16,
    pub min_temp_c: i16,
    pub max_temp_c: i16,
    pub sampling_rate_ms: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            setpoint_c: DEFAULT_SETPOINT_C,
            min_temp_c: DEFAULT_MIN_TEMP_C,
            max_temp_c: DEFAULT_MAX_TEMP_C,
            sampling_rate_ms: DEFAULT_SAMPLING_RATE_MS,
        }
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ProtocolConfig {
    /// CR/LF handling on the receive side
    pub line_endings: LineEndingPolicy,
}

/// Heater loop and status LED settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControlConfig {
    /// Dead band around the setpoint in which the heater keeps its state
    pub hysteresis_c: i16,
    pub control_interval_ms: u32,
    /// Readings within `setpoint ± band` light the "normal" LED
    pub indicator_band_c: i16,
    pub indicator_interval_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            hysteresis_c: DEFAULT_HYSTERESIS_C,
            control_interval_ms: DEFAULT_CONTROL_INTERVAL_MS,
            indicator_band_c: DEFAULT_INDICATOR_BAND_C,
            indicator_interval_ms: DEFAULT_INDICATOR_INTERVAL_MS,
        }
    }
}

/// Push-button settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ButtonConfig {
    pub debounce_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Temperature sensor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SensorConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_SENSOR_ADDRESS,
        }
    }
}

/// Complete controller configuration
///
/// Every section and every key is optional in the TOML document; missing
/// values take the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControllerConfig {
    pub store: StoreConfig,
    pub protocol: ProtocolConfig,
    pub control: ControlConfig,
    pub buttons: ButtonConfig,
    pub sensor: SensorConfig,
}

impl ControllerConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let store = &self.store;
        if store.min_temp_c > store.max_temp_c {
            return Err(ConfigError::InvalidBounds);
        }
        if store.setpoint_c < store.min_temp_c || store.setpoint_c > store.max_temp_c {
            return Err(ConfigError::SetpointOutOfRange);
        }
        if !(MIN_SAMPLING_RATE_MS..=MAX_SAMPLING_RATE_MS).contains(&store.sampling_rate_ms) {
            return Err(ConfigError::InvalidSamplingRate);
        }

        let control = &self.control;
        if control.control_interval_ms == 0
            || control.indicator_interval_ms == 0
            || self.buttons.debounce_ms == 0
        {
            return Err(ConfigError::InvalidInterval);
        }
        if control.hysteresis_c < 0 || control.indicator_band_c < 0 {
            return Err(ConfigError::InvalidBand);
        }

        Ok(())
    }

    /// Store contents at boot (system off, no reading yet)
    pub fn initial_state(&self) -> ControlState {
        ControlState::with_limits(
            self.store.min_temp_c,
            self.store.max_temp_c,
            self.store.setpoint_c,
            self.store.sampling_rate_ms,
        )
    }
}
