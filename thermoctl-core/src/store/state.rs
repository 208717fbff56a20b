//! Control variables and their invariants
//!
//! `ControlState` is a plain value. Every mutator keeps
//! `min_temp <= setpoint <= max_temp` (whenever the bounds themselves are
//! ordered) and `10 <= sampling_rate_ms <= 60000`.

/// Default master enable
pub const DEFAULT_SYSTEM_ON: bool = false;
/// Default target temperature (°C)
pub const DEFAULT_SETPOINT_C: i16 = 25;
/// Default upper bound (°C)
pub const DEFAULT_MAX_TEMP_C: i16 = 80;
/// Default lower bound (°C)
pub const DEFAULT_MIN_TEMP_C: i16 = 0;
/// Default sampler period (ms)
pub const DEFAULT_SAMPLING_RATE_MS: u32 = 1000;

/// Shortest sampler period the store accepts (ms)
pub const MIN_SAMPLING_RATE_MS: u32 = 10;
/// Longest sampler period the store accepts (ms)
pub const MAX_SAMPLING_RATE_MS: u32 = 60_000;

/// Outcome of a relative setpoint change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetpointAdjustment {
    /// Value asked for before clamping
    pub requested: i16,
    /// Value stored
    pub setpoint: i16,
    pub min_temp: i16,
    pub max_temp: i16,
}

impl SetpointAdjustment {
    /// The request was cut back to the upper bound
    pub fn hit_max(&self) -> bool {
        self.requested > self.max_temp
    }

    /// The request was raised to the lower bound
    pub fn hit_min(&self) -> bool {
        self.requested < self.min_temp
    }
}

/// Snapshot of all control variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    system_on: bool,
    setpoint: i16,
    current_temp: i16,
    max_temp: i16,
    min_temp: i16,
    sampling_rate_ms: u32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlState {
    /// State with the built-in defaults
    pub const fn new() -> Self {
        Self {
            system_on: DEFAULT_SYSTEM_ON,
            setpoint: DEFAULT_SETPOINT_C,
            current_temp: 0,
            max_temp: DEFAULT_MAX_TEMP_C,
            min_temp: DEFAULT_MIN_TEMP_C,
            sampling_rate_ms: DEFAULT_SAMPLING_RATE_MS,
        }
    }

    /// State with configured bounds, setpoint and sampling period
    ///
    /// The setpoint and sampling period are clamped the same way the
    /// setters clamp them.
    pub fn with_limits(min_temp: i16, max_temp: i16, setpoint: i16, sampling_rate_ms: u32) -> Self {
        let mut state = Self::new();
        state.max_temp = max_temp;
        state.min_temp = min_temp;
        state.set_setpoint(setpoint);
        state.set_sampling_rate_ms(sampling_rate_ms);
        state
    }

    pub fn system_on(&self) -> bool {
        self.system_on
    }

    pub fn setpoint(&self) -> i16 {
        self.setpoint
    }

    pub fn current_temp(&self) -> i16 {
        self.current_temp
    }

    pub fn max_temp(&self) -> i16 {
        self.max_temp
    }

    pub fn min_temp(&self) -> i16 {
        self.min_temp
    }

    pub fn sampling_rate_ms(&self) -> u32 {
        self.sampling_rate_ms
    }

    pub fn set_system_on(&mut self, on: bool) {
        self.system_on = on;
    }

    /// Store `value` clamped into `[min_temp, max_temp]`
    pub fn set_setpoint(&mut self, value: i16) {
        // Upper bound wins if the bounds are crossed
        self.setpoint = if value > self.max_temp {
            self.max_temp
        } else if value < self.min_temp {
            self.min_temp
        } else {
            value
        };
    }

    pub fn set_current_temp(&mut self, value: i16) {
        self.current_temp = value;
    }

    /// Store the upper bound and pull the setpoint down to it if needed
    pub fn set_max_temp(&mut self, value: i16) {
        self.max_temp = value;
        if self.setpoint > value {
            self.setpoint = value;
        }
    }

    /// Store the lower bound and push the setpoint up to it if needed
    pub fn set_min_temp(&mut self, value: i16) {
        self.min_temp = value;
        if self.setpoint < value {
            self.setpoint = value;
        }
    }

    /// Store the upper bound unless it lies below the lower bound
    ///
    /// Returns `false` (state untouched) when rejected.
    pub fn try_set_max_temp(&mut self, value: i16) -> bool {
        if value < self.min_temp {
            return false;
        }
        self.set_max_temp(value);
        true
    }

    /// Store the lower bound unless it lies above the upper bound
    pub fn try_set_min_temp(&mut self, value: i16) -> bool {
        if value > self.max_temp {
            return false;
        }
        self.set_min_temp(value);
        true
    }

    /// Store `value` clamped into `[10, 60000]`
    pub fn set_sampling_rate_ms(&mut self, value: u32) {
        self.sampling_rate_ms = value.clamp(MIN_SAMPLING_RATE_MS, MAX_SAMPLING_RATE_MS);
    }

    /// Move the setpoint by `delta`, clamped into the bounds
    pub fn adjust_setpoint(&mut self, delta: i16) -> SetpointAdjustment {
        let requested = self.setpoint.saturating_add(delta);
        self.set_setpoint(requested);
        SetpointAdjustment {
            requested,
            setpoint: self.setpoint,
            min_temp: self.min_temp,
            max_temp: self.max_temp,
        }
    }

    /// True when the setpoint lies within the bounds
    pub fn setpoint_in_bounds(&self) -> bool {
        self.min_temp <= self.setpoint && self.setpoint <= self.max_temp
    }
}
