//! On/off heater decision
//!
//! Bounds take priority over the setpoint: above `max_temp` the heater is
//! always off, below `min_temp` always on. Between them the heater switches
//! on under `setpoint - hysteresis` and off at `setpoint + hysteresis`,
//! holding its previous state in the band between.

use crate::store::ControlState;
use crate::traits::HeaterOutput;

/// Why the heater is in its commanded state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeatReason {
    /// Master enable is off
    SystemOff,
    /// Reading above the upper bound
    AboveMax,
    /// Reading below the lower bound
    BelowMin,
    /// Reading under the hysteresis band
    BelowSetpoint,
    /// Reading at or over the hysteresis band
    AtSetpoint,
    /// Reading inside the band; previous state kept
    Holding,
}

/// Heater command with its reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeatDecision {
    pub heater_on: bool,
    pub reason: HeatReason,
}

/// Decide the heater state for one control cycle
pub fn decide(state: &ControlState, heater_was_on: bool, hysteresis_c: i16) -> HeatDecision {
    let current = state.current_temp();
    let setpoint = state.setpoint();

    let (heater_on, reason) = if !state.system_on() {
        (false, HeatReason::SystemOff)
    } else if current > state.max_temp() {
        (false, HeatReason::AboveMax)
    } else if current < state.min_temp() {
        (true, HeatReason::BelowMin)
    } else if current < setpoint.saturating_sub(hysteresis_c) {
        (true, HeatReason::BelowSetpoint)
    } else if current >= setpoint.saturating_add(hysteresis_c) {
        (false, HeatReason::AtSetpoint)
    } else {
        (heater_was_on, HeatReason::Holding)
    };

    HeatDecision { heater_on, reason }
}

/// Heater loop state: remembers the last commanded output
#[derive(Debug, Clone)]
pub struct Thermostat {
    hysteresis_c: i16,
    heater_on: bool,
}

impl Thermostat {
    pub fn new(hysteresis_c: i16) -> Self {
        Self {
            hysteresis_c,
            heater_on: false,
        }
    }

    /// Last commanded heater state
    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    /// Decide from a store snapshot and remember the result
    pub fn update(&mut self, state: &ControlState) -> HeatDecision {
        let decision = decide(state, self.heater_on, self.hysteresis_c);
        self.heater_on = decision.heater_on;
        decision
    }

    /// Decide and apply the result to `heater`
    pub fn drive<H: HeaterOutput>(&mut self, state: &ControlState, heater: &mut H) -> HeatDecision {
        let decision = self.update(state);
        heater.set_on(decision.heater_on);
        decision
    }
}
