//! Status indicator classification

use crate::store::ControlState;

/// What the status LEDs should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorState {
    /// System off: every LED dark
    Off,
    /// Reading below `setpoint - band`
    Low,
    /// Reading within `setpoint ± band`
    Normal,
    /// Reading above `setpoint + band`
    High,
}

impl IndicatorState {
    /// Classify a store snapshot
    pub fn classify(state: &ControlState, band_c: i16) -> Self {
        if !state.system_on() {
            return IndicatorState::Off;
        }
        let current = state.current_temp();
        let setpoint = state.setpoint();
        if current < setpoint.saturating_sub(band_c) {
            IndicatorState::Low
        } else if current > setpoint.saturating_add(band_c) {
            IndicatorState::High
        } else {
            IndicatorState::Normal
        }
    }

    /// Power LED lit
    pub fn power(&self) -> bool {
        !matches!(self, IndicatorState::Off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(on: bool, current: i16) -> ControlState {
        let mut s = ControlState::new();
        s.set_system_on(on);
        s.set_current_temp(current);
        s
    }

    #[test]
    fn test_off_when_system_off() {
        let s = state(false, 0);
        assert_eq!(IndicatorState::classify(&s, 2), IndicatorState::Off);
        assert!(!IndicatorState::Off.power());
    }

    #[test]
    fn test_band_edges() {
        // setpoint defaults to 25
        assert_eq!(IndicatorState::classify(&state(true, 22), 2), IndicatorState::Low);
        assert_eq!(IndicatorState::classify(&state(true, 23), 2), IndicatorState::Normal);
        assert_eq!(IndicatorState::classify(&state(true, 27), 2), IndicatorState::Normal);
        assert_eq!(IndicatorState::classify(&state(true, 28), 2), IndicatorState::High);
        assert!(IndicatorState::Normal.power());
    }
}
