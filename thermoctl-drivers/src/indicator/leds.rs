//! Four-LED status panel
//!
//! LED0 power, LED1 normal, LED2 low, LED3 high. While the system is on
//! exactly one of the three temperature LEDs is lit.

use embedded_hal::digital::{OutputPin, PinState};
use thermoctl_core::control::IndicatorState;
use thermoctl_core::traits::StatusIndicator;

/// Status LEDs, all active-high
pub struct StatusLeds<P> {
    power: P,
    normal: P,
    low: P,
    high: P,
    /// Last state every pin accepted
    shown: Option<IndicatorState>,
}

impl<P: OutputPin> StatusLeds<P> {
    /// Take the four pins and switch every LED off
    pub fn new(power: P, normal: P, low: P, high: P) -> Self {
        let mut leds = Self {
            power,
            normal,
            low,
            high,
            shown: None,
        };
        leds.show(IndicatorState::Off);
        leds
    }

    /// State currently on the LEDs, `None` if the last update failed
    pub fn shown(&self) -> Option<IndicatorState> {
        self.shown
    }
}

impl<P: OutputPin> StatusIndicator for StatusLeds<P> {
    fn show(&mut self, state: IndicatorState) {
        let lit = |on: bool| PinState::from(on);

        // Every pin is written even if an earlier one fails
        let results = [
            self.power.set_state(lit(state.power())),
            self.normal.set_state(lit(state == IndicatorState::Normal)),
            self.low.set_state(lit(state == IndicatorState::Low)),
            self.high.set_state(lit(state == IndicatorState::High)),
        ];
        self.shown = results.iter().all(Result::is_ok).then_some(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct MockPin {
        high: bool,
        fail: bool,
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), ErrorKind> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), ErrorKind> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }
    }

    fn leds() -> StatusLeds<MockPin> {
        let pin = || MockPin {
            high: true,
            fail: false,
        };
        StatusLeds::new(pin(), pin(), pin(), pin())
    }

    fn lit(leds: &StatusLeds<MockPin>) -> [bool; 4] {
        [leds.power.high, leds.normal.high, leds.low.high, leds.high.high]
    }

    #[test]
    fn test_starts_dark() {
        let panel = leds();
        assert_eq!(lit(&panel), [false; 4]);
        assert_eq!(panel.shown(), Some(IndicatorState::Off));
    }

    #[test]
    fn test_failed_write_not_reported_shown() {
        let mut panel = leds();

        panel.low.fail = true;
        panel.show(IndicatorState::Normal);
        assert_eq!(panel.shown(), None);
        // The other pins were still updated
        assert_eq!(lit(&panel), [true, true, false, false]);

        panel.low.fail = false;
        panel.show(IndicatorState::Normal);
        assert_eq!(panel.shown(), Some(IndicatorState::Normal));
    }

    #[test]
    fn test_one_temperature_led_at_a_time() {
        let mut panel = leds();

        panel.show(IndicatorState::Low);
        assert_eq!(lit(&panel), [true, false, true, false]);

        panel.show(IndicatorState::Normal);
        assert_eq!(lit(&panel), [true, true, false, false]);

        panel.show(IndicatorState::High);
        assert_eq!(lit(&panel), [true, false, false, true]);

        panel.show(IndicatorState::Off);
        assert_eq!(lit(&panel), [false; 4]);
    }
}
