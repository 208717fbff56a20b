//! GPIO heater output
//!
//! Heater control through a single GPIO driving a MOSFET gate or SSR.

use embedded_hal::digital::OutputPin;
use thermoctl_core::traits::HeaterOutput;

/// GPIO heater output
///
/// The pin can be active-high or active-low. Boards with a P-channel or
/// inverted gate driver (the reference board) use active-low.
pub struct GpioHeater<P> {
    pin: P,
    /// If true, heater ON = pin LOW
    inverted: bool,
    /// Current logical state (true = heater on)
    on: bool,
}

impl<P: OutputPin> GpioHeater<P> {
    /// Create a new GPIO heater output, driven to OFF
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut heater = Self {
            pin,
            inverted,
            on: false,
        };
        heater.set_on(false);
        heater
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> HeaterOutput for GpioHeater<P> {
    /// A failed pin write leaves the recorded state unchanged
    fn set_on(&mut self, on: bool) {
        let written = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if written.is_ok() {
            self.on = on;
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        writes: usize,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_heater() {
        let mut heater = GpioHeater::new_active_high(MockPin::new());

        // Construction drives the pin
        assert!(!heater.is_on());
        assert!(!heater.pin.high);
        assert_eq!(heater.pin.writes, 1);

        heater.set_on(true);
        assert!(heater.is_on());
        assert!(heater.pin.high);

        heater.set_on(false);
        assert!(!heater.is_on());
        assert!(!heater.pin.high);
    }

    #[test]
    fn test_active_low_heater() {
        let mut heater = GpioHeater::new_active_low(MockPin::new());

        // Off means gate high
        assert!(!heater.is_on());
        assert!(heater.pin.high);

        heater.set_on(true);
        assert!(heater.is_on());
        assert!(!heater.pin.high);

        heater.set_on(false);
        assert!(heater.pin.high);
    }

    /// Pin behind a bus that can refuse writes
    struct FlakyPin {
        high: bool,
        fail: bool,
    }

    impl ErrorType for FlakyPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for FlakyPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(embedded_hal::digital::ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(embedded_hal::digital::ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut heater = GpioHeater::new_active_high(FlakyPin {
            high: false,
            fail: false,
        });

        heater.pin.fail = true;
        heater.set_on(true);
        assert!(!heater.is_on());
        assert!(!heater.pin.high);

        heater.pin.fail = false;
        heater.set_on(true);
        assert!(heater.is_on());

        // Reported state stays on when switching off fails
        heater.pin.fail = true;
        heater.set_on(false);
        assert!(heater.is_on());
        assert!(heater.pin.high);
    }

    #[test]
    fn test_into_inner() {
        let mut heater = GpioHeater::new_active_high(MockPin::new());
        heater.set_on(true);
        let pin = heater.into_inner();
        assert!(pin.high);
    }
}
