//! Status indicator trait

use crate::control::IndicatorState;

/// Something that can show the controller status (LEDs, a display, ...)
pub trait StatusIndicator {
    fn show(&mut self, state: IndicatorState);
}
