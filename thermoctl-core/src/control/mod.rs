//! Control collaborators around the store
//!
//! Pure decision logic for the heater loop, the status LEDs and the
//! front-panel buttons. The firmware tasks own the timing and the I/O.

pub mod buttons;
pub mod indicator;
pub mod thermostat;

pub use buttons::{ButtonAction, ButtonOutcome, Debouncer};
pub use indicator::IndicatorState;
pub use thermostat::{decide, HeatDecision, HeatReason, Thermostat};
