//! Shared control-state store
//!
//! The only stateful entity of the controller. The sampler, the buttons,
//! the heater loop and the serial protocol all go through it.

mod shared;
mod state;

pub use shared::ControlStore;
pub use state::{
    ControlState, DEFAULT_MAX_TEMP_C, DEFAULT_MIN_TEMP_C, DEFAULT_SAMPLING_RATE_MS,
    DEFAULT_SETPOINT_C, DEFAULT_SYSTEM_ON, MAX_SAMPLING_RATE_MS, MIN_SAMPLING_RATE_MS,
    SetpointAdjustment,
};
