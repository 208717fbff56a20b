//! Status indicator implementations

pub mod leds;

pub use leds::StatusLeds;
