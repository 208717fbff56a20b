//! Embassy async tasks
//!
//! Each task runs independently and shares state through the store in
//! [`crate::channels`].

pub mod buttons;
pub mod heater;
pub mod indicator;
pub mod sampler;
pub mod serial;

pub use buttons::button_task;
pub use heater::heater_task;
pub use indicator::indicator_task;
pub use sampler::sampler_task;
pub use serial::serial_task;
