//! State shared between Embassy tasks
//!
//! Every task reads and writes the controller state through [`STORE`];
//! its lock is a critical section, so it is safe from any executor.

use thermoctl_core::store::ControlStore;

/// Controller state: bounds, setpoint, last reading, sampling rate, enable
pub static STORE: ControlStore = ControlStore::new();
