//! Board-agnostic core logic for the thermoctl controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Shared control-state store (setpoint, bounds, reading, sampling rate)
//! - Serial command dispatcher and protocol engine
//! - Heater decision, status indicator and button logic
//! - Hardware abstraction traits (sensor, heater, indicator)
//! - Configuration types and TOML loading

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod dispatch;
pub mod store;
pub mod traits;
