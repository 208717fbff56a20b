//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermoctl-core on top of `embedded-hal` 1.0:
//!
//! - TC74 I2C temperature sensor
//! - GPIO heater output (active-high or active-low gate)
//! - Four-LED status panel

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod heater;
pub mod indicator;
pub mod sensor;
