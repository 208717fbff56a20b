//! Temperature sensor implementations

pub mod tc74;

pub use tc74::Tc74;
