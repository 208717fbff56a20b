//! Configuration types
//!
//! Board-agnostic controller configuration, read at boot from an embedded
//! TOML document.

mod toml;
pub mod types;

pub use toml::parse_config;
pub use types::*;
