//! Boot configuration
//!
//! controller.toml is compiled into the image and parsed once at boot.
//! build.rs has already rejected documents the parser cannot load, so the
//! fallback below only matters for images built with validation bypassed.

use defmt::*;

use thermoctl_core::config::{parse_config, ControllerConfig};

/// Embedded configuration (edit controller.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../controller.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load_config() -> ControllerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            ControllerConfig::default()
        }
    }
}
