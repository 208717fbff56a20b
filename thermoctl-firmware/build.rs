//! Build script for thermoctl-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thermoctl_core::config::{parse_config, ControllerConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate controller.toml at compile time
///
/// The document is checked twice: with the `toml` crate against the serde
/// shape of [`ControllerConfig`], and with the firmware's own boot-time
/// parser, which only understands a subset of TOML. Both must agree, so a
/// document that builds is a document the firmware will load.
fn validate_config() {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds controller.toml as its boot configuration.  ║\n\
            ║  Please create one in the thermoctl-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and shape
    let config: ControllerConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid controller.toml                                  ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    // Cross-field rules
    if let Err(e) = config.validate() {
        report_errors(
            "Invalid controller configuration",
            &[format!("{:?}", e), describe_values(&config)],
        );
    }

    // Boot-time parser must see the same document
    match parse_config(&config_content) {
        Ok(parsed) if parsed == config => {}
        Ok(parsed) => report_errors(
            "controller.toml uses TOML the firmware cannot read",
            &[
                String::from("Boot-time parser disagrees with the toml crate:"),
                format!("toml:     {}", describe_values(&config)),
                format!("firmware: {}", describe_values(&parsed)),
            ],
        ),
        Err(e) => report_errors(
            "controller.toml uses TOML the firmware cannot read",
            &[
                format!("{:?}", e),
                String::from("Use one key = value per line; no inline tables or arrays"),
            ],
        ),
    }

    println!("cargo:warning=controller.toml validated successfully");
}

/// One-line summary of the store section
fn describe_values(config: &ControllerConfig) -> String {
    format!(
        "setpoint={} min={} max={} rate={}ms",
        config.store.setpoint_c,
        config.store.min_temp_c,
        config.store.max_temp_c,
        config.store.sampling_rate_ms
    )
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report_errors(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<58} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
