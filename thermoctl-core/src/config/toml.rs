//! Minimal TOML reader for the controller configuration
//!
//! Handles only the subset `controller.toml` uses, without allocating:
//! - `[section]` headers
//! - `key = value` pairs with integer or string values
//! - Hexadecimal integers (`0x48`)
//! - Comments (`# ...`), whole-line or trailing
//!
//! The firmware's build script checks the same document with the full
//! `toml` crate, so anything outside this subset is caught at build time.

use thermoctl_protocol::LineEndingPolicy;

use super::types::{ConfigError, ControllerConfig, ParseError, ParseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Store,
    Protocol,
    Control,
    Buttons,
    Sensor,
}

/// Parse and validate a configuration document
pub fn parse_config(input: &str) -> Result<ControllerConfig, ConfigError> {
    let mut config = ControllerConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let at = |kind| ParseError {
            line: index + 1,
            kind,
        };

        if line.starts_with('[') {
            section = line
                .strip_suffix(']')
                .and_then(|h| parse_section_header(&h[1..]))
                .ok_or(at(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ParseErrorKind::MalformedLine))?;
        apply(&mut config, section, key, value).map_err(at)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "store" => Some(Section::Store),
        "protocol" => Some(Section::Protocol),
        "control" => Some(Section::Control),
        "buttons" => Some(Section::Buttons),
        "sensor" => Some(Section::Sensor),
        _ => None,
    }
}

fn apply(
    config: &mut ControllerConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Store, "setpoint_c") => config.store.setpoint_c = parse_int(value)?,
        (Section::Store, "min_temp_c") => config.store.min_temp_c = parse_int(value)?,
        (Section::Store, "max_temp_c") => config.store.max_temp_c = parse_int(value)?,
        (Section::Store, "sampling_rate_ms") => config.store.sampling_rate_ms = parse_int(value)?,
        (Section::Protocol, "line_endings") => {
            config.protocol.line_endings = parse_line_endings(value)?
        }
        (Section::Control, "hysteresis_c") => config.control.hysteresis_c = parse_int(value)?,
        (Section::Control, "control_interval_ms") => {
            config.control.control_interval_ms = parse_int(value)?
        }
        (Section::Control, "indicator_band_c") => {
            config.control.indicator_band_c = parse_int(value)?
        }
        (Section::Control, "indicator_interval_ms") => {
            config.control.indicator_interval_ms = parse_int(value)?
        }
        (Section::Buttons, "debounce_ms") => config.buttons.debounce_ms = parse_int(value)?,
        (Section::Sensor, "i2c_address") => config.sensor.i2c_address = parse_int(value)?,
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Split `key = value`
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a quoted string
fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}

/// Parse a decimal or `0x` hexadecimal integer, with optional `_` separators
fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseErrorKind> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let (radix, digits) = match digits.strip_prefix("0x") {
        Some(hex) if !negative => (16, hex),
        _ => (10, digits),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseErrorKind::InvalidValue);
    }

    let mut magnitude: i64 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(ParseErrorKind::InvalidValue)?;
        magnitude = magnitude
            .checked_mul(i64::from(radix))
            .and_then(|m| m.checked_add(i64::from(digit)))
            .ok_or(ParseErrorKind::InvalidValue)?;
    }
    let signed = if negative { -magnitude } else { magnitude };
    T::try_from(signed).map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_line_endings(value: &str) -> Result<LineEndingPolicy, ParseErrorKind> {
    match parse_string(value)? {
        "passthrough" => Ok(LineEndingPolicy::Passthrough),
        "ignore" => Ok(LineEndingPolicy::Ignore),
        "abort_frame" => Ok(LineEndingPolicy::AbortFrame),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}
