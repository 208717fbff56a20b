//! Command and response codes
//!
//! Message codes are divided into two categories:
//! - Peer → Controller: commands (`M`, `m`, `C`, `R`, `r`, `E`, `S`)
//! - Controller → Peer: acknowledgments (`E`) and query replies (`c`, `s`)

use heapless::Vec;

use crate::encoder::{encode_frame, EncodedFrame};
use crate::frame::FrameError;

// Command codes: Peer → Controller
pub const CMD_SET_MAX: u8 = b'M';
pub const CMD_SET_MIN: u8 = b'm';
pub const CMD_QUERY_CURRENT: u8 = b'C';
pub const CMD_SET_RATE: u8 = b'R';
pub const CMD_QUERY_RATE: u8 = b'r';
pub const CMD_TOGGLE: u8 = b'E';
pub const CMD_SET_AUX: u8 = b'S';

// Response codes: Controller → Peer
pub const RSP_ACK: u8 = b'E';
pub const RSP_CURRENT: u8 = b'c';
pub const RSP_RATE: u8 = b's';

/// Toggle payload selecting "system on"
pub const TOGGLE_ON: u8 = b'0';
/// Toggle payload selecting "system off"
pub const TOGGLE_OFF: u8 = b'1';

/// Largest value a 3-digit temperature reply can carry
pub const MAX_TEMP_DISPLAY: i16 = 999;
/// Largest value a 4-digit sampling-rate reply can carry
pub const MAX_RATE_DISPLAY: u32 = 9999;

/// Recognized command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set upper temperature bound (3 digits)
    SetMaxTemp,
    /// Set lower temperature bound (3 digits)
    SetMinTemp,
    /// Read the current temperature
    QueryCurrentTemp,
    /// Set the sampling period in ms (4 digits)
    SetSamplingRate,
    /// Read the sampling period
    QuerySamplingRate,
    /// Switch the system on or off (1 sentinel)
    Toggle,
    /// Controller parameter block (opaque)
    SetAuxParameters,
}

impl Command {
    /// Parse a command from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_SET_MAX => Some(Command::SetMaxTemp),
            CMD_SET_MIN => Some(Command::SetMinTemp),
            CMD_QUERY_CURRENT => Some(Command::QueryCurrentTemp),
            CMD_SET_RATE => Some(Command::SetSamplingRate),
            CMD_QUERY_RATE => Some(Command::QuerySamplingRate),
            CMD_TOGGLE => Some(Command::Toggle),
            CMD_SET_AUX => Some(Command::SetAuxParameters),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::SetMaxTemp => CMD_SET_MAX,
            Command::SetMinTemp => CMD_SET_MIN,
            Command::QueryCurrentTemp => CMD_QUERY_CURRENT,
            Command::SetSamplingRate => CMD_SET_RATE,
            Command::QuerySamplingRate => CMD_QUERY_RATE,
            Command::Toggle => CMD_TOGGLE,
            Command::SetAuxParameters => CMD_SET_AUX,
        }
    }
}

/// Acknowledgment status carried as a single payload character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckCode {
    /// Command accepted and applied
    Ok,
    /// Malformed envelope
    FramingError,
    /// Envelope intact, checksum mismatch
    ChecksumError,
    /// Semantically rejected
    Invalid,
}

impl AckCode {
    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            AckCode::Ok => b'o',
            AckCode::FramingError => b'f',
            AckCode::ChecksumError => b's',
            AckCode::Invalid => b'i',
        }
    }

    /// Parse a status from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'o' => Some(AckCode::Ok),
            b'f' => Some(AckCode::FramingError),
            b's' => Some(AckCode::ChecksumError),
            b'i' => Some(AckCode::Invalid),
            _ => None,
        }
    }
}

/// Outgoing message from the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Acknowledgment (`#E<status><CS>!`)
    Ack(AckCode),
    /// Current temperature reply, clamped to `0..=999` (`#cXXX<CS>!`)
    CurrentTemp(i16),
    /// Sampling period reply, clamped to `0..=9999` (`#sXXXX<CS>!`)
    SamplingRate(u32),
}

impl Response {
    /// Response code byte
    pub fn code(&self) -> u8 {
        match self {
            Response::Ack(_) => RSP_ACK,
            Response::CurrentTemp(_) => RSP_CURRENT,
            Response::SamplingRate(_) => RSP_RATE,
        }
    }

    /// ASCII payload for this response
    pub fn payload(&self) -> Vec<u8, 4> {
        let mut payload = Vec::new();
        match *self {
            Response::Ack(code) => {
                let _ = payload.push(code.to_byte());
            }
            Response::CurrentTemp(temp) => {
                let value = temp.clamp(0, MAX_TEMP_DISPLAY) as u32;
                push_digits(&mut payload, value, 3);
            }
            Response::SamplingRate(rate_ms) => {
                let value = rate_ms.min(MAX_RATE_DISPLAY);
                push_digits(&mut payload, value, 4);
            }
        }
        payload
    }

    /// Encode this response into a complete wire frame
    pub fn encode(&self) -> Result<EncodedFrame, FrameError> {
        encode_frame(self.code(), &self.payload())
    }
}

/// Append `value` as exactly `width` zero-padded decimal digits
fn push_digits(out: &mut Vec<u8, 4>, value: u32, width: u32) {
    for place in (0..width).rev() {
        let digit = (value / 10u32.pow(place)) % 10;
        let _ = out.push(b'0' + digit as u8);
    }
}
