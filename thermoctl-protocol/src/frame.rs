//! Frame envelope for the serial command protocol.
//!
//! Frame format:
//! - START (1 byte): `#`
//! - CMD (1 byte): command or response code
//! - DATA (0-58 bytes): command-specific ASCII payload
//! - CS (3 bytes): ASCII decimal modulo-256 sum of CMD and DATA
//! - END (1 byte): `!`

use crate::checksum::{parse_checksum, CHECKSUM_DIGITS};

/// Frame start marker
pub const FRAME_START: u8 = b'#';

/// Frame end marker
pub const FRAME_END: u8 = b'!';

/// Maximum complete frame size, markers included
pub const MAX_FRAME_SIZE: usize = 64;

/// Smallest well-formed frame (START + CMD + CS + END)
pub const MIN_FRAME_SIZE: usize = 1 + 1 + CHECKSUM_DIGITS + 1;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - MIN_FRAME_SIZE;

/// Errors that can occur during envelope parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer than [`MIN_FRAME_SIZE`] bytes
    TooShort,
    /// First byte is not [`FRAME_START`]
    MissingStart,
    /// Last byte is not [`FRAME_END`]
    MissingEnd,
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
}

/// Borrowed view of a structurally valid frame
///
/// Only the envelope is checked here; the checksum is carried as received
/// so the dispatcher can decide what it must cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Command byte
    pub cmd: u8,
    /// Bytes between the command and the checksum field
    pub data: &'a [u8],
    /// Received checksum value, `None` if the field is not three digits
    pub checksum: Option<u16>,
}

impl<'a> Envelope<'a> {
    /// Split a complete candidate frame (markers included) into its fields
    pub fn parse(frame: &'a [u8]) -> Result<Self, FrameError> {
        if frame.len() < MIN_FRAME_SIZE {
            return Err(FrameError::TooShort);
        }
        if frame[0] != FRAME_START {
            return Err(FrameError::MissingStart);
        }
        let end = frame.len() - 1;
        if frame[end] != FRAME_END {
            return Err(FrameError::MissingEnd);
        }

        let cs_start = end - CHECKSUM_DIGITS;
        let mut digits = [0u8; CHECKSUM_DIGITS];
        digits.copy_from_slice(&frame[cs_start..end]);

        Ok(Self {
            cmd: frame[1],
            data: &frame[2..cs_start],
            checksum: parse_checksum(&digits),
        })
    }

    /// Payload length (`frame length - 6`)
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}
