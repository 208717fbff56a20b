//! Serial Command Protocol
//!
//! This crate defines the ASCII protocol spoken on the controller's console
//! UART. A peer reads and adjusts the controller's state with short
//! request/immediate-response exchanges.
//!
//! # Protocol Overview
//!
//! All messages use the same delimited frame:
//! ```text
//! ┌───────┬─────┬─────────────┬──────────┬─────┐
//! │ START │ CMD │ DATA        │ CHECKSUM │ END │
//! │ '#'   │ 1B  │ 0–58B ASCII │ 3 digits │ '!' │
//! └───────┴─────┴─────────────┴──────────┴─────┘
//! ```
//!
//! The checksum is the modulo-256 sum of CMD and DATA, written as three
//! zero-padded decimal digits. There is no retransmission: every frame is
//! answered immediately with a reply or an acknowledgment, and the peer
//! resends on error.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod assembler;
pub mod checksum;
pub mod encoder;
pub mod frame;
pub mod messages;

pub use assembler::{
    AssemblerState, FrameAssembler, FrameEvent, FramingError, LineEndingPolicy, RawFrame,
};
pub use checksum::{checksum, checksum_matches, checksum_with};
pub use encoder::{encode_frame, encode_into, EncodedFrame};
pub use frame::{
    Envelope, FrameError, FRAME_END, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
    MIN_FRAME_SIZE,
};
pub use messages::{AckCode, Command, Response};
