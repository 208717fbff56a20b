//! Protocol engine
//!
//! Byte-in, bytes-out boundary between the serial transport and the
//! dispatcher. The transport calls [`ProtocolEngine::feed_byte`] for every
//! received byte and writes out whatever [`ProtocolEngine::drain_output`]
//! returns. How the bytes move (polling, interrupts, DMA) is up to the
//! caller.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use heapless::Vec;
use thermoctl_protocol::{
    AckCode, FrameAssembler, FrameEvent, FramingError, LineEndingPolicy, Response,
};

use super::dispatcher::{Dispatch, Dispatcher};
use crate::store::ControlStore;

/// Most output one fed byte can queue: a frame answered with two acks
pub const MAX_OUTPUT_PER_BYTE: usize = 14;

/// Output queue capacity in bytes
///
/// A transport that drains after every read of at most
/// `OUTPUT_CAPACITY / MAX_OUTPUT_PER_BYTE` bytes never drops a response.
pub const OUTPUT_CAPACITY: usize = 1024;

/// Encoded responses waiting for the transport
pub type OutputBuffer = Vec<u8, OUTPUT_CAPACITY>;

/// What happened on a [`ProtocolEngine::feed_byte`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A complete frame was dispatched
    Dispatched(Dispatch),
    /// Input was discarded by the assembler and a framing-error ack queued
    Framing(FramingError),
}

/// Frame assembler, dispatcher and output queue for one serial link
pub struct ProtocolEngine<'a, M: RawMutex = CriticalSectionRawMutex> {
    assembler: FrameAssembler,
    dispatcher: Dispatcher<'a, M>,
    output: OutputBuffer,
    dropped: u32,
}

impl<'a, M: RawMutex> ProtocolEngine<'a, M> {
    pub fn new(store: &'a ControlStore<M>, line_endings: LineEndingPolicy) -> Self {
        Self {
            assembler: FrameAssembler::new(line_endings),
            dispatcher: Dispatcher::new(store),
            output: Vec::new(),
            dropped: 0,
        }
    }

    /// Process one received byte
    ///
    /// Responses are queued for [`drain_output`](Self::drain_output). The
    /// returned event is informational.
    pub fn feed_byte(&mut self, byte: u8) -> Option<EngineEvent> {
        match self.assembler.feed(byte)? {
            FrameEvent::Complete(frame) => {
                let dispatch = self.dispatcher.dispatch(&frame);
                for response in dispatch.responses.iter() {
                    self.enqueue(response);
                }
                Some(EngineEvent::Dispatched(dispatch))
            }
            FrameEvent::Error(cause) => {
                self.enqueue(&Response::Ack(AckCode::FramingError));
                Some(EngineEvent::Framing(cause))
            }
        }
    }

    /// Take every queued output byte
    pub fn drain_output(&mut self) -> OutputBuffer {
        core::mem::take(&mut self.output)
    }

    /// Number of queued output bytes
    pub fn pending(&self) -> usize {
        self.output.len()
    }

    /// Responses dropped because the output queue was full
    pub fn dropped_responses(&self) -> u32 {
        self.dropped
    }

    /// Abandon any partially received frame
    pub fn reset(&mut self) {
        self.assembler.reset();
    }

    fn enqueue(&mut self, response: &Response) {
        let queued = match response.encode() {
            Ok(frame) => self.output.extend_from_slice(&frame).is_ok(),
            Err(_) => false,
        };
        if !queued {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}
