//! Serial command handling
//!
//! [`Dispatcher`] decodes and executes complete frames against the store;
//! [`ProtocolEngine`] adds the frame assembler and output queue in front
//! of it for a byte-oriented transport.

mod dispatcher;
mod engine;

pub use dispatcher::{
    Dispatch, Dispatcher, Responses, StateChange, MAX_WIRE_SAMPLING_RATE_MS,
    MIN_WIRE_SAMPLING_RATE_MS,
};
pub use engine::{
    EngineEvent, OutputBuffer, ProtocolEngine, MAX_OUTPUT_PER_BYTE, OUTPUT_CAPACITY,
};
