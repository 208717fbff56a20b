//! Command decoder / dispatcher
//!
//! Turns one complete candidate frame into the ordered responses owed to
//! the peer, applying the command to the [`ControlStore`] on the way.
//!
//! Validation order is fixed: envelope, then command recognition, then
//! checksum, then the command's own length/range rules. The store is only
//! touched once all of these pass.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use heapless::Vec;
use thermoctl_protocol::messages::{TOGGLE_OFF, TOGGLE_ON};
use thermoctl_protocol::{
    checksum, checksum_matches, checksum_with, AckCode, Command, Envelope, Response,
};

use crate::store::ControlStore;

/// Largest value accepted by the set-sampling-rate command (ms)
pub const MAX_WIRE_SAMPLING_RATE_MS: u32 = 9999;
/// Smallest value accepted by the set-sampling-rate command (ms)
pub const MIN_WIRE_SAMPLING_RATE_MS: u32 = 10;

/// Ordered responses produced for one frame
pub type Responses = Vec<Response, 2>;

/// Mutation applied to the store by an accepted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateChange {
    /// New upper temperature bound
    MaxTemp(i16),
    /// New lower temperature bound
    MinTemp(i16),
    /// New sampler period (ms)
    SamplingRate(u32),
    /// New master enable
    SystemOn(bool),
    /// Auxiliary parameter block accepted (payload length)
    AuxParameters(usize),
}

/// Result of dispatching one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Recognized command, `None` for unframed or unknown input
    pub command: Option<Command>,
    /// Responses to send, in order
    pub responses: Responses,
    /// State mutation that was applied, if any
    pub change: Option<StateChange>,
}

impl Dispatch {
    fn reply(command: Option<Command>, response: Response) -> Self {
        let mut responses = Responses::new();
        let _ = responses.push(response);
        Self {
            command,
            responses,
            change: None,
        }
    }

    fn ack(command: Option<Command>, code: AckCode) -> Self {
        Self::reply(command, Response::Ack(code))
    }

    fn applied(command: Command, change: StateChange) -> Self {
        Self {
            change: Some(change),
            ..Self::ack(Some(command), AckCode::Ok)
        }
    }

    /// First non-ok acknowledgment, if the frame was rejected
    pub fn rejection(&self) -> Option<AckCode> {
        self.responses.iter().find_map(|r| match r {
            Response::Ack(code) if *code != AckCode::Ok => Some(*code),
            _ => None,
        })
    }
}

/// Stateless dispatcher bound to a store
pub struct Dispatcher<'a, M: RawMutex = CriticalSectionRawMutex> {
    store: &'a ControlStore<M>,
}

impl<'a, M: RawMutex> Dispatcher<'a, M> {
    pub fn new(store: &'a ControlStore<M>) -> Self {
        Self { store }
    }

    /// Decode and execute one frame (markers included)
    pub fn dispatch(&self, frame: &[u8]) -> Dispatch {
        let envelope = match Envelope::parse(frame) {
            Ok(envelope) => envelope,
            Err(_) => return Dispatch::ack(None, AckCode::FramingError),
        };

        let Some(command) = Command::from_byte(envelope.cmd) else {
            return self.unknown(&envelope);
        };

        if command == Command::QueryCurrentTemp {
            return self.query_current(&envelope);
        }

        let computed = checksum_with(envelope.cmd, envelope.data);
        if !checksum_matches(envelope.checksum, computed) {
            return Dispatch::ack(Some(command), AckCode::ChecksumError);
        }

        let data = envelope.data;
        match command {
            Command::SetMaxTemp => match parse_temp(data) {
                Some(value) if self.store.try_set_max_temp(value) => {
                    Dispatch::applied(command, StateChange::MaxTemp(value))
                }
                _ => Dispatch::ack(Some(command), AckCode::Invalid),
            },
            Command::SetMinTemp => match parse_temp(data) {
                Some(value) if self.store.try_set_min_temp(value) => {
                    Dispatch::applied(command, StateChange::MinTemp(value))
                }
                _ => Dispatch::ack(Some(command), AckCode::Invalid),
            },
            Command::SetSamplingRate => match parse_rate(data) {
                Some(rate) => {
                    self.store.set_sampling_rate_ms(rate);
                    Dispatch::applied(command, StateChange::SamplingRate(rate))
                }
                None => Dispatch::ack(Some(command), AckCode::Invalid),
            },
            Command::QuerySamplingRate if data.is_empty() => Dispatch::reply(
                Some(command),
                Response::SamplingRate(self.store.get_sampling_rate_ms()),
            ),
            Command::Toggle => {
                let on = match data {
                    [TOGGLE_ON] => true,
                    [TOGGLE_OFF] => false,
                    _ => return Dispatch::ack(Some(command), AckCode::Invalid),
                };
                self.store.set_system_on(on);
                Dispatch::applied(command, StateChange::SystemOn(on))
            }
            Command::SetAuxParameters if !data.is_empty() => {
                Dispatch::applied(command, StateChange::AuxParameters(data.len()))
            }
            _ => Dispatch::ack(Some(command), AckCode::Invalid),
        }
    }

    /// Unrecognized command: checksum covers the command byte alone
    fn unknown(&self, envelope: &Envelope<'_>) -> Dispatch {
        let mut responses = Responses::new();
        if !checksum_matches(envelope.checksum, checksum(&[envelope.cmd])) {
            let _ = responses.push(Response::Ack(AckCode::ChecksumError));
        }
        let _ = responses.push(Response::Ack(AckCode::Invalid));
        Dispatch {
            command: None,
            responses,
            change: None,
        }
    }

    /// Query-current accepts two checksum forms on an empty payload:
    /// over `C` alone, or over `C` plus the digits of the reading it asks
    /// for.
    fn query_current(&self, envelope: &Envelope<'_>) -> Dispatch {
        let command = Some(Command::QueryCurrentTemp);
        let current = self.store.get_current_temp();
        let reply = Response::CurrentTemp(current);

        let plain = checksum_with(envelope.cmd, envelope.data);
        let verified = checksum_matches(envelope.checksum, plain)
            || (envelope.data.is_empty()
                && checksum_matches(
                    envelope.checksum,
                    checksum_with(envelope.cmd, &reply.payload()),
                ));

        if !verified {
            Dispatch::ack(command, AckCode::ChecksumError)
        } else if !envelope.data.is_empty() {
            Dispatch::ack(command, AckCode::Invalid)
        } else {
            Dispatch::reply(command, reply)
        }
    }
}

/// Parse an all-digit ASCII field
fn parse_digits(data: &[u8]) -> Option<u32> {
    if data.is_empty() || !data.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(data.iter().fold(0, |acc, &d| acc * 10 + u32::from(d - b'0')))
}

/// Three-digit temperature field
fn parse_temp(data: &[u8]) -> Option<i16> {
    if data.len() != 3 {
        return None;
    }
    parse_digits(data).and_then(|v| i16::try_from(v).ok())
}

/// Four-digit sampling period field, range-checked
fn parse_rate(data: &[u8]) -> Option<u32> {
    if data.len() != 4 {
        return None;
    }
    parse_digits(data)
        .filter(|rate| (MIN_WIRE_SAMPLING_RATE_MS..=MAX_WIRE_SAMPLING_RATE_MS).contains(rate))
}
