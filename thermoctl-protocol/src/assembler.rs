//! Frame assembler
//!
//! Reconstructs `#...!` frames from a byte stream fed one byte at a time.
//! The assembler has no timeout: an unterminated frame stays open until a
//! new start marker, an overflow, or an explicit [`FrameAssembler::reset`].

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::{FRAME_END, FRAME_START, MAX_FRAME_SIZE};

/// A complete, unvalidated candidate frame (markers included)
pub type RawFrame = Vec<u8, MAX_FRAME_SIZE>;

/// Why the assembler discarded input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// A start marker arrived while a frame was still open
    Abandoned,
    /// An end marker arrived with no frame open
    DanglingEnd,
    /// The buffer filled without an end marker
    Overflow,
    /// A line ending arrived mid-frame under [`LineEndingPolicy::AbortFrame`]
    LineBreak,
}

/// Output of a single [`FrameAssembler::feed`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// A frame closed with an end marker
    Complete(RawFrame),
    /// Input was discarded; the peer should be told
    Error(FramingError),
}

/// Handling of CR/LF bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineEndingPolicy {
    /// No special handling: ordinary bytes inside a frame, noise outside
    Passthrough,
    /// Discard CR/LF everywhere
    #[default]
    Ignore,
    /// Discard CR/LF while idle, abort an open frame with a framing error
    AbortFrame,
}

/// Assembler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblerState {
    /// No frame open
    Idle,
    /// A frame is open and accumulating
    Collecting,
}

/// Byte-at-a-time frame assembler
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    buffer: RawFrame,
    line_endings: LineEndingPolicy,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new(LineEndingPolicy::default())
    }
}

impl FrameAssembler {
    /// Create a new assembler
    pub const fn new(line_endings: LineEndingPolicy) -> Self {
        Self {
            buffer: Vec::new(),
            line_endings,
        }
    }

    /// Current state
    pub fn state(&self) -> AssemblerState {
        if self.buffer.is_empty() {
            AssemblerState::Idle
        } else {
            AssemblerState::Collecting
        }
    }

    /// Number of bytes held for the open frame (0 when idle)
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    /// Active line-ending policy
    pub fn line_endings(&self) -> LineEndingPolicy {
        self.line_endings
    }

    /// Drop any open frame and return to idle
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed a single byte to the assembler
    ///
    /// Returns `Some(FrameEvent::Complete)` when an end marker closes a frame,
    /// `Some(FrameEvent::Error)` when input is discarded, and `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<FrameEvent> {
        if byte == b'\r' || byte == b'\n' {
            match self.line_endings {
                LineEndingPolicy::Passthrough => {}
                LineEndingPolicy::Ignore => return None,
                LineEndingPolicy::AbortFrame => {
                    if self.state() == AssemblerState::Idle {
                        return None;
                    }
                    self.reset();
                    return Some(FrameEvent::Error(FramingError::LineBreak));
                }
            }
        }

        match (self.state(), byte) {
            (AssemblerState::Idle, FRAME_START) => {
                self.open();
                None
            }
            (AssemblerState::Collecting, FRAME_START) => {
                self.open();
                Some(FrameEvent::Error(FramingError::Abandoned))
            }
            (AssemblerState::Idle, FRAME_END) => Some(FrameEvent::Error(FramingError::DanglingEnd)),
            (AssemblerState::Collecting, FRAME_END) => {
                // An open frame holds at most MAX_FRAME_SIZE - 1 bytes
                let _ = self.buffer.push(byte);
                let frame = core::mem::take(&mut self.buffer);
                Some(FrameEvent::Complete(frame))
            }
            (AssemblerState::Idle, _) => None,
            (AssemblerState::Collecting, _) => {
                let _ = self.buffer.push(byte);
                if self.buffer.is_full() {
                    self.reset();
                    Some(FrameEvent::Error(FramingError::Overflow))
                } else {
                    None
                }
            }
        }
    }

    fn open(&mut self) {
        self.buffer.clear();
        let _ = self.buffer.push(FRAME_START);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed_all(asm: &mut FrameAssembler, bytes: &[u8]) -> std::vec::Vec<FrameEvent> {
        bytes.iter().filter_map(|&b| asm.feed(b)).collect()
    }

    #[test]
    fn test_complete_frame() {
        let mut asm = FrameAssembler::default();
        let events = feed_all(&mut asm, b"#C217!");

        assert_eq!(events.len(), 1);
        match &events[0] {
            FrameEvent::Complete(frame) => assert_eq!(&frame[..], b"#C217!"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(asm.state(), AssemblerState::Idle);
    }

    #[test]
    fn test_noise_outside_frame_ignored() {
        let mut asm = FrameAssembler::default();
        let events = feed_all(&mut asm, b"xyz 123#r114!abc");

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], FrameEvent::Complete(f) if &f[..] == b"#r114!"));
        assert_eq!(asm.cursor(), 0);
    }

    #[test]
    fn test_dangling_end() {
        let mut asm = FrameAssembler::default();
        assert_eq!(
            asm.feed(b'!'),
            Some(FrameEvent::Error(FramingError::DanglingEnd))
        );
        assert_eq!(asm.state(), AssemblerState::Idle);
    }

    #[test]
    fn test_abandoned_frame_restarts() {
        let mut asm = FrameAssembler::default();
        let events = feed_all(&mut asm, b"#M05#r114!");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], FrameEvent::Error(FramingError::Abandoned));
        assert!(matches!(&events[1], FrameEvent::Complete(f) if &f[..] == b"#r114!"));
    }

    #[test]
    fn test_overflow_aborts_without_dispatch() {
        let mut asm = FrameAssembler::default();
        asm.feed(b'#');
        let mut events = std::vec::Vec::new();
        for _ in 0..(MAX_FRAME_SIZE - 1) {
            if let Some(ev) = asm.feed(b'0') {
                events.push(ev);
            }
        }

        assert_eq!(events, [FrameEvent::Error(FramingError::Overflow)]);
        assert_eq!(asm.state(), AssemblerState::Idle);
        // The terminator of the overflowed frame is now dangling
        assert_eq!(
            asm.feed(b'!'),
            Some(FrameEvent::Error(FramingError::DanglingEnd))
        );
    }

    #[test]
    fn test_max_size_frame_completes() {
        let mut asm = FrameAssembler::default();
        asm.feed(b'#');
        for _ in 0..(MAX_FRAME_SIZE - 2) {
            assert_eq!(asm.feed(b'0'), None);
        }
        match asm.feed(b'!') {
            Some(FrameEvent::Complete(frame)) => assert_eq!(frame.len(), MAX_FRAME_SIZE),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_line_endings_ignored() {
        let mut asm = FrameAssembler::new(LineEndingPolicy::Ignore);
        let events = feed_all(&mut asm, b"\r\n#r1\r\n14!\r\n");

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], FrameEvent::Complete(f) if &f[..] == b"#r114!"));
    }

    #[test]
    fn test_line_endings_abort_open_frame() {
        let mut asm = FrameAssembler::new(LineEndingPolicy::AbortFrame);
        assert_eq!(asm.feed(b'\n'), None);
        asm.feed(b'#');
        asm.feed(b'r');
        assert_eq!(
            asm.feed(b'\r'),
            Some(FrameEvent::Error(FramingError::LineBreak))
        );
        assert_eq!(asm.state(), AssemblerState::Idle);
    }

    #[test]
    fn test_line_endings_passthrough() {
        let mut asm = FrameAssembler::new(LineEndingPolicy::Passthrough);
        let events = feed_all(&mut asm, b"\n#S\n000!");

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], FrameEvent::Complete(f) if &f[..] == b"#S\n000!"));
    }

    #[test]
    fn test_reset_drops_open_frame() {
        let mut asm = FrameAssembler::default();
        asm.feed(b'#');
        asm.feed(b'C');
        assert_eq!(asm.state(), AssemblerState::Collecting);

        asm.reset();
        assert_eq!(asm.state(), AssemblerState::Idle);
        assert_eq!(asm.feed(b'!'), Some(FrameEvent::Error(FramingError::DanglingEnd)));
    }

    proptest! {
        #[test]
        fn arbitrary_bytes_never_exceed_buffer(
            bytes in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let mut asm = FrameAssembler::new(LineEndingPolicy::AbortFrame);
            for b in bytes {
                if let Some(FrameEvent::Complete(frame)) = asm.feed(b) {
                    prop_assert_eq!(frame[0], FRAME_START);
                    prop_assert_eq!(frame[frame.len() - 1], FRAME_END);
                    prop_assert!(frame.len() <= MAX_FRAME_SIZE);
                }
                prop_assert!(asm.cursor() < MAX_FRAME_SIZE);
            }
        }
    }
}
