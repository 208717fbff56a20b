//! Response encoder
//!
//! Renders a (code, payload) pair into `#<CODE><PAYLOAD><CS>!`, with the
//! checksum computed over the code and payload.

use heapless::Vec;

use crate::checksum::{checksum_with, encode_checksum};
use crate::frame::{FrameError, FRAME_END, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};

/// A complete encoded frame
pub type EncodedFrame = Vec<u8, MAX_FRAME_SIZE>;

/// Encode a frame into a byte buffer
///
/// Returns the number of bytes written.
pub fn encode_into(code: u8, payload: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }

    let data_end = 2 + payload.len();
    let frame_len = data_end + 4; // CS + END
    if buffer.len() < frame_len {
        return Err(FrameError::PayloadTooLarge);
    }

    buffer[0] = FRAME_START;
    buffer[1] = code;
    buffer[2..data_end].copy_from_slice(payload);
    buffer[data_end..data_end + 3].copy_from_slice(&encode_checksum(checksum_with(code, payload)));
    buffer[data_end + 3] = FRAME_END;

    Ok(frame_len)
}

/// Encode a frame into a heapless Vec
pub fn encode_frame(code: u8, payload: &[u8]) -> Result<EncodedFrame, FrameError> {
    let mut buffer = [0u8; MAX_FRAME_SIZE];
    let len = encode_into(code, payload, &mut buffer)?;
    let mut vec = Vec::new();
    vec.extend_from_slice(&buffer[..len])
        .map_err(|_| FrameError::PayloadTooLarge)?;
    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::checksum;
    use crate::frame::Envelope;
    use proptest::prelude::*;

    #[test]
    fn test_encode_empty_payload() {
        let frame = encode_frame(b'r', &[]).unwrap();
        assert_eq!(&frame[..], b"#r114!");
    }

    #[test]
    fn test_encode_query_reply() {
        let frame = encode_frame(b'c', b"042").unwrap();
        assert_eq!(&frame[..], b"#c042249!");
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let mut buffer = [0u8; 8];
        assert_eq!(
            encode_into(b'c', b"042", &mut buffer),
            Err(FrameError::PayloadTooLarge)
        );
        let mut buffer = [0u8; 9];
        assert_eq!(encode_into(b'c', b"042", &mut buffer), Ok(9));
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [b'0'; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(
            encode_frame(b'S', &large_payload),
            Err(FrameError::PayloadTooLarge)
        );
        let max_payload = [b'0'; MAX_PAYLOAD_SIZE];
        assert_eq!(encode_frame(b'S', &max_payload).unwrap().len(), MAX_FRAME_SIZE);
    }

    proptest! {
        #[test]
        fn encode_then_parse_recovers_fields(
            code in 0x20u8..0x7f,
            payload in proptest::collection::vec(0x20u8..0x7f, 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = encode_frame(code, &payload).unwrap();
            let env = Envelope::parse(&frame).unwrap();

            prop_assert_eq!(env.cmd, code);
            prop_assert_eq!(env.data, &payload[..]);

            let mut covered = payload.clone();
            covered.insert(0, code);
            prop_assert_eq!(env.checksum, Some(u16::from(checksum(&covered))));
        }
    }
}
