//! Frame checksum
//!
//! The checksum is the unsigned sum of the covered bytes modulo 256. On the
//! wire it is carried as exactly three ASCII decimal digits, zero-padded
//! (`000`..`255`).

/// Number of ASCII digits carrying the checksum
pub const CHECKSUM_DIGITS: usize = 3;

/// Compute the modulo-256 sum of `bytes`
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Compute the checksum of a command byte followed by its payload
pub fn checksum_with(cmd: u8, payload: &[u8]) -> u8 {
    cmd.wrapping_add(checksum(payload))
}

/// Render a checksum as three zero-padded ASCII digits
pub fn encode_checksum(cs: u8) -> [u8; CHECKSUM_DIGITS] {
    [
        b'0' + cs / 100,
        b'0' + (cs / 10) % 10,
        b'0' + cs % 10,
    ]
}

/// Parse three received checksum digits
///
/// Returns the numeric value (`0..=999`). Values above 255 are accepted here
/// and simply never match a computed checksum. Returns `None` if any byte is
/// not an ASCII digit.
pub fn parse_checksum(digits: &[u8; CHECKSUM_DIGITS]) -> Option<u16> {
    digits.iter().try_fold(0u16, |acc, &d| {
        d.is_ascii_digit().then(|| acc * 10 + u16::from(d - b'0'))
    })
}

/// Check a received checksum field against a computed checksum
pub fn checksum_matches(received: Option<u16>, computed: u8) -> bool {
    received == Some(u16::from(computed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_values() {
        assert_eq!(checksum(b"A"), 65);
        assert_eq!(checksum(b"ABC"), 198);
        assert_eq!(checksum(b"M025"), 228);
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_checksum_wraps() {
        // 'c' + "042" = 99 + 48 + 52 + 50 = 249
        assert_eq!(checksum(b"c042"), 249);
        // 'R' + "0005" = 82 + 48 * 3 + 53 = 279 -> 23
        assert_eq!(checksum(b"R0005"), 23);
        assert_eq!(checksum_with(b'R', b"0005"), 23);
    }

    #[test]
    fn test_encode_checksum_zero_padded() {
        assert_eq!(&encode_checksum(0), b"000");
        assert_eq!(&encode_checksum(7), b"007");
        assert_eq!(&encode_checksum(88), b"088");
        assert_eq!(&encode_checksum(255), b"255");
    }

    #[test]
    fn test_parse_checksum() {
        assert_eq!(parse_checksum(b"000"), Some(0));
        assert_eq!(parse_checksum(b"249"), Some(249));
        assert_eq!(parse_checksum(b"999"), Some(999));
        assert_eq!(parse_checksum(b"2a9"), None);
        assert_eq!(parse_checksum(b" 12"), None);
    }

    #[test]
    fn test_out_of_range_never_matches() {
        let received = parse_checksum(b"300");
        assert!(!checksum_matches(received, 44)); // 300 - 256
        assert!(!checksum_matches(None, 0));
        assert!(checksum_matches(Some(44), 44));
    }
}
