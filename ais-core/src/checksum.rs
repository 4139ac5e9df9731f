//! NMEA-0183 checksum validation.
//!
//! The checksum is the XOR of every byte between the leading `!` (or `$`)
//! and the `*`, written as two hex digits after the `*`.

// ---------------------------------------------------------------------------
// Core checksum functions
// ---------------------------------------------------------------------------

/// XOR of all bytes of `body`.
pub fn compute(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, b| acc ^ b)
}

/// Validate the trailing checksum of a complete sentence.
///
/// Bytes `[1, len-3)` are checksummed and compared with the last two
/// characters parsed as hex. The `*` delimiter itself is not checked, so a
/// sentence that is shorter than 5 bytes or does not end in two hex digits
/// is simply invalid.
pub fn validate(sentence: &str) -> bool {
    let bytes = sentence.as_bytes();
    if bytes.len() < 5 {
        return false;
    }

    let tail = &bytes[bytes.len() - 2..];
    let expected = match (hex_value(tail[0]), hex_value(tail[1])) {
        (Some(hi), Some(lo)) => (hi << 4) | lo,
        _ => return false,
    };

    let actual = bytes[1..bytes.len() - 3]
        .iter()
        .fold(0u8, |acc, &b| acc ^ b);
    actual == expected
}

/// Wrap a sentence body (`AIVDM,...,0`) into `!<body>*hh`.
pub fn seal(body: &str) -> String {
    format!("!{}*{:02X}", body, compute(body))
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sentences() {
        assert!(validate("!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*6F"));
        assert!(validate(
            "!AIVDM,2,1,5,A,533iFNT00003W;3G;384iT<T400000000000001?88?73v0ik0RC1H11H30H,0*44"
        ));
        assert!(validate("!AIVDM,2,2,5,A,51CU0E2CkP0,2*0C"));
    }

    #[test]
    fn test_lowercase_hex_accepted() {
        assert!(validate("!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*6f"));
    }

    #[test]
    fn test_wrong_checksum() {
        assert!(!validate("!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*6E"));
        // Payload byte flipped
        assert!(!validate("!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuR,0*6F"));
    }

    #[test]
    fn test_short_and_garbage() {
        assert!(!validate(""));
        assert!(!validate("!*00"));
        assert!(!validate("!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*ZZ"));
        assert!(!validate("hello world"));
    }

    #[test]
    fn test_minimal_length() {
        // "!A*41": body "A" checksums to 0x41
        assert!(validate("!A*41"));
        assert!(!validate("!A*40"));
    }

    #[test]
    fn test_seal_round_trip() {
        let sentence = seal("AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0");
        assert_eq!(sentence, "!AIVDM,1,1,,B,38u<a<?PAA2>P:WfuAO9PW<P0PuQ,0*6F");
        assert!(validate(&sentence));
    }

    #[test]
    fn test_compute() {
        assert_eq!(compute(""), 0);
        assert_eq!(compute("A"), 0x41);
        assert_eq!(compute("AB"), 0x41 ^ 0x42);
    }
}
