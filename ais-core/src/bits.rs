//! 6-bit payload armoring and bit-field extraction.
//!
//! AIS payloads pack six data bits into each printable ASCII character.
//! Field positions are zero-indexed bit offsets into the de-armored stream,
//! most significant bit first, with inclusive `first..=last` ranges.

/// Map one armored payload character to its 6-bit value.
///
/// Subtracts 48, then 8 more if the result exceeds 40. Characters outside
/// the armor alphabet wrap instead of panicking; see [`is_armored`].
pub fn dearmor(c: u8) -> u8 {
    let mut v = c.wrapping_sub(48);
    if v > 40 {
        v = v.wrapping_sub(8);
    }
    v & 0x3F
}

/// True for characters in the AIS armor alphabet (`0`-`W` and `` ` ``-`w`).
pub fn is_armored(c: u8) -> bool {
    matches!(c, b'0'..=b'W' | b'`'..=b'w')
}

/// Message type, encoded in the first payload character. 0 for an empty payload.
pub fn message_type(payload: &str) -> u8 {
    payload.as_bytes().first().map(|&c| dearmor(c)).unwrap_or(0)
}

/// Number of data bits carried by a payload, ignoring fill bits.
pub fn bit_len(payload: &[u8]) -> usize {
    payload.len() * 6
}

/// Extract bits `first..=last` as an unsigned integer.
///
/// Returns 0 when the payload does not reach `last`. Fields are at most
/// 30 bits wide in the message types decoded here.
pub fn extract_uint(first: usize, last: usize, payload: &[u8]) -> u32 {
    if last < first || bit_len(payload) < last + 1 {
        return 0;
    }

    let mut value = 0u32;
    for bit in first..=last {
        let sixbit = dearmor(payload[bit / 6]);
        let b = (sixbit >> (5 - bit % 6)) & 1;
        value = (value << 1) | b as u32;
    }
    value
}

/// Extract a 6-bit ASCII text field spanning bits `first..=last`.
///
/// Text fields are fixed-width, but transmitters often cut messages short.
/// A truncated field yields as many whole characters as the payload still
/// holds, or an empty string if not even one is left. Trailing `@` padding
/// and spaces are removed.
pub fn extract_text(first: usize, last: usize, payload: &[u8]) -> String {
    if last < first {
        return String::new();
    }

    let nominal = (last - first + 1) / 6;
    let available = bit_len(payload).saturating_sub(first) / 6;
    let width = nominal.min(available);

    let mut text = String::with_capacity(width);
    for i in 0..width {
        let start = first + i * 6;
        let mut c = extract_uint(start, start + 5, payload) as u8;
        if c < 32 {
            c += 64;
        }
        text.push(c as char);
    }

    let trimmed = text.trim_end_matches(['@', ' ']).len();
    text.truncate(trimmed);
    text
}

/// Sign-extend the low `bits` bits of `value`.
pub fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dearmor_ranges() {
        assert_eq!(dearmor(b'0'), 0);
        assert_eq!(dearmor(b'W'), 39);
        assert_eq!(dearmor(b'`'), 40);
        assert_eq!(dearmor(b'w'), 63);
        assert_eq!(dearmor(b'5'), 5);
    }

    #[test]
    fn test_dearmor_never_panics() {
        for c in 0..=255u8 {
            assert!(dearmor(c) < 64);
        }
    }

    #[test]
    fn test_is_armored() {
        assert!(is_armored(b'0'));
        assert!(is_armored(b'W'));
        assert!(is_armored(b'`'));
        assert!(is_armored(b'w'));
        assert!(!is_armored(b'X'));
        assert!(!is_armored(b'_'));
        assert!(!is_armored(b'x'));
        assert!(!is_armored(b','));
        assert!(!is_armored(b'/'));
    }

    #[test]
    fn test_message_type() {
        assert_eq!(message_type("38u<a<?PAA2>P:WfuAO9PW<P0PuQ"), 3);
        assert_eq!(message_type("B3ujWF0000DdVU8O:1H03wi5oP06"), 18);
        assert_eq!(message_type("H42O55i18tMET00000000000000"), 24);
        assert_eq!(message_type(""), 0);
    }

    #[test]
    fn test_extract_uint_mmsi() {
        let p = b"38u<a<?PAA2>P:WfuAO9PW<P0PuQ";
        assert_eq!(extract_uint(0, 5, p), 3);
        assert_eq!(extract_uint(8, 37, p), 601041200);
        assert_eq!(extract_uint(38, 41, p), 15);
    }

    #[test]
    fn test_extract_uint_single_bit() {
        // '1' = 000001
        assert_eq!(extract_uint(5, 5, b"1"), 1);
        assert_eq!(extract_uint(4, 4, b"1"), 0);
    }

    #[test]
    fn test_extract_uint_out_of_range() {
        let p = b"38u<a<";
        assert_eq!(extract_uint(30, 36, p), 0);
        assert_eq!(extract_uint(30, 35, p), 12);
        assert_eq!(extract_uint(0, 5, b""), 0);
        assert_eq!(extract_uint(5, 4, p), 0);
    }

    #[test]
    fn test_extract_text_full() {
        let p = b"53uJur01rN?U<9@T001@tI@F000000000000000l0pA444mm?:1km1@SlQp000000000000";
        assert_eq!(extract_text(70, 111, p), "SBTI");
        assert_eq!(extract_text(112, 231, p), "TOFTE");
        assert_eq!(extract_text(302, 421, p), "GOTEBORG");
    }

    #[test]
    fn test_extract_text_truncated() {
        let p = b"53m`0o400000hKGCON18E<=DF0:1";
        assert_eq!(extract_text(70, 111, p), "LF5477");
        assert_eq!(extract_text(112, 231, p), "RESCUE B");
        // Field starts past the end of the payload
        assert_eq!(extract_text(302, 421, p), "");
    }

    #[test]
    fn test_extract_text_fewer_than_six_bits() {
        // 2 chars = 12 bits; a field at bit 7 has only 5 bits left
        assert_eq!(extract_text(7, 48, b"00"), "");
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0x0FFF_FFFF, 28), -1);
        assert_eq!(sign_extend(0x0800_0000, 28), -134217728);
        assert_eq!(sign_extend(0x07FF_FFFF, 28), 134217727);
        assert_eq!(sign_extend(0x80, 8), -128);
        assert_eq!(sign_extend(0x7F, 8), 127);
    }
}
