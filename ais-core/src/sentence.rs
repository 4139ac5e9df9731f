//! Tokenize raw NMEA lines into AIS sentence fields.
//!
//! A sentence looks like
//! `!AIVDM,<total>,<fragment>,<sequence id>,<channel>,<payload>,<fill>*hh`.
//! Fields are borrowed from the input line; nothing is copied until the
//! router decides to keep a payload.

use crate::types::Issue;

/// Talker + sentence prefixes accepted as AIS traffic.
///
/// `AIVDM`/`AIVDO` from ordinary transponders plus the base station,
/// AtoN, SAR and repeater variants.
pub const AIS_TALKERS: &[&str] = &[
    "ABVD", "ADVD", "AIVD", "ANVD", "ARVD", "ASVD", "ATVD", "AXVD", "BSVD", "SAVD",
];

/// Borrowed view of one checksum-valid AIS sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// First field without the leading `!`, e.g. `AIVDM`.
    pub tag: &'a str,
    /// Declared number of fragments, kept as text.
    pub total: &'a str,
    /// This fragment's number, kept as text.
    pub fragment: &'a str,
    pub sequence_id: &'a str,
    pub channel: &'a str,
    pub payload: &'a str,
    /// Fill bits in the last payload character.
    pub padding: u8,
}

impl<'a> Sentence<'a> {
    /// Split a line into fields.
    ///
    /// Rejects unknown talkers with [`Issue::NotAis`], and lines with fewer
    /// than seven fields or an empty payload with [`Issue::Malformed`].
    /// The checksum is not looked at here.
    pub fn parse(line: &'a str) -> Result<Self, Issue> {
        let mut fields = line.split(',');
        let first = fields.next().unwrap_or_default();
        if !is_ais_talker(first) {
            return Err(Issue::NotAis);
        }

        let rest: Vec<&str> = fields.take(6).collect();
        let [total, fragment, sequence_id, channel, payload, fill] = rest[..] else {
            return Err(Issue::Malformed);
        };
        if payload.is_empty() {
            return Err(Issue::Malformed);
        }

        Ok(Sentence {
            tag: &first[1..],
            total,
            fragment,
            sequence_id,
            channel,
            payload,
            padding: parse_padding(fill),
        })
    }

    /// True if the sentence carries a whole message on its own.
    pub fn is_single(&self) -> bool {
        self.total == "1"
    }

    pub fn fragment_number(&self) -> Option<usize> {
        self.fragment.parse().ok()
    }

    pub fn total_fragments(&self) -> Option<usize> {
        self.total.parse().ok()
    }
}

/// Check the four characters after the leading `!` against [`AIS_TALKERS`].
pub fn is_ais_talker(first_field: &str) -> bool {
    first_field
        .get(1..5)
        .map(|prefix| AIS_TALKERS.contains(&prefix))
        .unwrap_or(false)
}

/// Fill bits are the first digit of the last field (`0*6F` → 0).
fn parse_padding(field: &str) -> u8 {
    field
        .bytes()
        .next()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
