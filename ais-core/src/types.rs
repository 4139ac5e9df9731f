//! Shared types, error enum, and decoded message types for ais-core.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

/// All errors produced by ais-core.
#[derive(Debug, Error)]
pub enum AisError {
    #[error("empty payload")]
    EmptyPayload,
    #[error("invalid payload character: {0:?}")]
    InvalidPayload(char),
    #[error("unexpected message type: expected {expected}, got {actual}")]
    UnexpectedMessageType { expected: &'static str, actual: u8 },
    #[error("payload too short: need at least {min_bits} bits, got {actual_bits}")]
    PayloadTooShort { min_bits: usize, actual_bits: usize },
    #[error("reserved static data report part number: {0}")]
    ReservedPart(u8),
    #[error("invalid reference time: {0}")]
    InvalidTime(String),
    #[error("unsupported message type: {0}")]
    UnsupportedType(u8),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AisError>;

// ---------------------------------------------------------------------------
// Router input/output
// ---------------------------------------------------------------------------

/// Message type used by the router to mark the end of its input stream.
pub const END_OF_STREAM: u8 = 255;

/// A complete AIS message, possibly reassembled from several sentences.
///
/// Only carries what decoding needs: the type, the armored payload and the
/// number of fill bits in the last payload character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub msg_type: u8,
    pub payload: String,
    pub padding: u8,
}

impl Message {
    /// The sentinel sent once the router's input is exhausted.
    pub fn end_of_stream() -> Self {
        Message {
            msg_type: END_OF_STREAM,
            payload: String::new(),
            padding: 0,
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.msg_type == END_OF_STREAM && self.payload.is_empty()
    }
}

/// Why a sentence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Issue {
    EmptyLine,
    ChecksumFailed,
    NotAis,
    Malformed,
    InvalidFragmentNumber,
    IncompleteSpan,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Issue::EmptyLine => "Empty line",
            Issue::ChecksumFailed => "Checksum failed",
            Issue::NotAis => "Sentence isn't AIVDM/AIVDO",
            Issue::Malformed => "Malformed sentence",
            Issue::InvalidFragmentNumber => "Invalid fragment number",
            Issue::IncompleteSpan => "Incomplete/out of order span sentence",
        };
        f.write_str(text)
    }
}

/// A sentence the router could not turn into a message, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSentence {
    pub sentence: String,
    pub issue: Issue,
}

impl FailedSentence {
    pub fn new(sentence: impl Into<String>, issue: Issue) -> Self {
        FailedSentence {
            sentence: sentence.into(),
            issue,
        }
    }
}

// ---------------------------------------------------------------------------
// Enumeration tables
// ---------------------------------------------------------------------------

/// Navigation status codes (4 bits).
pub const NAVIGATION_STATUS: [&str; 16] = [
    "Under way using engine",
    "At anchor",
    "Not under command",
    "Restricted maneuverability",
    "Constrained by her draught",
    "Moored",
    "Aground",
    "Engaged in fishing",
    "Under way sailing",
    "status code reserved",
    "status code reserved",
    "status code reserved",
    "status code reserved",
    "status code reserved",
    "AIS-SART is active",
    "Not defined",
];

/// Electronic Position Fixing Device types (4 bits).
pub const EPFD_FIX_TYPES: [&str; 16] = [
    "Undefined",
    "GPS",
    "GLONASS",
    "Combined GPS/GLONASS",
    "Loran-C",
    "Chayka",
    "Integrated Navigation System",
    "Surveyed",
    "Galileo",
    "not defined",
    "not defined",
    "not defined",
    "not defined",
    "not defined",
    "not defined",
    "not defined",
];

/// Ship and cargo type codes 0-99. Codes 100-255 are reserved.
pub const SHIP_TYPES: [&str; 100] = [
    "Not available",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Reserved for future use",
    "Wing in ground (WIG)",
    "Wing in ground (WIG), Hazardous category A",
    "Wing in ground (WIG), Hazardous category B",
    "Wing in ground (WIG), Hazardous category C",
    "Wing in ground (WIG), Hazardous category D",
    "Wing in ground (WIG), Reserved for future use",
    "Wing in ground (WIG), Reserved for future use",
    "Wing in ground (WIG), Reserved for future use",
    "Wing in ground (WIG), Reserved for future use",
    "Wing in ground (WIG), Reserved for future use",
    "Fishing",
    "Towing",
    "Towing: length exceeds 200m or breadth exceeds 25m",
    "Dredging or underwater ops",
    "Diving ops",
    "Military ops",
    "Sailing",
    "Pleasure Craft",
    "Reserved",
    "Reserved",
    "High speed craft (HSC)",
    "High speed craft (HSC), Hazardous category A",
    "High speed craft (HSC), Hazardous category B",
    "High speed craft (HSC), Hazardous category C",
    "High speed craft (HSC), Hazardous category D",
    "High speed craft (HSC), Reserved for future use",
    "High speed craft (HSC), Reserved for future use",
    "High speed craft (HSC), Reserved for future use",
    "High speed craft (HSC), Reserved for future use",
    "High speed craft (HSC), No additional information",
    "Pilot Vessel",
    "Search and Rescue vessel",
    "Tug",
    "Port Tender",
    "Anti-pollution equipment",
    "Law Enforcement",
    "Spare - Local Vessel",
    "Spare - Local Vessel",
    "Medical Transport",
    "Noncombatant ship according to RR Resolution No. 18",
    "Passenger",
    "Passenger, Hazardous category A",
    "Passenger, Hazardous category B",
    "Passenger, Hazardous category C",
    "Passenger, Hazardous category D",
    "Passenger, Reserved for future use",
    "Passenger, Reserved for future use",
    "Passenger, Reserved for future use",
    "Passenger, Reserved for future use",
    "Passenger, No additional information",
    "Cargo",
    "Cargo, Hazardous category A",
    "Cargo, Hazardous category B",
    "Cargo, Hazardous category C",
    "Cargo, Hazardous category D",
    "Cargo, Reserved for future use",
    "Cargo, Reserved for future use",
    "Cargo, Reserved for future use",
    "Cargo, Reserved for future use",
    "Cargo, No additional information",
    "Tanker",
    "Tanker, Hazardous category A",
    "Tanker, Hazardous category B",
    "Tanker, Hazardous category C",
    "Tanker, Hazardous category D",
    "Tanker, Reserved for future use",
    "Tanker, Reserved for future use",
    "Tanker, Reserved for future use",
    "Tanker, Reserved for future use",
    "Tanker, No additional information",
    "Other Type",
    "Other Type, Hazardous category A",
    "Other Type, Hazardous category B",
    "Other Type, Hazardous category C",
    "Other Type, Hazardous category D",
    "Other Type, Reserved for future use",
    "Other Type, Reserved for future use",
    "Other Type, Reserved for future use",
    "Other Type, Reserved for future use",
    "Other Type, no additional information",
];

/// Look up a ship type name. Returns `None` for reserved codes (100-255).
pub fn ship_type_name(code: u8) -> Option<&'static str> {
    SHIP_TYPES.get(code as usize).copied()
}

/// Maneuver indicator (2 bits).
pub fn maneuver_name(code: u8) -> &'static str {
    match code {
        0 => "not available",
        1 => "no special maneuver",
        2 => "special maneuver",
        _ => "not defined",
    }
}

/// Known binary broadcast applications, keyed by (DAC, FID). Sorted.
const BINARY_BROADCAST_APPS: &[(u16, u8, &str)] = &[
    (1, 11, "Meteorological/Hydrological Data"),
    (1, 13, "Fairway closed"),
    (1, 15, "Extended ship and voyage"),
    (1, 17, "VTS-Generated/Synthetic targets"),
    (1, 19, "Marine traffic signals"),
    (1, 21, "Weather observation from ship"),
    (1, 22, "Area notice (broadcast)"),
    (1, 24, "Extended ship and voyage"),
    (1, 26, "Environmental"),
    (1, 27, "Route info broadcast"),
    (1, 29, "Text description broadcast"),
    (1, 31, "Meteorological and Hydrological"),
    (200, 10, "Ship static and voyage related data"),
    (200, 23, "EMMA warning report"),
    (200, 24, "Water levels"),
    (200, 40, "Signal status"),
    (316, 1, "Weather Station or Wind or Water Level"),
    (316, 2, "Lockage Order or Estimated Lock Times"),
    (316, 32, "Seaway Version Message"),
    (366, 1, "Weather Station or Wind or Water Level or PAWS Hydro / Current or PAWS Hydro / Salinity Temp or PAWS Vessel Procession Order"),
    (366, 2, "Lockage Order or Estimated Lock Times"),
    (366, 32, "Seaway Version Message"),
];

/// Name of a binary broadcast application. The table is not exhaustive.
pub fn binary_broadcast_name(dac: u16, fid: u8) -> Option<&'static str> {
    BINARY_BROADCAST_APPS
        .binary_search_by_key(&(dac, fid), |&(d, f, _)| (d, f))
        .ok()
        .map(|i| BINARY_BROADCAST_APPS[i].2)
}

// ---------------------------------------------------------------------------
// Decoded message types
// ---------------------------------------------------------------------------

/// Fields shared by Class A and Class B position reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionReport {
    pub msg_type: u8,
    pub repeat: u8,
    pub mmsi: u32,
    /// Knots; 1022 = ">102.2 knots", 1023 = not available.
    pub speed: f32,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    /// Degrees; 360 = not available.
    pub course: f32,
    /// Degrees; 511 = not available.
    pub heading: u16,
    pub second: u8,
    pub raim: bool,
    pub radio: u32,
}

/// Message types 1, 2 and 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassAPositionReport {
    #[serde(flatten)]
    pub position: PositionReport,
    pub status: u8,
    /// Degrees per minute, or one of the raw sentinels 127, -127, -128.
    pub turn: f32,
    pub maneuver: u8,
}

/// Message type 18.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassBPositionReport {
    #[serde(flatten)]
    pub position: PositionReport,
    pub cs_unit: bool,
    pub display: bool,
    pub dsc: bool,
    pub band: bool,
    pub msg22: bool,
    pub assigned: bool,
}

/// Message type 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseStationReport {
    pub repeat: u8,
    pub mmsi: u32,
    /// `None` when the station does not report time.
    pub time: Option<NaiveDateTime>,
    pub accuracy: bool,
    pub lon: f64,
    pub lat: f64,
    pub epfd: u8,
    pub raim: bool,
    pub radio: u32,
}

/// Distances in metres from the position reference point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub to_bow: u16,
    pub to_stern: u16,
    pub to_port: u8,
    pub to_starboard: u8,
}

/// Estimated time of arrival. AIS does not transmit a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Eta {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Eta {
    /// Month 0 or day 0 means no ETA was entered.
    pub fn is_available(&self) -> bool {
        self.month != 0 && self.day != 0
    }
}

/// Message type 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StaticVoyageData {
    pub repeat: u8,
    pub mmsi: u32,
    pub ais_version: u8,
    /// 0 for inland vessels.
    pub imo: u32,
    pub callsign: String,
    pub vessel_name: String,
    pub ship_type: u8,
    pub dimensions: Dimensions,
    pub epfd: u8,
    pub eta: Eta,
    /// Tenths of a metre.
    pub draught: u8,
    pub destination: String,
    pub dte: bool,
}

/// Where a type 24 part B report places the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CraftReference {
    Dimensions(Dimensions),
    /// Auxiliary craft report the MMSI of their mothership instead.
    Mothership(u32),
}

/// The two halves of a type 24 report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "part")]
pub enum StaticDataPart {
    A {
        vessel_name: String,
    },
    B {
        ship_type: u8,
        vendor_id: String,
        unit_model_code: u8,
        serial_number: u32,
        call_sign: String,
        reference: CraftReference,
    },
}

/// Message type 24.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticDataReport {
    pub repeat: u8,
    pub mmsi: u32,
    pub part: StaticDataPart,
}

/// Message type 8. Application data is left encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BinaryBroadcast {
    pub repeat: u8,
    pub mmsi: u32,
    pub dac: u16,
    pub fid: u8,
    /// The full armored payload; application data starts at bit 56.
    pub data: String,
}

/// Union type for all decoded messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum AisMessage {
    ClassAPosition(ClassAPositionReport),
    ClassBPosition(ClassBPositionReport),
    BaseStation(BaseStationReport),
    StaticVoyage(StaticVoyageData),
    StaticData(StaticDataReport),
    BinaryBroadcast(BinaryBroadcast),
}

impl AisMessage {
    /// Get the MMSI from any message type.
    pub fn mmsi(&self) -> u32 {
        match self {
            AisMessage::ClassAPosition(m) => m.position.mmsi,
            AisMessage::ClassBPosition(m) => m.position.mmsi,
            AisMessage::BaseStation(m) => m.mmsi,
            AisMessage::StaticVoyage(m) => m.mmsi,
            AisMessage::StaticData(m) => m.mmsi,
            AisMessage::BinaryBroadcast(m) => m.mmsi,
        }
    }

    /// AIS message type number.
    pub fn msg_type(&self) -> u8 {
        match self {
            AisMessage::ClassAPosition(m) => m.position.msg_type,
            AisMessage::ClassBPosition(_) => 18,
            AisMessage::BaseStation(_) => 4,
            AisMessage::StaticVoyage(_) => 5,
            AisMessage::StaticData(_) => 24,
            AisMessage::BinaryBroadcast(_) => 8,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_stream_sentinel() {
        let m = Message::end_of_stream();
        assert_eq!(m.msg_type, 255);
        assert!(m.is_end_of_stream());

        let real = Message {
            msg_type: 3,
            payload: "38u<a<?PAA2>P:WfuAO9PW<P0PuQ".into(),
            padding: 0,
        };
        assert!(!real.is_end_of_stream());
    }

    #[test]
    fn test_issue_text() {
        assert_eq!(Issue::EmptyLine.to_string(), "Empty line");
        assert_eq!(Issue::ChecksumFailed.to_string(), "Checksum failed");
        assert_eq!(Issue::NotAis.to_string(), "Sentence isn't AIVDM/AIVDO");
        assert_eq!(
            Issue::IncompleteSpan.to_string(),
            "Incomplete/out of order span sentence"
        );
    }

    #[test]
    fn test_ship_type_name() {
        assert_eq!(ship_type_name(0), Some("Not available"));
        assert_eq!(ship_type_name(52), Some("Tug"));
        assert_eq!(ship_type_name(99), Some("Other Type, no additional information"));
        assert_eq!(ship_type_name(100), None);
        assert_eq!(ship_type_name(255), None);
    }

    #[test]
    fn test_binary_broadcast_name() {
        assert_eq!(binary_broadcast_name(1, 31), Some("Meteorological and Hydrological"));
        assert_eq!(binary_broadcast_name(200, 10), Some("Ship static and voyage related data"));
        assert_eq!(binary_broadcast_name(366, 32), Some("Seaway Version Message"));
        assert_eq!(binary_broadcast_name(1, 12), None);
        assert_eq!(binary_broadcast_name(235, 10), None);
    }

    #[test]
    fn test_binary_broadcast_table_sorted() {
        for pair in BINARY_BROADCAST_APPS.windows(2) {
            assert!((pair[0].0, pair[0].1) < (pair[1].0, pair[1].1));
        }
    }

    #[test]
    fn test_eta_availability() {
        assert!(!Eta::default().is_available());
        let eta = Eta {
            month: 3,
            day: 11,
            hour: 21,
            minute: 15,
        };
        assert!(eta.is_available());
    }

    #[test]
    fn test_maneuver_name() {
        assert_eq!(maneuver_name(0), "not available");
        assert_eq!(maneuver_name(2), "special maneuver");
        assert_eq!(maneuver_name(3), "not defined");
    }
}
