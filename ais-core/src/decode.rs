//! Decode AIS payloads into typed messages.
//!
//! Supported message types:
//! - 1, 2, 3: Class A position report
//! - 4:       Base station report (UTC reference time + position)
//! - 5:       Static and voyage related data
//! - 8:       Binary broadcast (header only, application data left encoded)
//! - 18:      Class B position report
//! - 24:      Static data report, part A or B
//!
//! Every decoder validates the payload before reading fields: it must be
//! non-empty, use only armor characters, carry the right type and be long
//! enough to hold the header. Fields past the end of a short payload decode
//! as zero or as shortened text.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::bits::{self, extract_text, extract_uint};
use crate::navigation::{coordinates, course, flag, heading, rate_of_turn, speed};
use crate::types::*;

/// Repeat indicator, MMSI and type: every message starts with these.
const HEADER_BITS: usize = 38;

// ---------------------------------------------------------------------------
// Payload validation
// ---------------------------------------------------------------------------

/// Validate a payload and return its bytes.
fn checked<'a>(
    payload: &'a str,
    accepted: &[u8],
    expected: &'static str,
    min_bits: usize,
) -> Result<&'a [u8]> {
    let data = payload.as_bytes();
    if data.is_empty() {
        return Err(AisError::EmptyPayload);
    }
    if let Some(&bad) = data.iter().find(|&&c| !bits::is_armored(c)) {
        return Err(AisError::InvalidPayload(bad as char));
    }

    let actual = bits::message_type(payload);
    if !accepted.contains(&actual) {
        return Err(AisError::UnexpectedMessageType { expected, actual });
    }

    let actual_bits = bits::bit_len(data);
    if actual_bits < min_bits {
        return Err(AisError::PayloadTooShort {
            min_bits,
            actual_bits,
        });
    }
    Ok(data)
}

fn repeat(data: &[u8]) -> u8 {
    extract_uint(6, 7, data) as u8
}

fn mmsi(data: &[u8]) -> u32 {
    extract_uint(8, 37, data)
}

// ---------------------------------------------------------------------------
// Position reports
// ---------------------------------------------------------------------------

/// Decode a Class A position report (types 1, 2 and 3).
pub fn decode_class_a_position_report(payload: &str) -> Result<ClassAPositionReport> {
    let data = checked(
        payload,
        &[1, 2, 3],
        "Class A position report (1, 2 or 3)",
        HEADER_BITS,
    )?;

    let (lon, lat) = coordinates(61, data);
    Ok(ClassAPositionReport {
        position: PositionReport {
            msg_type: bits::message_type(payload),
            repeat: repeat(data),
            mmsi: mmsi(data),
            speed: speed(50, data),
            accuracy: flag(60, data),
            lon,
            lat,
            course: course(116, data),
            heading: heading(128, data),
            second: extract_uint(137, 142, data) as u8,
            raim: flag(148, data),
            radio: extract_uint(149, 167, data),
        },
        status: extract_uint(38, 41, data) as u8,
        turn: rate_of_turn(42, data),
        maneuver: extract_uint(143, 144, data) as u8,
    })
}

/// Decode a Class B position report (type 18).
pub fn decode_class_b_position_report(payload: &str) -> Result<ClassBPositionReport> {
    let data = checked(payload, &[18], "Class B position report (18)", HEADER_BITS)?;

    let (lon, lat) = coordinates(57, data);
    Ok(ClassBPositionReport {
        position: PositionReport {
            msg_type: 18,
            repeat: repeat(data),
            mmsi: mmsi(data),
            speed: speed(46, data),
            accuracy: flag(56, data),
            lon,
            lat,
            course: course(112, data),
            heading: heading(124, data),
            second: extract_uint(133, 138, data) as u8,
            raim: flag(147, data),
            radio: extract_uint(148, 167, data),
        },
        cs_unit: flag(141, data),
        display: flag(142, data),
        dsc: flag(143, data),
        band: flag(144, data),
        msg22: flag(145, data),
        assigned: flag(146, data),
    })
}

// ---------------------------------------------------------------------------
// Base station
// ---------------------------------------------------------------------------

/// UTC time broadcast by a base station.
///
/// Returns `Ok(None)` when the station reports year 0 ("not available").
/// Any other out-of-range component is an [`AisError::InvalidTime`].
pub fn reference_time(payload: &str) -> Result<Option<NaiveDateTime>> {
    let data = checked(
        payload,
        &[4, 11],
        "base station report (4) or UTC response (11)",
        HEADER_BITS,
    )?;

    let year = extract_uint(38, 51, data);
    if year == 0 {
        return Ok(None);
    }
    let month = extract_uint(52, 55, data);
    let day = extract_uint(56, 60, data);
    let hour = extract_uint(61, 65, data);
    let minute = extract_uint(66, 71, data);
    let second = extract_uint(72, 77, data);

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(Some)
        .ok_or_else(|| {
            AisError::InvalidTime(format!(
                "{year}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))
        })
}

/// Decode a base station report (type 4).
///
/// A missing or invalid reference time is not an error; `time` is `None`.
pub fn decode_base_station_report(payload: &str) -> Result<BaseStationReport> {
    let data = checked(payload, &[4], "base station report (4)", HEADER_BITS)?;

    let time = match reference_time(payload) {
        Ok(time) => time,
        Err(e) => {
            debug!(error = %e, "base station sent unusable time");
            None
        }
    };

    let (lon, lat) = coordinates(79, data);
    Ok(BaseStationReport {
        repeat: repeat(data),
        mmsi: mmsi(data),
        time,
        accuracy: flag(78, data),
        lon,
        lat,
        epfd: extract_uint(134, 137, data) as u8,
        raim: flag(148, data),
        radio: extract_uint(149, 167, data),
    })
}

// ---------------------------------------------------------------------------
// Static data
// ---------------------------------------------------------------------------

/// Decode static and voyage related data (type 5).
pub fn decode_static_voyage_data(payload: &str) -> Result<StaticVoyageData> {
    let data = checked(payload, &[5], "static and voyage related data (5)", HEADER_BITS)?;

    Ok(StaticVoyageData {
        repeat: repeat(data),
        mmsi: mmsi(data),
        ais_version: extract_uint(38, 39, data) as u8,
        imo: extract_uint(40, 69, data),
        callsign: extract_text(70, 111, data),
        vessel_name: extract_text(112, 231, data),
        ship_type: extract_uint(232, 239, data) as u8,
        dimensions: Dimensions {
            to_bow: extract_uint(240, 248, data) as u16,
            to_stern: extract_uint(249, 257, data) as u16,
            to_port: extract_uint(258, 263, data) as u8,
            to_starboard: extract_uint(264, 269, data) as u8,
        },
        epfd: extract_uint(270, 273, data) as u8,
        eta: Eta {
            month: extract_uint(274, 277, data) as u8,
            day: extract_uint(278, 282, data) as u8,
            hour: extract_uint(283, 287, data) as u8,
            minute: extract_uint(288, 293, data) as u8,
        },
        draught: extract_uint(294, 301, data) as u8,
        destination: extract_text(302, 421, data),
        dte: flag(422, data),
    })
}

/// MMSIs at or above this belong to auxiliary craft.
const AUXILIARY_MMSI: u32 = 980_000_000;

/// Decode a static data report (type 24), part A or B.
pub fn decode_static_data_report(payload: &str) -> Result<StaticDataReport> {
    let data = checked(payload, &[24], "static data report (24)", 40)?;

    let mmsi = mmsi(data);
    let part = match extract_uint(38, 39, data) as u8 {
        0 => StaticDataPart::A {
            vessel_name: extract_text(40, 159, data),
        },
        1 => {
            let reference = if mmsi >= AUXILIARY_MMSI {
                CraftReference::Mothership(extract_uint(132, 161, data))
            } else {
                CraftReference::Dimensions(Dimensions {
                    to_bow: extract_uint(132, 140, data) as u16,
                    to_stern: extract_uint(141, 149, data) as u16,
                    to_port: extract_uint(150, 155, data) as u8,
                    to_starboard: extract_uint(156, 161, data) as u8,
                })
            };
            StaticDataPart::B {
                ship_type: extract_uint(40, 47, data) as u8,
                vendor_id: extract_text(48, 65, data),
                unit_model_code: extract_uint(66, 69, data) as u8,
                serial_number: extract_uint(70, 89, data),
                call_sign: extract_text(90, 131, data),
                reference,
            }
        }
        reserved => return Err(AisError::ReservedPart(reserved)),
    };

    Ok(StaticDataReport {
        repeat: repeat(data),
        mmsi,
        part,
    })
}

// ---------------------------------------------------------------------------
// Binary broadcast
// ---------------------------------------------------------------------------

/// Decode the addressing header of a binary broadcast (type 8).
pub fn decode_binary_broadcast(payload: &str) -> Result<BinaryBroadcast> {
    let data = checked(payload, &[8], "binary broadcast (8)", 56)?;

    Ok(BinaryBroadcast {
        repeat: repeat(data),
        mmsi: mmsi(data),
        dac: extract_uint(40, 49, data) as u16,
        fid: extract_uint(50, 55, data) as u8,
        data: payload.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Main decode router
// ---------------------------------------------------------------------------

/// Decode a routed message by its type.
pub fn decode(message: &Message) -> Result<AisMessage> {
    trace!(msg_type = message.msg_type, "decoding");
    let payload = message.payload.as_str();
    match message.msg_type {
        1..=3 => decode_class_a_position_report(payload).map(AisMessage::ClassAPosition),
        4 => decode_base_station_report(payload).map(AisMessage::BaseStation),
        5 => decode_static_voyage_data(payload).map(AisMessage::StaticVoyage),
        8 => decode_binary_broadcast(payload).map(AisMessage::BinaryBroadcast),
        18 => decode_class_b_position_report(payload).map(AisMessage::ClassBPosition),
        24 => decode_static_data_report(payload).map(AisMessage::StaticData),
        other => Err(AisError::UnsupportedType(other)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
