//! Navigation fields shared by several message types.
//!
//! Position, speed, course and rate of turn are packed the same way in
//! Class A, Class B and base station reports. The helpers here take the
//! bit offset where a block starts and return values in conventional
//! units: decimal degrees, knots, degrees per minute.

use std::fmt;

use crate::bits::{extract_uint, sign_extend};

/// Raw speed meaning "102.2 knots or faster".
pub const SPEED_FAST: f32 = 1022.0;
/// Raw speed meaning "not available".
pub const SPEED_NOT_AVAILABLE: f32 = 1023.0;
pub const COURSE_NOT_AVAILABLE: f32 = 360.0;
pub const HEADING_NOT_AVAILABLE: u16 = 511;

// ---------------------------------------------------------------------------
// Field decoders
// ---------------------------------------------------------------------------

/// Decode the 28-bit longitude and 27-bit latitude starting at `first`.
///
/// Both are signed, in 1/10000 minute. Returns `(lon, lat)` in decimal
/// degrees. 181 and 91 mean "not available".
pub fn coordinates(first: usize, payload: &[u8]) -> (f64, f64) {
    let lon = sign_extend(extract_uint(first, first + 27, payload), 28);
    let lat = sign_extend(extract_uint(first + 28, first + 54, payload), 27);
    minutes_to_degrees(lon as f64, lat as f64)
}

/// Convert (lon, lat) from 1/10000 minutes to decimal degrees.
pub fn minutes_to_degrees(min_lon: f64, min_lat: f64) -> (f64, f64) {
    (to_degrees(min_lon), to_degrees(min_lat))
}

fn to_degrees(value: f64) -> f64 {
    let sign = if value.is_sign_negative() { -1.0 } else { 1.0 };
    let value = value.abs();
    let degrees = (value / 600_000.0).trunc();
    let minutes = (value - 600_000.0 * degrees) / 10_000.0;
    sign * (degrees + minutes / 60.0)
}

/// Speed over ground in knots from the 10-bit field at `first`.
///
/// The sentinels 1022 and 1023 are passed through unscaled.
pub fn speed(first: usize, payload: &[u8]) -> f32 {
    let raw = extract_uint(first, first + 9, payload) as f32;
    if raw < SPEED_FAST {
        raw / 10.0
    } else {
        raw
    }
}

/// Course over ground in degrees from the 12-bit field at `first`.
pub fn course(first: usize, payload: &[u8]) -> f32 {
    extract_uint(first, first + 11, payload) as f32 / 10.0
}

/// True heading from the 9-bit field at `first`.
pub fn heading(first: usize, payload: &[u8]) -> u16 {
    extract_uint(first, first + 8, payload) as u16
}

/// Rate of turn from the signed 8-bit field at `first`.
///
/// Values within ±126 are converted to degrees per minute with
/// `(raw / 4.733)²`, keeping the sign. 0, ±127 and -128 are returned as is.
pub fn rate_of_turn(first: usize, payload: &[u8]) -> f32 {
    let raw = extract_uint(first, first + 7, payload) as u8 as i8;
    let turn = raw as f32;
    if raw != 0 && (-126..=126).contains(&raw) {
        let scaled = turn / 4.733;
        turn.signum() * scaled * scaled
    } else {
        turn
    }
}

/// Single-bit flag.
pub fn flag(bit: usize, payload: &[u8]) -> bool {
    extract_uint(bit, bit, payload) == 1
}

// ---------------------------------------------------------------------------
// Classification for display
// ---------------------------------------------------------------------------

/// Interpretation of a decoded rate of turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateOfTurn {
    NotTurning,
    /// More than 5° per 30 s, no turn indicator.
    RightFast,
    LeftFast,
    NoInformation,
    Right(f32),
    Left(f32),
}

impl RateOfTurn {
    pub fn classify(turn: f32) -> Self {
        match turn {
            t if t == 0.0 => RateOfTurn::NotTurning,
            t if t == 127.0 => RateOfTurn::RightFast,
            t if t == -127.0 => RateOfTurn::LeftFast,
            t if t == -128.0 => RateOfTurn::NoInformation,
            t if t > 0.0 => RateOfTurn::Right(t),
            t => RateOfTurn::Left(-t),
        }
    }
}

impl fmt::Display for RateOfTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateOfTurn::NotTurning => write!(f, "not turning"),
            RateOfTurn::RightFast => write!(f, "right at more than 5deg/30s"),
            RateOfTurn::LeftFast => write!(f, "left at more than 5deg/30s"),
            RateOfTurn::NoInformation => write!(f, "no turn information"),
            RateOfTurn::Right(deg) => write!(f, "right at {deg:.3}"),
            RateOfTurn::Left(deg) => write!(f, "left at {deg:.3}"),
        }
    }
}

/// Interpretation of a decoded speed over ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedOverGround {
    Knots(f32),
    AtLeast102,
    NotAvailable,
}

impl SpeedOverGround {
    pub fn classify(speed: f32) -> Self {
        if speed == SPEED_NOT_AVAILABLE {
            SpeedOverGround::NotAvailable
        } else if speed == SPEED_FAST {
            SpeedOverGround::AtLeast102
        } else {
            SpeedOverGround::Knots(speed)
        }
    }
}

impl fmt::Display for SpeedOverGround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedOverGround::Knots(knots) => write!(f, "{knots:.1} knots"),
            SpeedOverGround::AtLeast102 => write!(f, ">102.2 knots"),
            SpeedOverGround::NotAvailable => write!(f, "information not available"),
        }
    }
}

/// Render course over ground.
pub fn describe_course(course: f32) -> String {
    if course < COURSE_NOT_AVAILABLE {
        format!("{course:.1}°")
    } else if course == COURSE_NOT_AVAILABLE {
        "not available".to_string()
    } else {
        format!("invalid ({course:.1})")
    }
}

/// Render true heading.
pub fn describe_heading(heading: u16) -> String {
    match heading {
        0..=359 => format!("{heading}°"),
        HEADING_NOT_AVAILABLE => "not available".to_string(),
        other => format!("invalid ({other})"),
    }
}

/// Render decimal degrees as degrees and decimal minutes.
///
/// `-3.56725, 53.8425167` becomes `  3°34.0350'W  53°50.5510'N`. A longitude
/// beyond 180° or latitude beyond 90° is reported as not available.
pub fn format_coordinates(lon: f64, lat: f64) -> String {
    let lon_part = match split_degrees(lon) {
        (deg, _) if deg > 180.0 => "longitude not available,".to_string(),
        (deg, min) => format!("{deg:3.0}°{min:07.4}'{}", if lon.is_sign_negative() { 'W' } else { 'E' }),
    };
    let lat_part = match split_degrees(lat) {
        (deg, _) if deg > 90.0 => "latitude not available".to_string(),
        (deg, min) => format!("{deg:3.0}°{min:07.4}'{}", if lat.is_sign_negative() { 'S' } else { 'N' }),
    };
    format!("{lon_part} {lat_part}")
}

fn split_degrees(value: f64) -> (f64, f64) {
    let value = value.abs();
    let degrees = value.floor();
    (degrees, 60.0 * (value - degrees))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS_A: &[u8] = b"38u<a<?PAA2>P:WfuAO9PW<P0PuQ";
    const CLASS_A_2: &[u8] = b"13P:v?h009Ogbr4NkiITkU>L089D";

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_coordinates() {
        let (lon, lat) = coordinates(61, CLASS_A);
        assert!(close(lon, 31.130165));
        assert!(close(lat, -29.784113333333334));

        let (lon, lat) = coordinates(61, CLASS_A_2);
        assert!(close(lon, -3.56725));
        assert!(close(lat, 53.84251666666667));
    }

    #[test]
    fn test_minutes_to_degrees() {
        let (lon, lat) = minutes_to_degrees(-2140350.0, 32305510.0);
        assert!(close(lon, -3.56725));
        assert!(close(lat, 53.84251666666667));

        // Not available markers
        let (lon, lat) = minutes_to_degrees(108_600_000.0, 54_600_000.0);
        assert!(close(lon, 181.0));
        assert!(close(lat, 91.0));
    }

    #[test]
    fn test_speed() {
        assert_eq!(speed(50, CLASS_A), 8.1);
        assert_eq!(speed(50, CLASS_A_2), 0.9);
    }

    #[test]
    fn test_course_heading() {
        assert_eq!(course(116, CLASS_A), 243.4);
        assert_eq!(heading(128, CLASS_A), 230);
        assert_eq!(course(116, CLASS_A_2), 123.0);
        assert_eq!(heading(128, CLASS_A_2), 167);
    }

    #[test]
    fn test_rate_of_turn_sentinel() {
        assert_eq!(rate_of_turn(42, CLASS_A), -127.0);
    }

    #[test]
    fn test_rate_of_turn_scaled() {
        // 8 bits at 0: '2' = 000010, '0' = 000000 → 0b00001000 = 8
        let turn = rate_of_turn(0, b"20");
        let expected = (8.0f32 / 4.733) * (8.0f32 / 4.733);
        assert!((turn - expected).abs() < 1e-4);

        // 0b11111000 = -8
        let turn = rate_of_turn(0, b"v0");
        assert!((turn + expected).abs() < 1e-4);
    }

    #[test]
    fn test_flag() {
        assert!(flag(5, b"1"));
        assert!(!flag(0, b"1"));
        assert!(!flag(100, b"1"));
    }

    #[test]
    fn test_classify_turn() {
        assert_eq!(RateOfTurn::classify(0.0), RateOfTurn::NotTurning);
        assert_eq!(RateOfTurn::classify(127.0), RateOfTurn::RightFast);
        assert_eq!(RateOfTurn::classify(-127.0), RateOfTurn::LeftFast);
        assert_eq!(RateOfTurn::classify(-128.0), RateOfTurn::NoInformation);
        assert_eq!(RateOfTurn::classify(2.5), RateOfTurn::Right(2.5));
        assert_eq!(RateOfTurn::classify(-2.5), RateOfTurn::Left(2.5));
        assert_eq!(RateOfTurn::Left(2.5).to_string(), "left at 2.500");
    }

    #[test]
    fn test_classify_speed() {
        assert_eq!(SpeedOverGround::classify(8.1).to_string(), "8.1 knots");
        assert_eq!(SpeedOverGround::classify(1022.0), SpeedOverGround::AtLeast102);
        assert_eq!(
            SpeedOverGround::classify(1023.0).to_string(),
            "information not available"
        );
    }

    #[test]
    fn test_describe_course_heading() {
        assert_eq!(describe_course(243.4), "243.4°");
        assert_eq!(describe_course(360.0), "not available");
        assert_eq!(describe_heading(230), "230°");
        assert_eq!(describe_heading(511), "not available");
        assert_eq!(describe_heading(400), "invalid (400)");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(
            format_coordinates(-3.56725, 53.84251666666667),
            "  3°34.0350'W  53°50.5510'N"
        );
        assert_eq!(
            format_coordinates(181.0, 91.0),
            "longitude not available, latitude not available"
        );
    }
}
