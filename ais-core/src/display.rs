//! Human-readable rendering of decoded messages.
//!
//! Each record prints a `=== Title ===` line followed by aligned
//! ` Label        : value` lines, one per field, ending in a newline.

use std::fmt;

use crate::mmsi;
use crate::navigation::{
    describe_course, describe_heading, format_coordinates, RateOfTurn, SpeedOverGround,
};
use crate::types::*;

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, " {label:<13}: {value}")
}

fn mmsi_line(f: &mut fmt::Formatter<'_>, value: u32) -> fmt::Result {
    line(f, "MMSI", format_args!("{value:09} [{}]", mmsi::describe(value)))
}

fn accuracy(high: bool) -> &'static str {
    if high {
        "High accuracy (<10m)"
    } else {
        "Low accuracy (>10m)"
    }
}

fn raim(in_use: bool) -> &'static str {
    if in_use {
        "in use"
    } else {
        "not in use"
    }
}

fn epfd(code: u8) -> &'static str {
    EPFD_FIX_TYPES
        .get(code as usize)
        .copied()
        .unwrap_or("not defined")
}

fn ship_type(code: u8) -> &'static str {
    ship_type_name(code).unwrap_or("Reserved for future use")
}

/// Dimension field: 0 is "not available", the field maximum means "or more".
fn dimension(size: u16, max: u16) -> String {
    match size {
        0 => "Not available".to_string(),
        s if s == max => format!(">{max} meters"),
        s => format!("{s} meters"),
    }
}

fn write_dimensions(f: &mut fmt::Formatter<'_>, d: &Dimensions) -> fmt::Result {
    line(f, "Dim to Bow", dimension(d.to_bow, 511))?;
    line(f, "Dim to Stern", dimension(d.to_stern, 511))?;
    line(f, "Dim to Port", dimension(d.to_port as u16, 63))?;
    line(f, "Dim to StrBrd", dimension(d.to_starboard as u16, 63))
}

// ---------------------------------------------------------------------------
// Position reports
// ---------------------------------------------------------------------------

impl fmt::Display for ClassAPositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.position;
        writeln!(f, "=== Class A Position Report ({}) ===", p.msg_type)?;
        line(f, "Repeat", p.repeat)?;
        mmsi_line(f, p.mmsi)?;
        line(
            f,
            "Nav.Status",
            NAVIGATION_STATUS[(self.status & 0x0F) as usize],
        )?;
        line(f, "Turn (ROT)", RateOfTurn::classify(self.turn))?;
        line(f, "Speed (SOG)", SpeedOverGround::classify(p.speed))?;
        line(f, "Accuracy", accuracy(p.accuracy))?;
        line(f, "Coordinates", format_coordinates(p.lon, p.lat))?;
        line(f, "Course (COG)", describe_course(p.course))?;
        line(f, "Heading (HDG)", describe_heading(p.heading))?;
        line(f, "Maneuver", maneuver_name(self.maneuver))?;
        line(f, "RAIM", raim(p.raim))
    }
}

impl fmt::Display for ClassBPositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.position;
        writeln!(f, "=== Class B Position Report ===")?;
        line(f, "Repeat", p.repeat)?;
        mmsi_line(f, p.mmsi)?;
        line(f, "Speed (SOG)", SpeedOverGround::classify(p.speed))?;
        line(f, "Accuracy", accuracy(p.accuracy))?;
        line(f, "Coordinates", format_coordinates(p.lon, p.lat))?;
        line(f, "Course (COG)", describe_course(p.course))?;
        line(f, "Heading (HDG)", describe_heading(p.heading))?;
        line(f, "CS Unit", self.cs_unit)?;
        line(f, "Display", self.display)?;
        line(f, "DSC", self.dsc)?;
        line(f, "Band", self.band)?;
        line(f, "Message 22", self.msg22)?;
        line(f, "Assigned", self.assigned)?;
        line(f, "RAIM", raim(p.raim))
    }
}

// ---------------------------------------------------------------------------
// Base station
// ---------------------------------------------------------------------------

impl fmt::Display for BaseStationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Base Station Report ===")?;
        line(f, "Repeat", self.repeat)?;
        mmsi_line(f, self.mmsi)?;
        match self.time {
            Some(t) => line(f, "Time", t.format("%Y-%m-%d %H:%M:%S UTC"))?,
            None => line(f, "Time", "not available")?,
        }
        line(f, "Accuracy", accuracy(self.accuracy))?;
        line(f, "Coordinates", format_coordinates(self.lon, self.lat))?;
        line(f, "EPFD", epfd(self.epfd))?;
        line(f, "RAIM", raim(self.raim))
    }
}

// ---------------------------------------------------------------------------
// Static data
// ---------------------------------------------------------------------------

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_available() {
            return write!(f, "not available");
        }
        write!(
            f,
            "{:02}-{:02} {:02}:{:02}",
            self.month, self.day, self.hour, self.minute
        )
    }
}

impl fmt::Display for StaticVoyageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Static and Voyage Related Data ===")?;
        line(f, "Repeat", self.repeat)?;
        mmsi_line(f, self.mmsi)?;
        line(f, "AIS Version", self.ais_version)?;
        if self.imo == 0 {
            line(f, "IMO number", "Inland Vessel")?;
        } else {
            line(f, "IMO number", self.imo)?;
        }
        line(f, "Call Sign", &self.callsign)?;
        line(f, "Vessel Name", &self.vessel_name)?;
        line(f, "Ship Type", ship_type(self.ship_type))?;
        write_dimensions(f, &self.dimensions)?;
        line(f, "EPFD", epfd(self.epfd))?;
        line(f, "ETA", self.eta)?;
        if self.draught == 0 {
            line(f, "Draught", "Not available")?;
        } else {
            line(f, "Draught", format_args!("{:.1} meters", self.draught as f32 / 10.0))?;
        }
        line(f, "Destination", &self.destination)?;
        line(f, "DTE", if self.dte { "not ready" } else { "ready" })
    }
}

impl fmt::Display for StaticDataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.part {
            StaticDataPart::A { vessel_name } => {
                writeln!(f, "=== Static Data Report (Part A) ===")?;
                line(f, "Repeat", self.repeat)?;
                mmsi_line(f, self.mmsi)?;
                line(f, "Vessel Name", vessel_name)
            }
            StaticDataPart::B {
                ship_type: code,
                vendor_id,
                unit_model_code,
                serial_number,
                call_sign,
                reference,
            } => {
                writeln!(f, "=== Static Data Report (Part B) ===")?;
                line(f, "Repeat", self.repeat)?;
                mmsi_line(f, self.mmsi)?;
                line(f, "Ship Type", ship_type(*code))?;
                line(f, "Vendor ID", vendor_id)?;
                line(f, "Unit Model", unit_model_code)?;
                line(f, "Serial No.", serial_number)?;
                line(f, "Call Sign", call_sign)?;
                match reference {
                    CraftReference::Dimensions(d) => write_dimensions(f, d),
                    CraftReference::Mothership(parent) => line(
                        f,
                        "Mothership",
                        format_args!("{parent:09} [{}]", mmsi::describe(*parent)),
                    ),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Binary broadcast
// ---------------------------------------------------------------------------

impl fmt::Display for BinaryBroadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Binary Broadcast ===")?;
        line(f, "Repeat", self.repeat)?;
        mmsi_line(f, self.mmsi)?;
        line(
            f,
            "DAC-FID",
            format_args!(
                "{}-{} ({})",
                self.dac,
                self.fid,
                binary_broadcast_name(self.dac, self.fid).unwrap_or("unknown application")
            ),
        )
    }
}

impl fmt::Display for AisMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AisMessage::ClassAPosition(m) => fmt::Display::fmt(m, f),
            AisMessage::ClassBPosition(m) => fmt::Display::fmt(m, f),
            AisMessage::BaseStation(m) => fmt::Display::fmt(m, f),
            AisMessage::StaticVoyage(m) => fmt::Display::fmt(m, f),
            AisMessage::StaticData(m) => fmt::Display::fmt(m, f),
            AisMessage::BinaryBroadcast(m) => fmt::Display::fmt(m, f),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::decode::*;

    #[test]
    fn test_class_a_rendering() {
        let m = decode_class_a_position_report("13P:v?h009Ogbr4NkiITkU>L089D").unwrap();
        let text = m.to_string();
        let expected = "\
=== Class A Position Report (1) ===
 Repeat       : 0
 MMSI         : 235060799 [Ship, United Kingdom of Great Britain and Northern Ireland]
 Nav.Status   : Under way using engine
 Turn (ROT)   : not turning
 Speed (SOG)  : 0.9 knots
 Accuracy     : Low accuracy (>10m)
 Coordinates  :   3°34.0350'W  53°50.5510'N
 Course (COG) : 123.0°
 Heading (HDG): 167°
 Maneuver     : not available
 RAIM         : not in use
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_class_b_rendering() {
        let m = decode_class_b_position_report("B3ujWF0000DdVU8O:1H03wi5oP06").unwrap();
        let text = m.to_string();
        assert!(text.starts_with("=== Class B Position Report ===\n"));
        assert!(text.contains(" MMSI         : 266119000 [Ship, Sweden]\n"));
        assert!(text.contains(" Heading (HDG): not available\n"));
        assert!(text.contains(" CS Unit      : true\n"));
        assert!(text.contains(" Display      : false\n"));
        assert!(text.contains(" RAIM         : in use\n"));
    }

    #[test]
    fn test_base_station_rendering() {
        let m = decode_base_station_report("402R3KiutR0Qk156V4QQTOA00<0;").unwrap();
        let text = m.to_string();
        assert!(text.contains(" MMSI         : 002655087 [Coastal Station, Sweden]\n"));
        assert!(text.contains(" Time         : 2015-02-04 00:33:51 UTC\n"));
        assert!(text.contains(" EPFD         : GPS\n"));
    }

    #[test]
    fn test_static_voyage_rendering() {
        let m = decode_static_voyage_data(
            "53uJur01rN?U<9@T001@tI@F000000000000000l0pA444mm?:1km1@SlQp000000000000",
        )
        .unwrap();
        let text = m.to_string();
        assert!(text.contains(" IMO number   : 8026361\n"));
        assert!(text.contains(" Vessel Name  : TOFTE\n"));
        assert!(text.contains(" Ship Type    : Tug\n"));
        assert!(text.contains(" Dim to Bow   : 7 meters\n"));
        assert!(text.contains(" ETA          : 03-11 21:15\n"));
        // Draught comes from the draught field, not the IMO number
        assert!(text.contains(" Draught      : 4.0 meters\n"));
        assert!(text.contains(" Destination  : GOTEBORG\n"));
    }

    #[test]
    fn test_inland_vessel_rendering() {
        let m = decode_static_voyage_data("53m`0o400000hKGCON18E<=DF0:1").unwrap();
        let text = m.to_string();
        assert!(text.contains(" IMO number   : Inland Vessel\n"));
        assert!(text.contains(" Dim to Port  : Not available\n"));
        assert!(text.contains(" ETA          : not available\n"));
        assert!(text.contains(" Draught      : Not available\n"));
    }

    #[test]
    fn test_static_data_rendering() {
        let a = decode_static_data_report("H42O55i18tMET00000000000000").unwrap();
        assert!(a.to_string().contains(" Vessel Name  : PROGUY\n"));

        let aux = decode_static_data_report("H>WikQll123<30q=D8B000>0cpw0").unwrap();
        let text = aux.to_string();
        assert!(text.starts_with("=== Static Data Report (Part B) ===\n"));
        assert!(text.contains(" Mothership   : 235060799 [Ship, United Kingdom"));
    }

    #[test]
    fn test_binary_broadcast_rendering() {
        let m = decode_binary_broadcast("802<HW@0GjbbbbbbbP").unwrap();
        assert!(m
            .to_string()
            .contains(" DAC-FID      : 1-31 (Meteorological and Hydrological)\n"));
    }
}
