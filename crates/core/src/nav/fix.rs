//! Normalized position/time fix

use core::fmt;

/// Altitude reported when the receiver gives zero or a negative height
///
/// Keeps "no reading" apart from a real ground-level altitude downstream.
pub const ALTITUDE_FLOOR_M: u16 = 1;

/// Highest altitude reported (stratospheric balloon ceiling)
pub const ALTITUDE_CEILING_M: u16 = 50_000;

/// Convert a height in millimeters to the clamped altitude in meters
///
/// Integer division truncates toward zero; values at or below zero map to
/// [`ALTITUDE_FLOOR_M`], values above the ceiling to [`ALTITUDE_CEILING_M`].
pub fn altitude_from_mm(height_mm: i32) -> u16 {
    let meters = height_mm / 1000;
    if meters <= 0 {
        ALTITUDE_FLOOR_M
    } else if meters > ALTITUDE_CEILING_M as i32 {
        ALTITUDE_CEILING_M
    } else {
        meters as u16
    }
}

/// Receiver fix type code (NAV-PVT `fixType`, NAV-SOL `gpsFix`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FixType {
    /// No fix
    NoFix,
    /// Dead reckoning only
    DeadReckoning,
    /// 2D fix
    Fix2D,
    /// 3D fix
    Fix3D,
    /// GNSS combined with dead reckoning
    GnssDeadReckoning,
    /// Time only fix
    TimeOnly,
}

impl FixType {
    /// Decode the raw code; unknown codes are treated as no fix
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => FixType::DeadReckoning,
            2 => FixType::Fix2D,
            3 => FixType::Fix3D,
            4 => FixType::GnssDeadReckoning,
            5 => FixType::TimeOnly,
            _ => FixType::NoFix,
        }
    }

    /// Whether the solution includes a 3D position
    pub fn has_3d_position(self) -> bool {
        matches!(self, FixType::Fix3D | FixType::GnssDeadReckoning)
    }
}

/// UTC date and time of a fix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixTime {
    /// Year (e.g. 2017)
    pub year: u16,
    /// Month, 1..=12
    pub month: u8,
    /// Day of month, 1..=31
    pub day: u8,
    /// Hour, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=60
    pub second: u8,
}

/// A position/time sample from the receiver
///
/// Position and time fields are only trustworthy when `valid` is set; the
/// receiver driver decides that with its lock predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fix {
    /// UTC time of the solution
    pub time: FixTime,
    /// Latitude in degrees * 1e7
    pub latitude: i32,
    /// Longitude in degrees * 1e7
    pub longitude: i32,
    /// Altitude above mean sea level in meters, clamped to 1..=50000
    pub altitude: u16,
    /// Satellites used in the solution
    pub num_svs: u8,
    /// Raw fix type code
    pub fix_type: u8,
    /// Lock predicate held when the fix was taken
    pub valid: bool,
}

impl Default for Fix {
    fn default() -> Self {
        Self {
            time: FixTime::default(),
            latitude: 0,
            longitude: 0,
            altitude: ALTITUDE_FLOOR_M,
            num_svs: 0,
            fix_type: 0,
            valid: false,
        }
    }
}

impl Fix {
    /// Decoded fix type
    pub fn fix_kind(&self) -> FixType {
        FixType::from_code(self.fix_type)
    }
}

/// Write a `degrees * 1e7` value with seven decimals
fn write_degrees(f: &mut fmt::Formatter<'_>, value: i32) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    write!(f, "{}{}.{:07}", sign, abs / 10_000_000, abs % 10_000_000)
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.time;
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} ",
            t.year, t.month, t.day, t.hour, t.minute, t.second
        )?;
        write_degrees(f, self.latitude)?;
        f.write_str(" ")?;
        write_degrees(f, self.longitude)?;
        write!(
            f,
            " alt {}m sats {} type {}",
            self.altitude, self.num_svs, self.fix_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_altitude_clamp() {
        assert_eq!(altitude_from_mm(-500), 1);
        assert_eq!(altitude_from_mm(60_000_000), 50_000);
        assert_eq!(altitude_from_mm(12_345_000), 12_345);
    }

    #[test]
    fn test_altitude_edges() {
        assert_eq!(altitude_from_mm(0), 1);
        // Truncates toward zero: 999 mm is 0 m, which is not a reading
        assert_eq!(altitude_from_mm(999), 1);
        assert_eq!(altitude_from_mm(1_000), 1);
        assert_eq!(altitude_from_mm(2_999), 2);
        assert_eq!(altitude_from_mm(50_000_999), 50_000);
        assert_eq!(altitude_from_mm(50_001_000), 50_000);
        assert_eq!(altitude_from_mm(i32::MIN), 1);
        assert_eq!(altitude_from_mm(i32::MAX), 50_000);
    }

    #[test]
    fn test_fix_type_codes() {
        assert_eq!(FixType::from_code(0), FixType::NoFix);
        assert_eq!(FixType::from_code(3), FixType::Fix3D);
        assert_eq!(FixType::from_code(0xFF), FixType::NoFix);
        assert!(FixType::Fix3D.has_3d_position());
        assert!(FixType::GnssDeadReckoning.has_3d_position());
        assert!(!FixType::Fix2D.has_3d_position());
        assert!(!FixType::TimeOnly.has_3d_position());
    }

    #[test]
    fn test_default_fix_not_valid() {
        let fix = Fix::default();
        assert!(!fix.valid);
        assert_eq!(fix.altitude, ALTITUDE_FLOOR_M);
        assert_eq!(fix.fix_kind(), FixType::NoFix);
    }

    #[test]
    fn test_fix_display() {
        let fix = Fix {
            time: FixTime {
                year: 2017,
                month: 3,
                day: 4,
                hour: 5,
                minute: 6,
                second: 7,
            },
            latitude: 525_200_123,
            longitude: -4_050_000,
            altitude: 31_337,
            num_svs: 9,
            fix_type: 3,
            valid: true,
        };

        let mut text = heapless::String::<96>::new();
        write!(text, "{}", fix).unwrap();
        assert_eq!(
            text.as_str(),
            "2017-03-04 05:06:07 52.5200123 -0.4050000 alt 31337m sats 9 type 3"
        );
    }
}
