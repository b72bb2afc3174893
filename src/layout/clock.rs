//! Clock hand angles in the shared angular convention

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::polar::normalize_angle;

/// Rotation from "12 o'clock is up" to "0° points right"
const TWELVE_O_CLOCK: f64 = -90.0;

/// Errors when reading a `HH:MM[:SS]` time string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockTimeError {
    #[error("expected HH:MM or HH:MM:SS, got '{0}'")]
    Format(String),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },
}

/// A wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, ClockTimeError> {
        let check = |field: &'static str, value: u32, max: u32| {
            if value > max {
                Err(ClockTimeError::OutOfRange { field, value })
            } else {
                Ok(value)
            }
        };
        Ok(Self {
            hours: check("hours", hours, 23)?,
            minutes: check("minutes", minutes, 59)?,
            seconds: check("seconds", seconds, 59)?,
        })
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ClockTimeError::Format(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(format_err());
        }
        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_err());
            }
            *slot = part.parse().map_err(|_| format_err())?;
        }
        ClockTime::new(fields[0], fields[1], fields[2])
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Angles of the three hands, in degrees, 0° pointing right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

/// Compute hand angles for a time.
///
/// Hours advance 30° per hour plus 0.5° per minute, minutes 6° per minute plus
/// 0.1° per second, seconds 6° each. The face is then turned so that 12 is up.
pub fn hand_angles(time: &ClockTime) -> HandAngles {
    let h = (time.hours % 12) as f64;
    let m = time.minutes as f64;
    let s = time.seconds as f64;

    HandAngles {
        hour: normalize_angle(h * 30.0 + m * 0.5 + TWELVE_O_CLOCK),
        minute: normalize_angle(m * 6.0 + s * 0.1 + TWELVE_O_CLOCK),
        second: normalize_angle(s * 6.0 + TWELVE_O_CLOCK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ten_past_ten_thirty() {
        let time: ClockTime = "10:10:30".parse().unwrap();
        let angles = hand_angles(&time);
        assert!(approx(angles.hour, 215.0), "hour {}", angles.hour);
        assert!(approx(angles.minute, 333.0), "minute {}", angles.minute);
        assert!(approx(angles.second, 90.0), "second {}", angles.second);
    }

    #[test]
    fn test_noon_points_up() {
        let angles = hand_angles(&"12:00".parse().unwrap());
        assert_eq!(angles.hour, 270.0);
        assert_eq!(angles.minute, 270.0);
        assert_eq!(angles.second, 270.0);
    }

    #[test]
    fn test_three_oclock_points_right() {
        let angles = hand_angles(&"15:00:00".parse().unwrap());
        assert_eq!(angles.hour, 0.0);
    }

    #[test]
    fn test_parse_without_seconds() {
        let time: ClockTime = "7:05".parse().unwrap();
        assert_eq!(time, ClockTime::new(7, 5, 0).unwrap());
        assert_eq!(time.to_string(), "07:05:00");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("7".parse::<ClockTime>(), Err(ClockTimeError::Format(_))));
        assert!(matches!("aa:bb".parse::<ClockTime>(), Err(ClockTimeError::Format(_))));
        assert!(matches!("1:2:3:4".parse::<ClockTime>(), Err(ClockTimeError::Format(_))));
        assert_eq!(
            "24:00".parse::<ClockTime>(),
            Err(ClockTimeError::OutOfRange {
                field: "hours",
                value: 24
            })
        );
        assert!(matches!(
            "10:60".parse::<ClockTime>(),
            Err(ClockTimeError::OutOfRange { field: "minutes", .. })
        ));
    }
}
