use super::error::FieldError;
use regex::Regex;
use std::sync::LazyLock;

// Example of the values exiftool prints for the coordinates:
//
// GPS Latitude                    : 53 deg 12' 16.92" N
// GPS Longitude                   : 6 deg 32' 13.56" E
// GPS Latitude                    : 53 deg 12' 9.72" N
// GPS Longitude                   : 6 deg 32' 15.36" E
//
// The match is only anchored at the start. Whatever follows the
// hemisphere letter is ignored.
static DMS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\d+)\s*deg\s*(\d+)'?\s*(\d+(?:\.\d+)?)"?\s*([NSEW])"#)
        .expect("the DMS pattern to be a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" => Some(Self::N),
            "S" => Some(Self::S),
            "E" => Some(Self::E),
            "W" => Some(Self::W),
            _ => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::S | Self::W)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Angle {
    pub fn to_decimal(&self) -> f64 {
        convert(self.degrees, self.minutes, self.seconds, self.hemisphere)
    }
}

/// Sexagesimal to signed decimal degrees. South and west are negative.
/// No range checking is done here.
pub fn convert(degrees: u32, minutes: u32, seconds: f64, hemisphere: Hemisphere) -> f64 {
    let decimal = f64::from(degrees) + f64::from(minutes) / 60.0 + seconds / 3600.0;
    if hemisphere.is_negative() {
        -decimal
    } else {
        decimal
    }
}

pub fn parse_angle(text: &str) -> Result<Angle, FieldError> {
    let malformed = || FieldError::MalformedCoordinate(text.to_string());

    let caps = DMS_PATTERN.captures(text.trim()).ok_or_else(malformed)?;
    let degrees = caps[1].parse::<u32>().map_err(|_| malformed())?;
    let minutes = caps[2].parse::<u32>().map_err(|_| malformed())?;
    let seconds = caps[3].parse::<f64>().map_err(|_| malformed())?;
    let hemisphere = Hemisphere::from_letter(&caps[4]).ok_or_else(malformed)?;

    Ok(Angle {
        degrees,
        minutes,
        seconds,
        hemisphere,
    })
}

pub fn parse_coordinate(text: &str) -> Result<f64, FieldError> {
    parse_angle(text).map(|angle| angle.to_decimal())
}
