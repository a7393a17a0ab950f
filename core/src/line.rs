use super::coord;
use super::error::FieldError;

// What `exiftool -ee -gps*` prints for one embedded GPS sample. Other
// metadata lines are interleaved with these and are ignored.
//
// GPS Date Time                   : 2023:06:18 09:41:12.345
// GPS Latitude                    : 53 deg 12' 16.92" N
// GPS Longitude                   : 6 deg 32' 13.56" E
// GPS Altitude                    : 0.337 m

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    DateTime,
    Latitude,
    Longitude,
    Altitude,
}

impl FieldKind {
    // Checked in this order. This is a plain prefix match, so a label like
    // "GPS Altitude Ref" is classified as `Altitude`.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::DateTime,
        FieldKind::Latitude,
        FieldKind::Longitude,
        FieldKind::Altitude,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::DateTime => "GPS Date Time",
            FieldKind::Latitude => "GPS Latitude",
            FieldKind::Longitude => "GPS Longitude",
            FieldKind::Altitude => "GPS Altitude",
        }
    }

    pub fn classify(line: &str) -> Option<FieldKind> {
        Self::ALL
            .into_iter()
            .find(|kind| line.starts_with(kind.label()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    DateTime(String),
    Latitude(f64),
    Longitude(f64),
    /// `None` is the absent marker for an altitude that was seen but was
    /// not a number.
    Altitude(Option<f64>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::DateTime(_) => FieldKind::DateTime,
            FieldValue::Latitude(_) => FieldKind::Latitude,
            FieldValue::Longitude(_) => FieldKind::Longitude,
            FieldValue::Altitude(_) => FieldKind::Altitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Unrecognized,
    Field(FieldValue),
    /// The line carried a GPS field but its value was malformed. `value` is
    /// what should still be applied to the current record, if anything.
    Recovered {
        kind: FieldKind,
        value: Option<FieldValue>,
        error: FieldError,
    },
}

pub fn parse_line(line: &str) -> ParsedLine {
    let Some(kind) = FieldKind::classify(line) else {
        return ParsedLine::Unrecognized;
    };

    let Some((_, raw)) = line.split_once(':') else {
        return ParsedLine::Recovered {
            kind,
            value: None,
            error: FieldError::MissingValue(line.to_string()),
        };
    };
    let raw = raw.trim();

    match kind {
        FieldKind::DateTime => ParsedLine::Field(FieldValue::DateTime(raw.to_string())),
        FieldKind::Latitude => coordinate(kind, raw, FieldValue::Latitude),
        FieldKind::Longitude => coordinate(kind, raw, FieldValue::Longitude),
        FieldKind::Altitude => match parse_altitude(raw) {
            Some(altitude) => ParsedLine::Field(FieldValue::Altitude(Some(altitude))),
            None => ParsedLine::Recovered {
                kind,
                value: Some(FieldValue::Altitude(None)),
                error: FieldError::MalformedAltitude(raw.to_string()),
            },
        },
    }
}

fn coordinate(kind: FieldKind, raw: &str, wrap: fn(f64) -> FieldValue) -> ParsedLine {
    match coord::parse_coordinate(raw) {
        Ok(value) => ParsedLine::Field(wrap(value)),
        Err(error) => ParsedLine::Recovered {
            kind,
            value: None,
            error,
        },
    }
}

// "0.337 m" -> 0.337. Non finite numbers can't be written to JSON.
fn parse_altitude(raw: &str) -> Option<f64> {
    raw.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_date_time_is_kept_verbatim() {
        let parsed = parse_line("GPS Date Time                   : 2023:06:18 09:41:12.345");
        assert_eq!(
            parsed,
            ParsedLine::Field(FieldValue::DateTime("2023:06:18 09:41:12.345".into()))
        );
    }

    #[test]
    fn parse_latitude_line() {
        let ParsedLine::Field(FieldValue::Latitude(value)) =
            parse_line(r#"GPS Latitude                    : 40 deg 26' 46.00" N"#)
        else {
            panic!("expected a latitude");
        };
        assert!((value - 40.446111).abs() < 1e-6);
    }

    #[test]
    fn parse_longitude_line() {
        let ParsedLine::Field(FieldValue::Longitude(value)) =
            parse_line(r#"GPS Longitude                   : 79 deg 58' 56.00" W"#)
        else {
            panic!("expected a longitude");
        };
        assert!((value + 79.982222).abs() < 1e-6);
    }

    #[test]
    fn parse_altitude_takes_first_token() {
        assert_eq!(
            parse_line("GPS Altitude                    : 8.141 m"),
            ParsedLine::Field(FieldValue::Altitude(Some(8.141)))
        );
    }

    #[test]
    fn malformed_altitude_recovers_with_absent_marker() {
        assert_eq!(
            parse_line("GPS Altitude Ref                : Above Sea Level"),
            ParsedLine::Recovered {
                kind: FieldKind::Altitude,
                value: Some(FieldValue::Altitude(None)),
                error: FieldError::MalformedAltitude("Above Sea Level".into()),
            }
        );
    }

    #[test]
    fn empty_and_non_finite_altitudes_are_absent() {
        for line in ["GPS Altitude :", "GPS Altitude : nan m", "GPS Altitude : inf"] {
            let ParsedLine::Recovered { value, .. } = parse_line(line) else {
                panic!("expected {line} to be recovered");
            };
            assert_eq!(value, Some(FieldValue::Altitude(None)));
        }
    }

    #[test]
    fn malformed_coordinate_drops_the_field() {
        let parsed = parse_line("GPS Latitude Ref                : North");
        assert_eq!(
            parsed,
            ParsedLine::Recovered {
                kind: FieldKind::Latitude,
                value: None,
                error: FieldError::MalformedCoordinate("North".into()),
            }
        );
    }

    #[test]
    fn recognized_label_without_colon() {
        let parsed = parse_line("GPS Longitude");
        assert!(matches!(
            parsed,
            ParsedLine::Recovered {
                kind: FieldKind::Longitude,
                value: None,
                error: FieldError::MissingValue(_),
            }
        ));
    }

    #[test]
    fn unrelated_lines_are_unrecognized() {
        for line in [
            "---- Doc1 ----",
            "GPS Speed                       : 0.42",
            "GPS Measure Mode                : 3-Dimensional Measurement",
            "Sample Time                     : 0 s",
            " GPS Latitude : 1 deg 2' 3\" N",
            "",
        ] {
            assert_eq!(parse_line(line), ParsedLine::Unrecognized, "{line}");
        }
    }

    #[test]
    fn value_split_on_first_colon_only() {
        assert_eq!(
            parse_line("GPS Date Time: 2023:06:18 09:41:12Z"),
            ParsedLine::Field(FieldValue::DateTime("2023:06:18 09:41:12Z".into()))
        );
    }
}
