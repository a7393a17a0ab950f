use super::line::{self, FieldValue, ParsedLine};
use serde::{Deserialize, Deserializer, Serialize};

// Stored samples must have exactly these four keys. An unknown key or a
// missing `altitude` fails to parse instead of reading as equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GpsSample {
    pub datetime: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(deserialize_with = "nullable_altitude")]
    pub altitude: Option<f64>,
}

// Without this serde reads a missing `Option` key as `None`.
fn nullable_altitude<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

/// All the samples of one media file in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GpsTrace(Vec<GpsSample>);

impl GpsTrace {
    pub fn samples(&self) -> &[GpsSample] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // The persisted form. Four space indentation, keys in field order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only writes valid utf8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

impl From<Vec<GpsSample>> for GpsTrace {
    fn from(samples: Vec<GpsSample>) -> Self {
        Self(samples)
    }
}

impl<'a> IntoIterator for &'a GpsTrace {
    type Item = &'a GpsSample;
    type IntoIter = std::slice::Iter<'a, GpsSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// The record being filled in. Altitude is doubly optional: the outer
// option is "not seen yet", the inner one the absent marker.
#[derive(Debug, Default)]
struct PartialSample {
    datetime: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<Option<f64>>,
}

impl PartialSample {
    fn set(&mut self, value: FieldValue) {
        match value {
            FieldValue::DateTime(v) => self.datetime = Some(v),
            FieldValue::Latitude(v) => self.latitude = Some(v),
            FieldValue::Longitude(v) => self.longitude = Some(v),
            FieldValue::Altitude(v) => self.altitude = Some(v),
        }
    }

    fn filled(&self) -> usize {
        [
            self.datetime.is_some(),
            self.latitude.is_some(),
            self.longitude.is_some(),
            self.altitude.is_some(),
        ]
        .into_iter()
        .filter(|x| *x)
        .count()
    }

    // Takes the record out only once all four fields are there.
    fn take_complete(&mut self) -> Option<GpsSample> {
        if self.filled() < 4 {
            return None;
        }
        let partial = std::mem::take(self);
        Some(GpsSample {
            datetime: partial.datetime?,
            latitude: partial.latitude?,
            longitude: partial.longitude?,
            altitude: partial.altitude?,
        })
    }
}

/// Groups GPS fields into samples. A sample is pushed the moment its fourth
/// field is set, whatever order the fields came in. A field that shows up
/// twice before the record completes overwrites the earlier value.
#[derive(Debug, Default)]
pub struct TraceAssembler {
    current: PartialSample,
    samples: Vec<GpsSample>,
}

impl TraceAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, value: FieldValue) {
        self.current.set(value);
        if let Some(sample) = self.current.take_complete() {
            self.samples.push(sample);
        }
    }

    /// Parse one line of tool output and apply it. Malformed values are
    /// applied as far as they can be and handed back to the caller.
    pub fn feed_line(&mut self, text: &str) -> ParsedLine {
        let parsed = line::parse_line(text);
        match &parsed {
            ParsedLine::Unrecognized => {}
            ParsedLine::Field(value) => self.set(value.clone()),
            ParsedLine::Recovered { value, .. } => {
                if let Some(value) = value {
                    self.set(value.clone());
                }
            }
        }
        parsed
    }

    pub fn pending_fields(&self) -> usize {
        self.current.filled()
    }

    pub fn finish(self) -> GpsTrace {
        let pending = self.current.filled();
        if pending > 0 {
            tracing::debug!(pending, "discarding incomplete GPS record at end of input");
        }
        GpsTrace(self.samples)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample(datetime: &str, latitude: f64, longitude: f64, altitude: Option<f64>) -> GpsSample {
        GpsSample {
            datetime: datetime.into(),
            latitude,
            longitude,
            altitude,
        }
    }

    fn fields() -> Vec<FieldValue> {
        vec![
            FieldValue::DateTime("2023:06:18 09:41:12.345".into()),
            FieldValue::Latitude(53.2047),
            FieldValue::Longitude(6.5371),
            FieldValue::Altitude(Some(0.337)),
        ]
    }

    #[test]
    fn emits_on_fourth_field_in_any_order() {
        let orders = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];
        for order in orders {
            let values = fields();
            let mut asm = TraceAssembler::new();
            for (i, idx) in order.iter().enumerate() {
                asm.set(values[*idx].clone());
                let expected = if i == 3 { 0 } else { i + 1 };
                assert_eq!(asm.pending_fields(), expected);
            }
            let trace = asm.finish();
            assert_eq!(
                trace.samples(),
                &[sample("2023:06:18 09:41:12.345", 53.2047, 6.5371, Some(0.337))]
            );
        }
    }

    #[test]
    fn three_fields_emit_nothing() {
        let mut asm = TraceAssembler::new();
        for value in fields().into_iter().take(3) {
            asm.set(value);
        }
        assert_eq!(asm.pending_fields(), 3);
        assert!(asm.finish().is_empty());
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let mut asm = TraceAssembler::new();
        asm.set(FieldValue::Latitude(1.0));
        asm.set(FieldValue::Latitude(2.0));
        asm.set(FieldValue::DateTime("t".into()));
        asm.set(FieldValue::Longitude(3.0));
        asm.set(FieldValue::Altitude(None));
        assert_eq!(asm.finish().samples(), &[sample("t", 2.0, 3.0, None)]);
    }

    #[test]
    fn absent_altitude_completes_a_record() {
        let mut asm = TraceAssembler::new();
        asm.feed_line("GPS Date Time : 2023:06:18 09:41:12");
        asm.feed_line(r#"GPS Latitude : 53 deg 12' 16.92" N"#);
        asm.feed_line(r#"GPS Longitude : 6 deg 32' 13.56" E"#);
        let parsed = asm.feed_line("GPS Altitude : unknown");
        assert!(matches!(parsed, ParsedLine::Recovered { .. }));

        let trace = asm.finish();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.samples()[0].altitude, None);
    }

    #[test]
    fn unrecognized_line_leaves_record_untouched() {
        let mut asm = TraceAssembler::new();
        asm.feed_line("GPS Date Time : 2023:06:18 09:41:12");
        let parsed = asm.feed_line("Camera Model Name               : HERO11 Black");
        assert_eq!(parsed, ParsedLine::Unrecognized);
        assert_eq!(asm.pending_fields(), 1);
    }

    #[test]
    fn malformed_coordinate_stalls_the_record() {
        let mut asm = TraceAssembler::new();
        asm.feed_line("GPS Date Time : a");
        asm.feed_line("GPS Latitude : garbage");
        asm.feed_line(r#"GPS Longitude : 6 deg 32' 13.56" E"#);
        asm.feed_line("GPS Altitude : 1 m");
        assert_eq!(asm.pending_fields(), 3);

        // The next record's fields overwrite the stalled one.
        asm.feed_line("GPS Date Time : b");
        asm.feed_line(r#"GPS Latitude : 53 deg 12' 16.92" N"#);
        let trace = asm.finish();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.samples()[0].datetime, "b");
        assert_eq!(trace.samples()[0].altitude, Some(1.0));
    }

    #[test]
    fn samples_keep_encounter_order() {
        let mut asm = TraceAssembler::new();
        for i in 0..3 {
            asm.set(FieldValue::DateTime(format!("t{i}")));
            asm.set(FieldValue::Latitude(i as f64));
            asm.set(FieldValue::Longitude(-(i as f64)));
            asm.set(FieldValue::Altitude(Some(10.0 * i as f64)));
        }
        let names = asm
            .finish()
            .samples()
            .iter()
            .map(|x| x.datetime.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn json_uses_four_space_indent_and_null_altitude() {
        let trace = GpsTrace::from(vec![sample("2023:06:18 09:41:12", 1.5, -2.25, None)]);
        let expected = r#"[
    {
        "datetime": "2023:06:18 09:41:12",
        "latitude": 1.5,
        "longitude": -2.25,
        "altitude": null
    }
]"#;
        assert_eq!(trace.to_json().unwrap(), expected);
    }

    #[test]
    fn json_round_trip_is_exact() {
        let trace = GpsTrace::from(vec![
            sample(
                "2023:06:18 09:41:12.345",
                convert_for_test(53, 12, 16.92),
                -convert_for_test(6, 32, 13.56),
                Some(0.337),
            ),
            sample("2023:06:18 09:41:13.345", 40.44611111111111, -79.98222222222222, None),
        ]);
        let back = GpsTrace::from_json(&trace.to_json().unwrap()).unwrap();
        assert_eq!(back, trace);
    }

    fn convert_for_test(d: u32, m: u32, s: f64) -> f64 {
        crate::coord::convert(d, m, s, crate::coord::Hemisphere::N)
    }

    #[test]
    fn stored_sample_needs_exactly_the_four_keys() {
        let missing = r#"[{"datetime": "t", "latitude": 1.0, "longitude": 2.0}]"#;
        let extra = r#"[{"datetime": "t", "latitude": 1.0, "longitude": 2.0,
            "altitude": null, "speed": 3}]"#;
        let exact = r#"[{"datetime": "t", "latitude": 1.0, "longitude": 2.0, "altitude": null}]"#;

        assert!(GpsTrace::from_json(missing).is_err());
        assert!(GpsTrace::from_json(extra).is_err());
        assert_eq!(
            GpsTrace::from_json(exact).unwrap().samples(),
            &[sample("t", 1.0, 2.0, None)]
        );
    }

    #[test]
    fn reads_json_written_with_other_float_formatting() {
        let data = r#"[{"datetime": "x", "latitude": 1.0, "longitude": 2, "altitude": 3}]"#;
        let trace = GpsTrace::from_json(data).unwrap();
        assert_eq!(trace.samples(), &[sample("x", 1.0, 2.0, Some(3.0))]);
    }
}
