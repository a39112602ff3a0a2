//! Raw header and location line parsing.

use super::schema::{HEADER_SCHEMA, HeaderField, LOCATION_SCHEMA, LocationField};
use crate::config::DateStorage;
use crate::constants::{
    HEADER_DATE_FORMAT, HEADER_DATE_SEPARATOR, HEADER_TIME_FORMAT, TIMESTAMP_DATE_SEPARATOR,
};
use crate::coordinate::{Axis, normalize_axis};
use crate::error::{CoordinateError, RecordError};
use crate::models::Observation;
use chrono::NaiveDateTime;

/// Fields of a `Date :` line
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecordHeader {
    pub tag_id: i32,
    pub date: String,
    pub time: String,
    pub location_class: String,
    pub recorded_at: Option<NaiveDateTime>,
}

impl RawRecordHeader {
    /// Parse a header line found at `line_number`
    pub fn parse(
        line: &str,
        line_number: usize,
        date_storage: DateStorage,
    ) -> Result<Self, RecordError> {
        let malformed = |reason: String| RecordError::MalformedHeader {
            line: line_number,
            reason,
        };

        let fields = HEADER_SCHEMA.extract(line).map_err(malformed)?;

        let tag_token = fields.get(HeaderField::TagId);
        let tag_id = tag_token
            .parse::<i32>()
            .map_err(|e| malformed(format!("tag id '{}' is not an integer ({})", tag_token, e)))?;

        let date = fields.get(HeaderField::Date).to_string();
        let time = fields.get(HeaderField::Time).to_string();

        let recorded_at = match date_storage {
            DateStorage::Text => None,
            DateStorage::TypedDate => {
                let format = format!("{} {}", HEADER_DATE_FORMAT, HEADER_TIME_FORMAT);
                let parsed =
                    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), &format)
                        .map_err(|e| {
                            malformed(format!("invalid date/time '{} {}' ({})", date, time, e))
                        })?;
                Some(parsed)
            }
        };

        Ok(Self {
            tag_id,
            date,
            time,
            location_class: fields.get(HeaderField::LocationClass).to_string(),
            recorded_at,
        })
    }

    /// `DD/MM/YY HH:MM:SS` text timestamp
    pub fn timestamp(&self) -> String {
        format!(
            "{} {}",
            self.date
                .replace(HEADER_DATE_SEPARATOR, TIMESTAMP_DATE_SEPARATOR),
            self.time
        )
    }
}

/// Raw coordinate tokens of a location line
#[derive(Debug, Clone, PartialEq)]
pub struct RawLocationLine {
    pub lat_token: String,
    pub lon_token: String,
}

impl RawLocationLine {
    /// Parse the line following a header
    pub fn parse(line: &str, line_number: usize) -> Result<Self, RecordError> {
        let fields = LOCATION_SCHEMA
            .extract(line)
            .map_err(|reason| RecordError::MissingLocationLine {
                line: line_number,
                reason,
            })?;

        Ok(Self {
            lat_token: fields.get(LocationField::Latitude).to_string(),
            lon_token: fields.get(LocationField::Longitude).to_string(),
        })
    }

    /// Signed `(latitude, longitude)` in decimal degrees
    pub fn normalize(&self, line_number: usize) -> Result<(f64, f64), RecordError> {
        let coordinate_error = |source: CoordinateError| RecordError::MalformedCoordinate {
            line: line_number,
            source,
        };

        let latitude = normalize_axis(&self.lat_token, Axis::Latitude).map_err(coordinate_error)?;
        let longitude =
            normalize_axis(&self.lon_token, Axis::Longitude).map_err(coordinate_error)?;

        Ok((latitude, longitude))
    }
}

/// Combine a header with its location line into an observation
pub fn build_observation(
    header: RawRecordHeader,
    location: &RawLocationLine,
    line_number: usize,
) -> Result<Observation, RecordError> {
    let (latitude, longitude) = location.normalize(line_number)?;

    Ok(Observation {
        timestamp: header.timestamp(),
        tag_id: header.tag_id,
        location_class: header.location_class,
        recorded_at: header.recorded_at,
        longitude,
        latitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    const HEADER: &str = "20616 Date : 03.07.97 18:08:43 LC : 3 IQ : 66";

    #[test]
    fn test_parse_header_text_mode() {
        let header = RawRecordHeader::parse(HEADER, 1, DateStorage::Text).unwrap();
        assert_eq!(header.tag_id, 20616);
        assert_eq!(header.location_class, "3");
        assert_eq!(header.timestamp(), "03/07/97 18:08:43");
        assert_eq!(header.recorded_at, None);
    }

    #[test]
    fn test_parse_header_typed_mode() {
        let header = RawRecordHeader::parse(HEADER, 1, DateStorage::TypedDate).unwrap();
        let expected = NaiveDate::from_ymd_opt(1997, 7, 3)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(18, 8, 43).unwrap());
        assert_eq!(header.recorded_at, Some(expected));
    }

    #[test]
    fn test_text_mode_does_not_validate_dates() {
        let line = "20616 Date : 99.99.97 18:08:43 LC : 3";
        assert!(RawRecordHeader::parse(line, 1, DateStorage::Text).is_ok());

        let err = RawRecordHeader::parse(line, 4, DateStorage::TypedDate).unwrap_err();
        assert!(matches!(err, RecordError::MalformedHeader { line: 4, .. }));
    }

    #[test]
    fn test_non_numeric_tag_id() {
        let line = "TAG01 Date : 03.07.97 18:08:43 LC : 3";
        let err = RawRecordHeader::parse(line, 2, DateStorage::Text).unwrap_err();
        match err {
            RecordError::MalformedHeader { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("TAG01"));
            }
            other => panic!("Expected MalformedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_short_location_line() {
        let err = RawLocationLine::parse("Lat1 : 34.363N", 7).unwrap_err();
        assert!(matches!(err, RecordError::MissingLocationLine { line: 7, .. }));
    }

    #[test]
    fn test_build_observation() {
        let header = RawRecordHeader::parse(HEADER, 1, DateStorage::Text).unwrap();
        let location = RawLocationLine::parse("Lat1 : 34.363N Lon1 : 77.841W", 2).unwrap();
        let obs = build_observation(header, &location, 2).unwrap();

        assert_eq!(obs.tag_id, 20616);
        assert_eq!(obs.latitude, 34.363);
        assert_eq!(obs.longitude, -77.841);
        assert_eq!(obs.timestamp, "03/07/97 18:08:43");
    }

    #[test]
    fn test_build_observation_bad_coordinate() {
        let header = RawRecordHeader::parse(HEADER, 1, DateStorage::Text).unwrap();
        let location = RawLocationLine::parse("Lat1 : ???N Lon1 : 77.841W", 2).unwrap();
        let err = build_observation(header, &location, 2).unwrap_err();
        assert!(matches!(err, RecordError::MalformedCoordinate { line: 2, .. }));
    }
}
