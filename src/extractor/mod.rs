//! ARGOS record extractor
//!
//! Turns the lines of one transmission log into a lazy sequence of
//! `Result<Observation, RecordError>`. A record is a `Date :` header line
//! followed immediately by its location line:
//!
//! ```text
//! 20616 Date : 03.07.97 18:08:43 LC : 3 IQ : 66
//!      Lat1 : 34.363N  Lon1 : 77.841W  Lat2 : 30.301N  Lon2 : 59.390W
//! ```
//!
//! Pairing is positional. The line after a header is always consumed as that
//! header's location line, even when the header itself was malformed, so
//! scanning always resumes after the attempted location line. Lines outside
//! a pair that do not contain the header marker are ignored.
//!
//! ## Usage
//!
//! ```rust
//! use argos_importer::extractor::RecordExtractor;
//!
//! let log = "20616 Date : 03.07.97 18:08:43 LC : 3\nLat1 : 34.363N Lon1 : 77.841W\n";
//! let observations: Vec<_> = RecordExtractor::new(log.as_bytes())
//!     .filter_map(Result::ok)
//!     .collect();
//! assert_eq!(observations.len(), 1);
//! assert_eq!(observations[0].longitude, -77.841);
//! ```

pub mod record;
pub mod schema;

pub use record::{RawLocationLine, RawRecordHeader, build_observation};
pub use schema::{HEADER_SCHEMA, HeaderField, LOCATION_SCHEMA, LineSchema, LocationField};

use crate::config::DateStorage;
use crate::constants::HEADER_MARKER;
use crate::error::RecordError;
use crate::models::Observation;
use std::io::BufRead;

/// Extractor state between lines
#[derive(Debug)]
enum ScanState {
    /// Skipping lines until one contains the header marker
    ScanningForHeader,
    /// A header was read on `header_line`; the next line is its location line
    ExpectingLocationLine {
        header: Result<RawRecordHeader, RecordError>,
        header_line: usize,
    },
    /// End of input or a read failure
    Finished,
}

/// Whether `line` opens a record
pub fn is_header_line(line: &str) -> bool {
    line.contains(HEADER_MARKER)
}

/// Streaming record extractor over one log
///
/// Each call to `next` advances the underlying reader; the sequence cannot
/// be restarted. A [`RecordError::Read`] is the last item produced.
#[derive(Debug)]
pub struct RecordExtractor<R> {
    reader: R,
    state: ScanState,
    line_number: usize,
    date_storage: DateStorage,
    buffer: Vec<u8>,
}

impl<R: BufRead> RecordExtractor<R> {
    /// Extractor storing dates as text
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: ScanState::ScanningForHeader,
            line_number: 0,
            date_storage: DateStorage::Text,
            buffer: Vec::new(),
        }
    }

    /// Select how header dates are validated and stored
    pub fn with_date_storage(mut self, date_storage: DateStorage) -> Self {
        self.date_storage = date_storage;
        self
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Read the next line, decoding invalid UTF-8 lossily.
    /// `Ok(None)` marks end of input.
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.buffer.clear();
        let read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }

    /// Outcome for a header whose location line never arrived
    fn end_of_input(
        header: Result<RawRecordHeader, RecordError>,
        header_line: usize,
    ) -> RecordError {
        match header {
            Err(header_error) => header_error,
            Ok(_) => RecordError::MissingLocationLine {
                line: header_line,
                reason: "end of file immediately after header".to_string(),
            },
        }
    }

    /// Pair a header with the line that followed it
    fn complete_record(
        header: Result<RawRecordHeader, RecordError>,
        location_line: &str,
        line_number: usize,
    ) -> Result<Observation, RecordError> {
        let header = header?;

        if is_header_line(location_line) {
            return Err(RecordError::MissingLocationLine {
                line: line_number,
                reason: "header followed by another header".to_string(),
            });
        }

        let location = RawLocationLine::parse(location_line, line_number)?;
        build_observation(header, &location, line_number)
    }
}

impl<R: BufRead> Iterator for RecordExtractor<R> {
    type Item = Result<Observation, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, ScanState::Finished) {
                return None;
            }

            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    return match std::mem::replace(&mut self.state, ScanState::Finished) {
                        ScanState::ExpectingLocationLine {
                            header,
                            header_line,
                        } => Some(Err(Self::end_of_input(header, header_line))),
                        _ => None,
                    };
                }
                Err(source) => {
                    self.state = ScanState::Finished;
                    return Some(Err(RecordError::Read {
                        line: self.line_number + 1,
                        source,
                    }));
                }
            };

            match std::mem::replace(&mut self.state, ScanState::ScanningForHeader) {
                ScanState::ScanningForHeader => {
                    if is_header_line(&line) {
                        self.state = ScanState::ExpectingLocationLine {
                            header: RawRecordHeader::parse(
                                &line,
                                self.line_number,
                                self.date_storage,
                            ),
                            header_line: self.line_number,
                        };
                    }
                }
                ScanState::ExpectingLocationLine { header, .. } => {
                    return Some(Self::complete_record(header, &line, self.line_number));
                }
                ScanState::Finished => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordErrorKind;
    use std::io::{self, BufReader, Read};

    fn extract(log: &str) -> Vec<Result<Observation, RecordError>> {
        RecordExtractor::new(log.as_bytes()).collect()
    }

    fn kinds(results: &[Result<Observation, RecordError>]) -> Vec<Option<RecordErrorKind>> {
        results
            .iter()
            .map(|r| r.as_ref().err().map(RecordError::kind))
            .collect()
    }

    #[test]
    fn test_well_formed_record() {
        let results = extract(
            "123 Date : 01.02.97 12:00:00 LC : 2 IQ : 00\n\
             Lat1 : 45.00N Lon1 : 67.00W Lat2 : 40.00N Lon2 : 60.00W\n",
        );

        assert_eq!(results.len(), 1);
        let obs = results[0].as_ref().unwrap();
        assert_eq!(obs.tag_id, 123);
        assert_eq!(obs.location_class, "2");
        assert_eq!(obs.timestamp, "01/02/97 12:00:00");
        assert_eq!(obs.latitude, 45.0);
        assert_eq!(obs.longitude, -67.0);
    }

    #[test]
    fn test_skips_lines_between_records() {
        let log = "ARGOS transmission log\n\
                   \n\
                   1 Date : 01.02.97 12:00:00 LC : 2\n\
                   Lat1 : 10.0N Lon1 : 20.0E\n\
                   some sensor payload 01 02 03\n\
                   \n\
                   2 Date : 02.02.97 13:00:00 LC : A\n\
                   Lat1 : 10.5S Lon1 : 20.5W\n\
                   trailer\n";

        let observations: Vec<Observation> =
            extract(log).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].tag_id, 2);
        assert_eq!(observations[1].location_class, "A");
        assert_eq!(observations[1].latitude, -10.5);
        assert_eq!(observations[1].longitude, -20.5);
    }

    #[test]
    fn test_header_at_end_of_file() {
        let results = extract("123 Date : 01.02.97 12:00:00 LC : 2\n");
        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(RecordError::MissingLocationLine { line, .. }) => assert_eq!(*line, 1),
            other => panic!("Expected MissingLocationLine, got {:?}", other),
        }
    }

    #[test]
    fn test_header_without_trailing_newline_at_end_of_file() {
        let results = extract("junk\n123 Date : 01.02.97 12:00:00 LC : 2");
        assert_eq!(
            kinds(&results),
            vec![Some(RecordErrorKind::MissingLocationLine)]
        );
    }

    #[test]
    fn test_malformed_header_consumes_its_location_line() {
        let log = "123 Date : 01.02.97\n\
                   Lat1 : 45.00N Lon1 : 67.00W\n\
                   124 Date : 01.02.97 12:00:00 LC : 1\n\
                   Lat1 : 46.00N Lon1 : 68.00W\n";

        let results = extract(log);
        assert_eq!(
            kinds(&results),
            vec![Some(RecordErrorKind::MalformedHeader), None]
        );
        assert_eq!(results[1].as_ref().unwrap().tag_id, 124);
    }

    #[test]
    fn test_malformed_header_at_end_of_file_is_one_error() {
        let results = extract("abc Date : 01.02.97 12:00:00 LC : 1\n");
        assert_eq!(kinds(&results), vec![Some(RecordErrorKind::MalformedHeader)]);
    }

    #[test]
    fn test_short_location_line() {
        let log = "123 Date : 01.02.97 12:00:00 LC : 2\n\
                   Lat1 : 45.00N\n\
                   124 Date : 01.02.97 12:00:00 LC : 1\n\
                   Lat1 : 46.00N Lon1 : 68.00W\n";

        let results = extract(log);
        assert_eq!(
            kinds(&results),
            vec![Some(RecordErrorKind::MissingLocationLine), None]
        );
        assert_eq!(results[0].as_ref().unwrap_err().line(), 2);
    }

    #[test]
    fn test_header_followed_by_header_consumes_both() {
        let log = "1 Date : 01.02.97 12:00:00 LC : 2\n\
                   2 Date : 01.02.97 12:10:00 LC : 2\n\
                   Lat1 : 46.00N Lon1 : 68.00W\n";

        let results = extract(log);
        assert_eq!(
            kinds(&results),
            vec![Some(RecordErrorKind::MissingLocationLine)]
        );
    }

    #[test]
    fn test_malformed_coordinate_then_recovery() {
        let log = "1 Date : 01.02.97 12:00:00 LC : 2\n\
                   Lat1 : ?????? Lon1 : 68.00W\n\
                   2 Date : 01.02.97 12:10:00 LC : B\n\
                   Lat1 : 46.00N Lon1 : 68.00W\n";

        let results = extract(log);
        assert_eq!(
            kinds(&results),
            vec![Some(RecordErrorKind::MalformedCoordinate), None]
        );
    }

    #[test]
    fn test_non_utf8_bytes_are_tolerated() {
        let mut bytes = b"\xff\xfe garbage\n".to_vec();
        bytes.extend_from_slice(b"1 Date : 01.02.97 12:00:00 LC : 2\nLat1 : 1.0N Lon1 : 2.0E\n");

        let results: Vec<_> = RecordExtractor::new(bytes.as_slice()).collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
    }

    #[test]
    fn test_crlf_line_endings() {
        let results = extract("1 Date : 01.02.97 12:00:00 LC : 2\r\nLat1 : 1.0N Lon1 : 2.0E\r\n");
        let obs = results[0].as_ref().unwrap();
        assert_eq!(obs.location_class, "2");
        assert_eq!(obs.longitude, 2.0);
    }

    #[test]
    fn test_typed_date_storage() {
        let log = "1 Date : 31.12.99 23:59:59 LC : 2\nLat1 : 1.0N Lon1 : 2.0E\n\
                   2 Date : 32.12.99 23:59:59 LC : 2\nLat1 : 1.0N Lon1 : 2.0E\n";

        let results: Vec<_> = RecordExtractor::new(log.as_bytes())
            .with_date_storage(DateStorage::TypedDate)
            .collect();

        assert!(results[0].as_ref().unwrap().recorded_at.is_some());
        assert_eq!(
            results[1].as_ref().unwrap_err().kind(),
            RecordErrorKind::MalformedHeader
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract("").is_empty());
        assert!(extract("\n\n\n").is_empty());
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("device unplugged"));
            }
            self.served = true;
            let data = b"1 Date : 01.02.97 12:00:00 LC : 2\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn test_read_failure_ends_extraction() {
        let reader = BufReader::new(FailingReader { served: false });
        let mut extractor = RecordExtractor::new(reader);

        let err = extractor.next().unwrap().unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.line(), 2);
        assert!(extractor.next().is_none());
    }
}
