//! Integration tests for the processor module
//!
//! Tests complete import runs against temporary ARGOS log directories.


use std::fs;
use std::path::Path;

/// Two valid records with a metadata line and blank line between them
pub const TWO_RECORD_LOG: &str = "\
ARGOS PROGRAM 1234
 20616 Date : 03.07.97 18:08:43 LC : 3 IQ : 66
      Lat1 : 34.363N  Lon1 : 77.841W  Lat2 : 30.301N  Lon2 : 59.390W
      Alt : 0.00 km  Alt : 0.00 km  Freq : 401.651

 20616 Date : 04.07.97 09:51:23 LC : A IQ : 00
      Lat1 : 34.540N  Lon1 : 77.760W  Lat2 : 31.000N  Lon2 : 60.100W
";

/// One malformed record followed by one valid record
pub const ONE_BAD_ONE_GOOD_LOG: &str = "\
 20617 Date : 05.07.97 10:00:00 LC : 2 IQ : 00
      Lat1 : ???????  Lon1 : 77.000W  Lat2 : ???????  Lon2 : 60.000W
 20617 Date : 05.07.97 11:00:00 LC : 1 IQ : 00
      Lat1 : 35.000N  Lon1 : 76.000W  Lat2 : 36.000N  Lon2 : 61.000W
";

pub fn write_log(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}
