//! Application constants for the ARGOS importer
//!
//! Format markers, reserved file names, and output column names shared by
//! the extractor, the batch driver and the point sinks.

// =============================================================================
// ARGOS Transmission Log Format
// =============================================================================

/// Literal that marks a record header line
pub const HEADER_MARKER: &str = "Date :";

/// Date format of the header `date` token (`DD.MM.YY`)
pub const HEADER_DATE_FORMAT: &str = "%d.%m.%y";

/// Time format of the header `time` token (`HH:MM:SS`)
pub const HEADER_TIME_FORMAT: &str = "%H:%M:%S";

/// Separator used by header dates, replaced in the text timestamp
pub const HEADER_DATE_SEPARATOR: char = '.';

/// Separator used in the stored text timestamp
pub const TIMESTAMP_DATE_SEPARATOR: &str = "/";

// =============================================================================
// Input Discovery
// =============================================================================

/// File that accompanies ARGOS deliveries and never holds records
pub const DEFAULT_SKIP_FILE_NAME: &str = "README.txt";

// =============================================================================
// Output Columns
// =============================================================================

/// Column names written by point sinks
pub mod columns {
    pub const TAG_ID: &str = "TagID";
    pub const LOCATION_CLASS: &str = "LC";
    pub const DATE: &str = "Date";
    pub const X: &str = "X";
    pub const Y: &str = "Y";
    pub const SHAPE: &str = "Shape";
    pub const SRID: &str = "SRID";
}
