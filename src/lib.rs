//! ARGOS Importer Library
//!
//! Converts ARGOS satellite-tracking transmission logs into point
//! observations suitable for geospatial storage.
//!
//! This library provides tools for:
//! - Normalizing hemisphere-suffixed coordinates into signed degrees
//! - Extracting header/location record pairs from transmission logs,
//!   skipping malformed records without losing the rest of the file
//! - Importing a directory (or a single file) of logs with per-file
//!   skipped-record reporting
//! - Writing observations to Parquet in a chosen spatial reference

pub mod cli;
pub mod config;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod extractor;
pub mod models;
pub mod processor;
pub mod sink;
pub mod spatial;

// Re-export commonly used types
pub use config::{DateStorage, ErrorRatePolicy, ImportConfig, SourceMode};
pub use coordinate::normalize;
pub use error::{CoordinateError, ImportError, RecordError, RecordErrorKind, Result};
pub use extractor::RecordExtractor;
pub use models::Observation;
pub use processor::{ArgosImporter, FileStats, ImportSummary};
pub use sink::{MemorySink, ParquetSink, PointSink};
pub use spatial::SpatialReference;
