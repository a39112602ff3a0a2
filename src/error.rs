//! Error handling for ARGOS import operations.
//!
//! Errors are layered: [`CoordinateError`] for a single hemisphere token,
//! [`RecordError`] for one header/location pair, and [`ImportError`] for
//! file, sink and configuration failures that stop a file or the whole run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::coordinate::Axis;

/// Failure to turn a hemisphere-suffixed token into signed degrees
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("empty coordinate token")]
    Empty,

    #[error("coordinate '{token}' has no N/S/E/W hemisphere suffix")]
    MissingHemisphere { token: String },

    #[error("coordinate '{token}' has a non-numeric magnitude")]
    InvalidMagnitude { token: String },

    #[error("coordinate '{token}' is not a {axis} value")]
    WrongAxis { token: String, axis: Axis },

    #[error("coordinate '{token}' = {value} is outside +/-{limit}")]
    OutOfRange {
        token: String,
        value: f64,
        limit: f64,
    },
}

/// Record-level categories reported in per-file statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordErrorKind {
    MalformedHeader,
    MissingLocationLine,
    MalformedCoordinate,
    Read,
}

/// Failure to extract one observation from a header/location pair
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("line {line}: malformed header - {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("line {line}: missing location line - {reason}")]
    MissingLocationLine { line: usize, reason: String },

    #[error("line {line}: malformed coordinate - {source}")]
    MalformedCoordinate {
        line: usize,
        #[source]
        source: CoordinateError,
    },

    #[error("line {line}: read failed - {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl RecordError {
    pub fn kind(&self) -> RecordErrorKind {
        match self {
            RecordError::MalformedHeader { .. } => RecordErrorKind::MalformedHeader,
            RecordError::MissingLocationLine { .. } => RecordErrorKind::MissingLocationLine,
            RecordError::MalformedCoordinate { .. } => RecordErrorKind::MalformedCoordinate,
            RecordError::Read { .. } => RecordErrorKind::Read,
        }
    }

    /// Line number (1-based) the error was detected on
    pub fn line(&self) -> usize {
        match self {
            RecordError::MalformedHeader { line, .. }
            | RecordError::MissingLocationLine { line, .. }
            | RecordError::MalformedCoordinate { line, .. }
            | RecordError::Read { line, .. } => *line,
        }
    }

    /// A read failure ends the file; every other error only skips the record
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecordError::Read { .. })
    }
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to open input file: {path} - {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input file: {path} - {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("Failed to list input directory: {path} - {source}")]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Point sink error: {reason}")]
    Sink { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;
