//! Configuration management and validation.
//!
//! A single [`ImportConfig`] drives the importer in both of its modes:
//! a directory of ARGOS logs, or one log file with per-record error lines.

use crate::constants::DEFAULT_SKIP_FILE_NAME;
use crate::error::{ImportError, Result};
use crate::spatial::SpatialReference;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Where input records come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceMode {
    /// Every entry of a directory, except the skip file
    Directory,
    /// One named log file
    SingleFile,
}

/// How the observation `Date` attribute is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateStorage {
    /// `DD/MM/YY HH:MM:SS` text, passed through without validation
    #[default]
    Text,
    /// Parsed date-time; unparseable dates make the record malformed
    TypedDate,
}

/// Denominator used when reporting a file's skipped-record percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorRatePolicy {
    /// `errors / valid` - the historical report, which excludes errors
    /// from the denominator
    Legacy,
    /// `errors / (errors + valid)`
    #[default]
    Corrected,
}

/// How individual record errors are surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordErrorReporting {
    /// Only the per-file summary is reported
    Aggregate,
    /// One warning per skipped record, plus the summary
    PerRecord,
}

impl SourceMode {
    /// Reporting style each mode uses unless overridden
    pub fn default_reporting(&self) -> RecordErrorReporting {
        match self {
            SourceMode::Directory => RecordErrorReporting::Aggregate,
            SourceMode::SingleFile => RecordErrorReporting::PerRecord,
        }
    }
}

/// Import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Input directory or file
    pub source: PathBuf,

    /// Interpretation of `source`
    pub source_mode: SourceMode,

    /// Output location handed to the point sink
    pub destination: PathBuf,

    /// Spatial reference the sink stores geometry in
    pub spatial_reference: SpatialReference,

    /// Storage type of the `Date` attribute
    pub date_storage: DateStorage,

    /// Error rate denominator
    pub error_rate_policy: ErrorRatePolicy,

    /// Per-record or aggregated error reporting
    pub record_error_reporting: RecordErrorReporting,

    /// Directory entry that is never opened
    pub skip_file_name: String,

    /// Show a progress bar while iterating files
    pub show_progress: bool,
}

impl ImportConfig {
    /// Configuration for importing every log in a directory
    pub fn directory(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::new(source.into(), destination.into(), SourceMode::Directory)
    }

    /// Configuration for importing a single log file
    pub fn single_file(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::new(source.into(), destination.into(), SourceMode::SingleFile)
    }

    fn new(source: PathBuf, destination: PathBuf, source_mode: SourceMode) -> Self {
        Self {
            source,
            source_mode,
            destination,
            spatial_reference: SpatialReference::WGS84,
            date_storage: DateStorage::default(),
            error_rate_policy: ErrorRatePolicy::default(),
            record_error_reporting: source_mode.default_reporting(),
            skip_file_name: DEFAULT_SKIP_FILE_NAME.to_string(),
            show_progress: false,
        }
    }

    /// Set the output spatial reference
    pub fn with_spatial_reference(mut self, spatial_reference: SpatialReference) -> Self {
        self.spatial_reference = spatial_reference;
        self
    }

    /// Set the date storage mode
    pub fn with_date_storage(mut self, date_storage: DateStorage) -> Self {
        self.date_storage = date_storage;
        self
    }

    /// Set the error rate policy
    pub fn with_error_rate_policy(mut self, policy: ErrorRatePolicy) -> Self {
        self.error_rate_policy = policy;
        self
    }

    /// Override the mode's default record error reporting
    pub fn with_record_error_reporting(mut self, reporting: RecordErrorReporting) -> Self {
        self.record_error_reporting = reporting;
        self
    }

    /// Change the name of the skipped directory entry
    pub fn with_skip_file_name(mut self, name: impl Into<String>) -> Self {
        self.skip_file_name = name.into();
        self
    }

    /// Enable the file progress bar
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Check the configuration against the filesystem before a run
    pub fn validate(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(ImportError::InputNotFound {
                path: self.source.clone(),
            });
        }

        match self.source_mode {
            SourceMode::Directory if !self.source.is_dir() => {
                return Err(ImportError::Configuration {
                    message: format!(
                        "directory mode requires a directory: {}",
                        self.source.display()
                    ),
                });
            }
            SourceMode::SingleFile if !self.source.is_file() => {
                return Err(ImportError::Configuration {
                    message: format!(
                        "single-file mode requires a file: {}",
                        self.source.display()
                    ),
                });
            }
            _ => {}
        }

        if self.destination.as_os_str().is_empty() {
            return Err(ImportError::Configuration {
                message: "destination path is empty".to_string(),
            });
        }

        if !self.spatial_reference.is_supported() {
            return Err(ImportError::Configuration {
                message: format!(
                    "unsupported output spatial reference {}",
                    self.spatial_reference
                ),
            });
        }

        debug!(
            "Validated config: {:?} {} -> {} ({})",
            self.source_mode,
            self.source.display(),
            self.destination.display(),
            self.spatial_reference
        );

        Ok(())
    }
}
