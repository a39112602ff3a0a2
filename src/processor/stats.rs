//! Per-file and per-run import statistics
//!
//! `total_count` only counts valid records, which is what the historical
//! skipped-record report divided by. [`ErrorRatePolicy`] selects between that
//! ratio and the corrected one; both return `None` rather than divide by zero.

use crate::config::ErrorRatePolicy;
use crate::error::RecordErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Record counters for one input file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileStats {
    /// Records that were skipped
    pub error_count: usize,

    /// Records that produced an observation
    pub total_count: usize,

    /// Skipped records by category
    pub errors_by_kind: BTreeMap<RecordErrorKind, usize>,
}

impl FileStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.total_count += 1;
    }

    pub fn record_error(&mut self, kind: RecordErrorKind) {
        self.error_count += 1;
        *self.errors_by_kind.entry(kind).or_insert(0) += 1;
    }

    /// Records attempted, valid or not
    pub fn attempted(&self) -> usize {
        self.error_count + self.total_count
    }

    pub fn errors_of(&self, kind: RecordErrorKind) -> usize {
        self.errors_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Skipped-record percentage, `None` when the denominator is zero
    pub fn error_rate(&self, policy: ErrorRatePolicy) -> Option<f64> {
        let denominator = match policy {
            ErrorRatePolicy::Legacy => self.total_count,
            ErrorRatePolicy::Corrected => self.attempted(),
        };

        if denominator == 0 {
            None
        } else {
            Some(self.error_count as f64 / denominator as f64 * 100.0)
        }
    }

    /// `"<n> records were skipped: <rate>%"`
    pub fn skipped_message(&self, policy: ErrorRatePolicy) -> String {
        match self.error_rate(policy) {
            Some(rate) => format!("{} records were skipped: {:.2}%", self.error_count, rate),
            None => format!(
                "{} records were skipped: no valid records",
                self.error_count
            ),
        }
    }
}

/// Outcome of one processed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: FileStats,
    pub lines_read: usize,
}

/// A file that could not be opened or read to the end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a whole import run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Files read to completion
    pub files: Vec<FileReport>,

    /// Directory entries that were not opened
    pub files_skipped: Vec<PathBuf>,

    /// Files abandoned on open or read failure
    pub files_failed: Vec<FailedFile>,

    /// Observations accepted by the sink
    pub observations_written: usize,

    /// Wall-clock duration of the run
    pub processing_time_ms: u128,
}

impl ImportSummary {
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    pub fn total_valid(&self) -> usize {
        self.files.iter().map(|f| f.stats.total_count).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.files.iter().map(|f| f.stats.error_count).sum()
    }

    /// Counters summed over every processed file
    pub fn combined_stats(&self) -> FileStats {
        let mut combined = FileStats::new();
        for report in &self.files {
            combined.total_count += report.stats.total_count;
            combined.error_count += report.stats.error_count;
            for (kind, count) in &report.stats.errors_by_kind {
                *combined.errors_by_kind.entry(*kind).or_insert(0) += count;
            }
        }
        combined
    }

    pub fn report_for(&self, file_name: &str) -> Option<&FileReport> {
        self.files
            .iter()
            .find(|r| r.path.file_name().is_some_and(|n| n == file_name))
    }
}
