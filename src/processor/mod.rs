//! Batch import driver.
//!
//! Orchestrates an import run: input discovery, record extraction for each
//! file in turn, forwarding observations to the point sink, and the per-file
//! skipped-record report. Files are processed strictly one after another and
//! each file gets fresh counters.

pub mod discovery;
pub mod stats;

#[cfg(test)]
mod tests;

pub use discovery::{DiscoveredFiles, discover_input_files};
pub use stats::{FailedFile, FileReport, FileStats, ImportSummary};

use crate::config::{ImportConfig, RecordErrorReporting};
use crate::error::{ImportError, Result};
use crate::extractor::RecordExtractor;
use crate::sink::PointSink;

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives an import run for one configuration
#[derive(Debug)]
pub struct ArgosImporter {
    config: ImportConfig,
}

impl ArgosImporter {
    /// Create an importer, validating the configuration
    pub fn new(config: ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import every input file into `sink`, then finish the sink.
    ///
    /// Open and read failures abandon the affected file and processing
    /// continues; sink failures abort the run.
    pub fn run(&self, sink: &mut dyn PointSink) -> Result<ImportSummary> {
        let start_time = Instant::now();
        let discovered = discover_input_files(&self.config)?;

        let mut summary = ImportSummary {
            files_skipped: discovered.skipped,
            ..ImportSummary::default()
        };

        let progress_bar = self.create_progress_bar(discovered.files.len());

        for path in &discovered.files {
            progress_bar.set_message(display_name(path));

            match self.process_file(path, sink) {
                Ok(report) => {
                    self.report_file(&report);
                    summary.files.push(report);
                }
                Err(err @ ImportError::Sink { .. }) => {
                    progress_bar.abandon();
                    return Err(err);
                }
                Err(err) => {
                    error!("{}", err);
                    summary.files_failed.push(FailedFile {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        summary.observations_written = sink.finish()?;
        summary.processing_time_ms = start_time.elapsed().as_millis();

        debug!(
            "Import finished: {} files, {} failed, {} observations in {}ms",
            summary.files_processed(),
            summary.files_failed.len(),
            summary.observations_written,
            summary.processing_time_ms
        );

        Ok(summary)
    }

    /// Extract one file into the sink.
    ///
    /// The reader is owned by this call and closed when it returns,
    /// whichever way record processing ended.
    pub fn process_file(&self, path: &Path, sink: &mut dyn PointSink) -> Result<FileReport> {
        info!("Processing {}", display_name(path));

        let file = File::open(path).map_err(|source| ImportError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        self.process_reader(path, BufReader::new(file), sink)
    }

    /// Extract the records of one log read from `reader`.
    ///
    /// Observations are held back until the whole file has been read, so a
    /// read failure leaves nothing from this file in the sink.
    pub fn process_reader<R: BufRead>(
        &self,
        path: &Path,
        reader: R,
        sink: &mut dyn PointSink,
    ) -> Result<FileReport> {
        let mut extractor =
            RecordExtractor::new(reader).with_date_storage(self.config.date_storage);
        let mut stats = FileStats::new();
        let mut observations = Vec::new();

        for outcome in extractor.by_ref() {
            match outcome {
                Ok(observation) => {
                    observations.push(observation);
                    stats.record_success();
                }
                Err(record_error) if record_error.is_fatal() => {
                    return Err(ImportError::FileRead {
                        path: path.to_path_buf(),
                        source: record_error,
                    });
                }
                Err(record_error) => {
                    match self.config.record_error_reporting {
                        RecordErrorReporting::PerRecord => {
                            warn!("Error adding record: {}", record_error)
                        }
                        RecordErrorReporting::Aggregate => {
                            debug!("{}: {}", display_name(path), record_error)
                        }
                    }
                    stats.record_error(record_error.kind());
                }
            }
        }

        for observation in &observations {
            sink.insert(observation)?;
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            stats,
            lines_read: extractor.lines_read(),
        })
    }

    fn report_file(&self, report: &FileReport) {
        warn!(
            "{}: {}",
            display_name(&report.path),
            report.stats.skipped_message(self.config.error_rate_policy)
        );
    }

    fn create_progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress_bar.set_style(style);
        progress_bar
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
