//! Command-line interface components.

use crate::config::{DateStorage, ErrorRatePolicy, ImportConfig, RecordErrorReporting};
use crate::constants::DEFAULT_SKIP_FILE_NAME;
use crate::error::Result;
use crate::spatial::SpatialReference;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "argos-import")]
#[command(about = "Convert ARGOS tracking transmission logs to point observations in Parquet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Folder of ARGOS logs (or a single log with --single-file)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output Parquet file (defaults to <INPUT>.parquet next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// EPSG code of the output spatial reference (4326 or 3857)
    #[arg(long, default_value_t = 4326)]
    pub srid: u32,

    /// Treat INPUT as one log file and report every skipped record
    #[arg(long)]
    pub single_file: bool,

    /// Store Date as a date-time instead of text
    #[arg(long)]
    pub typed_date: bool,

    /// Denominator of the skipped-record percentage
    #[arg(long, value_enum, default_value_t = RateArg::Corrected)]
    pub error_rate: RateArg,

    /// Report every skipped record, not just the per-file summary
    #[arg(long)]
    pub report_each_error: bool,

    /// Directory entry that is never read
    #[arg(long, default_value = DEFAULT_SKIP_FILE_NAME)]
    pub skip_name: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors; no progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Error rate denominators selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RateArg {
    /// skipped / valid
    Legacy,
    /// skipped / (skipped + valid)
    Corrected,
}

impl From<RateArg> for ErrorRatePolicy {
    fn from(arg: RateArg) -> Self {
        match arg {
            RateArg::Legacy => ErrorRatePolicy::Legacy,
            RateArg::Corrected => ErrorRatePolicy::Corrected,
        }
    }
}

impl Args {
    /// Get the output path, defaulting to `<input>.parquet` beside the input
    pub fn get_output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(&self.input),
        }
    }

    /// Log level for the tracing filter
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Build the import configuration these arguments describe
    pub fn to_config(&self) -> Result<ImportConfig> {
        let output = self.get_output_path();
        let config = if self.single_file {
            ImportConfig::single_file(&self.input, output)
        } else {
            ImportConfig::directory(&self.input, output)
        };

        let mut config = config
            .with_spatial_reference(SpatialReference::from_epsg(self.srid)?)
            .with_date_storage(if self.typed_date {
                DateStorage::TypedDate
            } else {
                DateStorage::Text
            })
            .with_error_rate_policy(self.error_rate.into())
            .with_skip_file_name(&self.skip_name);

        if self.report_each_error {
            config = config.with_record_error_reporting(RecordErrorReporting::PerRecord);
        }
        if !self.quiet {
            config = config.with_progress();
        }

        Ok(config)
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let stem = if stem.is_empty() {
        "argos".to_string()
    } else {
        stem
    };
    input
        .parent()
        .unwrap_or(input)
        .join(format!("{}.parquet", stem))
}
