//! Input file discovery
//!
//! Lists the log files an import run will read. In directory mode every
//! direct entry of the input directory is a log file except the reserved
//! skip file (exact, case-sensitive name match), the output file of a
//! previous run, and sub-directories.
//! Entries are returned in file name order so reruns are deterministic.

use crate::config::{ImportConfig, SourceMode};
use crate::error::{ImportError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Files to process and entries deliberately left alone
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Resolve the input files named by `config`
pub fn discover_input_files(config: &ImportConfig) -> Result<DiscoveredFiles> {
    match config.source_mode {
        SourceMode::SingleFile => Ok(DiscoveredFiles {
            files: vec![config.source.clone()],
            skipped: Vec::new(),
        }),
        SourceMode::Directory => list_directory(
            &config.source,
            &config.skip_file_name,
            &config.destination,
        ),
    }
}

fn list_directory(
    dir: &Path,
    skip_file_name: &str,
    destination: &Path,
) -> Result<DiscoveredFiles> {
    if !dir.is_dir() {
        return Err(ImportError::InputNotFound {
            path: dir.to_path_buf(),
        });
    }

    debug!("Listing ARGOS files in: {}", dir.display());

    let mut discovered = DiscoveredFiles::default();
    let destination = destination.canonicalize().ok();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| ImportError::DirectoryListing {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_name() == skip_file_name {
            debug!("Skipping reserved file: {}", entry.path().display());
            discovered.skipped.push(entry.into_path());
            continue;
        }

        if destination.is_some() && entry.path().canonicalize().ok() == destination {
            debug!("Skipping output file: {}", entry.path().display());
            discovered.skipped.push(entry.into_path());
            continue;
        }

        if entry.file_type().is_dir() {
            debug!("Skipping sub-directory: {}", entry.path().display());
            discovered.skipped.push(entry.into_path());
            continue;
        }

        discovered.files.push(entry.into_path());
    }

    debug!(
        "Found {} ARGOS files ({} skipped)",
        discovered.files.len(),
        discovered.skipped.len()
    );

    Ok(discovered)
}
