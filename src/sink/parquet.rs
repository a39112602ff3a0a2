//! Parquet point sink.
//!
//! Buffers observations as columns and writes one Snappy-compressed Parquet
//! file on [`PointSink::finish`]. Geometry is projected into the configured
//! spatial reference and stored both as `X`/`Y` columns and as WKT.

use super::PointSink;
use crate::config::DateStorage;
use crate::constants::columns;
use crate::error::{ImportError, Result};
use crate::models::Observation;
use crate::spatial::SpatialReference;

use chrono::NaiveDateTime;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes observations to a Parquet file
#[derive(Debug)]
pub struct ParquetSink {
    output_path: PathBuf,
    spatial_reference: SpatialReference,
    date_storage: DateStorage,
    tag_ids: Vec<i32>,
    location_classes: Vec<String>,
    text_dates: Vec<String>,
    typed_dates: Vec<NaiveDateTime>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    shapes: Vec<String>,
    finished: bool,
}

impl ParquetSink {
    /// Create a sink writing to `output_path`
    pub fn new(
        output_path: impl Into<PathBuf>,
        spatial_reference: SpatialReference,
        date_storage: DateStorage,
    ) -> Result<Self> {
        if !spatial_reference.is_supported() {
            return Err(ImportError::Configuration {
                message: format!("unsupported output spatial reference {}", spatial_reference),
            });
        }

        Ok(Self {
            output_path: output_path.into(),
            spatial_reference,
            date_storage,
            tag_ids: Vec::new(),
            location_classes: Vec::new(),
            text_dates: Vec::new(),
            typed_dates: Vec::new(),
            xs: Vec::new(),
            ys: Vec::new(),
            shapes: Vec::new(),
            finished: false,
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Rows buffered and not yet written
    pub fn pending(&self) -> usize {
        self.tag_ids.len()
    }

    fn build_dataframe(&self) -> Result<DataFrame> {
        let date_column = match self.date_storage {
            DateStorage::Text => {
                Series::new(columns::DATE.into(), &self.text_dates).into_column()
            }
            DateStorage::TypedDate => DatetimeChunked::from_naive_datetime(
                columns::DATE.into(),
                self.typed_dates.iter().copied(),
                TimeUnit::Milliseconds,
            )
            .into_series()
            .into_column(),
        };

        let srids = vec![self.spatial_reference.epsg; self.tag_ids.len()];

        let df = DataFrame::new(vec![
            Series::new(columns::TAG_ID.into(), &self.tag_ids).into_column(),
            Series::new(columns::LOCATION_CLASS.into(), &self.location_classes).into_column(),
            date_column,
            Series::new(columns::X.into(), &self.xs).into_column(),
            Series::new(columns::Y.into(), &self.ys).into_column(),
            Series::new(columns::SHAPE.into(), &self.shapes).into_column(),
            Series::new(columns::SRID.into(), &srids).into_column(),
        ])?;

        Ok(df)
    }
}

impl PointSink for ParquetSink {
    fn insert(&mut self, observation: &Observation) -> Result<()> {
        if self.finished {
            return Err(ImportError::Sink {
                reason: format!(
                    "insert after {} was written",
                    self.output_path.display()
                ),
            });
        }

        let geometry = observation.geometry();
        let projected = self.spatial_reference.project(geometry.point)?;

        match self.date_storage {
            DateStorage::Text => self.text_dates.push(observation.timestamp.clone()),
            DateStorage::TypedDate => {
                let recorded_at = observation.recorded_at.ok_or_else(|| ImportError::Sink {
                    reason: format!(
                        "observation for tag {} has no parsed date",
                        observation.tag_id
                    ),
                })?;
                self.typed_dates.push(recorded_at);
            }
        }

        self.tag_ids.push(observation.tag_id);
        self.location_classes
            .push(observation.location_class.clone());
        self.xs.push(projected.x);
        self.ys.push(projected.y);
        self.shapes.push(projected.to_wkt());

        Ok(())
    }

    fn finish(&mut self) -> Result<usize> {
        if self.finished {
            return Ok(self.tag_ids.len());
        }

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut df = self.build_dataframe()?;
        debug!(
            "Writing {} rows to {} ({})",
            df.height(),
            self.output_path.display(),
            self.spatial_reference
        );

        let file = File::create(&self.output_path)?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)
            .map_err(|e| ImportError::Sink {
                reason: format!(
                    "failed to write {}: {}",
                    self.output_path.display(),
                    e
                ),
            })?;

        self.finished = true;
        info!(
            "Wrote {} observations to {}",
            df.height(),
            self.output_path.display()
        );

        Ok(df.height())
    }
}
