//! Point sinks
//!
//! A sink receives every valid observation from the batch driver and
//! persists it. The driver is the only writer, so sinks take `&mut self`
//! and need no locking.

pub mod memory;
pub mod parquet;

pub use memory::MemorySink;
pub use parquet::ParquetSink;

use crate::error::Result;
use crate::models::Observation;

/// Destination for normalized observations
pub trait PointSink {
    /// Store one observation
    fn insert(&mut self, observation: &Observation) -> Result<()>;

    /// Flush buffered observations and return how many were stored.
    /// Inserting after `finish` is an error.
    fn finish(&mut self) -> Result<usize>;
}
