//! In-memory point sink.

use super::PointSink;
use crate::error::{ImportError, Result};
use crate::models::Observation;

/// Collects observations in insertion order
#[derive(Debug, Default)]
pub struct MemorySink {
    observations: Vec<Observation>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl PointSink for MemorySink {
    fn insert(&mut self, observation: &Observation) -> Result<()> {
        if self.finished {
            return Err(ImportError::Sink {
                reason: "insert after finish".to_string(),
            });
        }
        self.observations.push(observation.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<usize> {
        self.finished = true;
        Ok(self.observations.len())
    }
}
