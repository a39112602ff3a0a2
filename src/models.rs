//! Core data structures for ARGOS processing.
//!
//! Defines the observation produced for every valid record pair and the
//! geometry it carries.

use crate::spatial::{Point, SpatialReference};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One valid ARGOS location fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Transmitter identifier
    pub tag_id: i32,

    /// Location class (fix quality code)
    pub location_class: String,

    /// `DD/MM/YY HH:MM:SS` timestamp text
    pub timestamp: String,

    /// Parsed timestamp, present when typed date storage is enabled
    pub recorded_at: Option<NaiveDateTime>,

    /// Signed decimal degrees, east positive
    pub longitude: f64,

    /// Signed decimal degrees, north positive
    pub latitude: f64,
}

/// Point with the spatial reference it is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub point: Point,
    pub spatial_reference: SpatialReference,
}

impl Observation {
    /// WGS84 geometry for this fix
    pub fn geometry(&self) -> PointGeometry {
        PointGeometry {
            point: Point::new(self.longitude, self.latitude),
            spatial_reference: SpatialReference::WGS84,
        }
    }
}
