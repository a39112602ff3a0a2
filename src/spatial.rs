//! Point geometry and spatial reference handling.
//!
//! Observations are always built in WGS84 (EPSG:4326). Sinks project them
//! into the configured output reference before storing.

use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean earth radius used by the spherical Mercator projection (metres)
const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Latitudes are clamped to this before spherical Mercator projection
const WEB_MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Planar point; `x` is longitude/easting, `y` is latitude/northing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Well-known-text representation, e.g. `POINT (-67 45)`
    pub fn to_wkt(&self) -> String {
        format!("POINT ({} {})", self.x, self.y)
    }
}

/// Spatial reference identified by its EPSG code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference {
    pub epsg: u32,
}

impl SpatialReference {
    pub const WGS84: SpatialReference = SpatialReference { epsg: 4326 };
    pub const WEB_MERCATOR: SpatialReference = SpatialReference { epsg: 3857 };

    /// Create a spatial reference, rejecting codes we cannot project into
    pub fn from_epsg(epsg: u32) -> Result<Self> {
        let sr = Self { epsg };
        if sr.is_supported() {
            Ok(sr)
        } else {
            Err(ImportError::Configuration {
                message: format!(
                    "unsupported spatial reference EPSG:{} (supported: 4326, 3857)",
                    epsg
                ),
            })
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self.epsg, 4326 | 3857)
    }

    /// Project a WGS84 point into this reference.
    ///
    /// Polar latitudes are clamped to the EPSG:3857 bounds.
    pub fn project(&self, point: Point) -> Result<Point> {
        match self.epsg {
            4326 => Ok(point),
            3857 => {
                let latitude = point
                    .y
                    .clamp(-WEB_MERCATOR_MAX_LATITUDE, WEB_MERCATOR_MAX_LATITUDE);
                let x = WEB_MERCATOR_RADIUS * point.x.to_radians();
                let y = WEB_MERCATOR_RADIUS
                    * (std::f64::consts::FRAC_PI_4 + latitude.to_radians() / 2.0)
                        .tan()
                        .ln();
                Ok(Point::new(x, y))
            }
            other => Err(ImportError::Configuration {
                message: format!("unsupported spatial reference EPSG:{}", other),
            }),
        }
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::WGS84
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}
