//! Hemisphere-suffixed coordinate normalization.
//!
//! ARGOS location lines carry coordinates such as `45.123N` or `067.50W`.
//! These are converted to signed decimal degrees: southern and western
//! hemispheres are negative.

use crate::error::CoordinateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic axis a coordinate token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest absolute value allowed on this axis
    pub fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Hemisphere indicator carried as the last character of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    /// Sign applied to the magnitude
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// Split a token into its magnitude and hemisphere
fn split_token(token: &str) -> Result<(f64, Hemisphere), CoordinateError> {
    let token = token.trim();
    let last = token.chars().last().ok_or(CoordinateError::Empty)?;

    let hemisphere =
        Hemisphere::from_char(last).ok_or_else(|| CoordinateError::MissingHemisphere {
            token: token.to_string(),
        })?;

    let magnitude_str = &token[..token.len() - last.len_utf8()];
    let is_plain_decimal = magnitude_str
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.');
    let magnitude = Some(magnitude_str)
        .filter(|_| is_plain_decimal)
        .and_then(|m| m.parse::<f64>().ok())
        .filter(|m| m.is_finite())
        .ok_or_else(|| CoordinateError::InvalidMagnitude {
            token: token.to_string(),
        })?;

    Ok((magnitude, hemisphere))
}

/// Convert a hemisphere-suffixed token into signed decimal degrees.
///
/// `N`/`E` keep the magnitude positive, `S`/`W` negate it. The magnitude
/// must be a plain decimal number: digits and an optional point, no sign
/// or exponent.
pub fn normalize(token: &str) -> Result<f64, CoordinateError> {
    let (magnitude, hemisphere) = split_token(token)?;
    Ok(magnitude * hemisphere.sign())
}

/// Normalize a token that must belong to `axis` and lie within its range
pub fn normalize_axis(token: &str, axis: Axis) -> Result<f64, CoordinateError> {
    let (magnitude, hemisphere) = split_token(token)?;

    if hemisphere.axis() != axis {
        return Err(CoordinateError::WrongAxis {
            token: token.trim().to_string(),
            axis,
        });
    }

    let value = magnitude * hemisphere.sign();
    if value.abs() > axis.limit() {
        return Err(CoordinateError::OutOfRange {
            token: token.trim().to_string(),
            value,
            limit: axis.limit(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_signs() {
        assert_eq!(normalize("12.34N").unwrap(), 12.34);
        assert_eq!(normalize("12.34S").unwrap(), -12.34);
        assert_eq!(normalize("12.34E").unwrap(), 12.34);
        assert_eq!(normalize("12.34W").unwrap(), -12.34);
    }

    #[test]
    fn test_zero_padded_and_integer_magnitudes() {
        assert_eq!(normalize("067.500W").unwrap(), -67.5);
        assert_eq!(normalize("45N").unwrap(), 45.0);
        assert_eq!(normalize("0.000S").unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(normalize(""), Err(CoordinateError::Empty));
        assert_eq!(normalize("   "), Err(CoordinateError::Empty));
        assert!(matches!(
            normalize("abcN"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            normalize("N"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            normalize("12.34"),
            Err(CoordinateError::MissingHemisphere { .. })
        ));
        assert!(matches!(
            normalize("12.34n"),
            Err(CoordinateError::MissingHemisphere { .. })
        ));
    }

    #[test]
    fn test_rejects_signed_and_non_finite_magnitudes() {
        assert!(matches!(
            normalize("-12.34N"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            normalize("+12.34N"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            normalize("1e2N"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            normalize("infE"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            normalize("NaNS"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn test_axis_checks() {
        assert_eq!(normalize_axis("45.00N", Axis::Latitude).unwrap(), 45.0);
        assert_eq!(normalize_axis("67.00W", Axis::Longitude).unwrap(), -67.0);

        assert!(matches!(
            normalize_axis("45.00E", Axis::Latitude),
            Err(CoordinateError::WrongAxis { axis: Axis::Latitude, .. })
        ));
        assert!(matches!(
            normalize_axis("91.00S", Axis::Latitude),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert!(matches!(
            normalize_axis("180.01E", Axis::Longitude),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert_eq!(normalize_axis("180.00W", Axis::Longitude).unwrap(), -180.0);
    }
}
