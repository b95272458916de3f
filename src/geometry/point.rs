//! Validated geographic points.
//!
//! [`Point`] construction is this crate's one fallible geometry boundary;
//! every other primitive in [`crate::geometry`] takes already-validated
//! points and cannot fail on them.

use serde::{Deserialize, Serialize};

use crate::error::GeomError;

/// A `(lng, lat)` pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub lng: f64,
  pub lat: f64,
}

impl Point {
  /// Construct a validated point.
  ///
  /// # Errors
  /// - [`GeomError::InvalidLongitude`] when `lng` is non-finite or outside
  ///   `[-180, 180]`.
  /// - [`GeomError::InvalidLatitude`] when `lat` is non-finite or outside
  ///   `[-90, 90]`.
  pub fn new(lng: f64, lat: f64) -> Result<Self, GeomError> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
      return Err(GeomError::InvalidLongitude(lng));
    }
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
      return Err(GeomError::InvalidLatitude(lat));
    }
    Ok(Self { lng, lat })
  }

  /// Construct a point without validating it.
  ///
  /// Used internally once callers have already proven a coordinate pair is
  /// in range (for example, midpoints of two already-validated points).
  pub(crate) const fn new_unchecked(lng: f64, lat: f64) -> Self {
    Self { lng, lat }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_equator_origin() {
    let p = Point::new(0.0, 0.0).unwrap();
    assert_eq!(p.lng, 0.0);
    assert_eq!(p.lat, 0.0);
  }

  #[test]
  fn rejects_longitude_out_of_range() {
    let result = Point::new(200.0, 0.0);
    assert_eq!(result, Err(GeomError::InvalidLongitude(200.0)));
  }

  #[test]
  fn rejects_non_finite_latitude() {
    let result = Point::new(0.0, f64::NAN);
    assert!(matches!(result, Err(GeomError::InvalidLatitude(lat)) if lat.is_nan()));
  }

  #[test]
  fn accepts_poles_and_antimeridian() {
    assert!(Point::new(180.0, 90.0).is_ok());
    assert!(Point::new(-180.0, -90.0).is_ok());
  }
}
