//! Shared closed enumerations and entity types used across the calibration,
//! validation, and overlay-evaluation components.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, polyline_length_ft};

/// Category of a roof edge. Closed enumeration — never model this as an
/// open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
  Ridge,
  Hip,
  Valley,
  Eave,
  Rake,
}

impl FeatureKind {
  pub const ALL: [FeatureKind; 5] = [
    FeatureKind::Ridge,
    FeatureKind::Hip,
    FeatureKind::Valley,
    FeatureKind::Eave,
    FeatureKind::Rake,
  ];

  /// Interior edges participate in the connectivity and topology checks;
  /// eaves and rakes are perimeter edges. Drives [`crate::validate::types::Edges::interior`]
  /// and `::perimeter`.
  pub const fn is_interior(self) -> bool {
    matches!(self, FeatureKind::Ridge | FeatureKind::Hip | FeatureKind::Valley)
  }
}

/// Provenance of a linear feature. Closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSource {
  Manual,
  Dsm,
  SolarSegment,
  AiVision,
  Skeleton,
}

/// A validated linear roof feature.
///
/// Invariant: `length_ft` equals the geodesic-approx length of `geometry`
/// to within 1%; callers that build one directly should use
/// [`LinearFeature::new`] to get this for free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFeature {
  pub id: String,
  pub geometry: Vec<Point>,
  pub kind: FeatureKind,
  pub length_ft: f64,
  pub source: FeatureSource,
  pub confidence: f64,
}

impl LinearFeature {
  /// Construct a feature, deriving `length_ft` from `geometry`.
  pub fn new(id: impl Into<String>, geometry: Vec<Point>, kind: FeatureKind, source: FeatureSource, confidence: f64) -> Self {
    let length_ft = polyline_length_ft(&geometry);
    Self {
      id: id.into(),
      geometry,
      kind,
      length_ft,
      source,
      confidence,
    }
  }
}

/// A user-drawn trace, used as ground truth by the overlay evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrace {
  pub kind: FeatureKind,
  pub polyline: Vec<Point>,
  pub length_ft: f64,
}

impl UserTrace {
  pub fn new(kind: FeatureKind, polyline: Vec<Point>) -> Self {
    let length_ft = polyline_length_ft(&polyline);
    Self { kind, polyline, length_ft }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn linear_feature_derives_length_from_geometry() {
    let geometry = vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()];
    let feature = LinearFeature::new("f1", geometry.clone(), FeatureKind::Ridge, FeatureSource::Manual, 0.99);
    assert!((feature.length_ft - polyline_length_ft(&geometry)).abs() < 1e-9);
  }

  #[test]
  fn interior_kinds_are_ridge_hip_valley() {
    assert!(FeatureKind::Ridge.is_interior());
    assert!(FeatureKind::Hip.is_interior());
    assert!(FeatureKind::Valley.is_interior());
    assert!(!FeatureKind::Eave.is_interior());
    assert!(!FeatureKind::Rake.is_interior());
  }
}
