//! Evidence and result types for ridge calibration.

use serde::{Deserialize, Serialize};

use crate::domain::FeatureSource;
use crate::geometry::Point;

/// Elevation profile sampled from the DSM scan line a ridge was detected
/// on. Only the DSM source populates this; every other source leaves it
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationProfile {
  pub start: Point,
  pub end: Point,
  pub max_along: f64,
}

/// A straight ridge segment produced by one evidence source, before
/// clipping to the footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawRidge {
  pub start: Point,
  pub end: Point,
  pub confidence: f64,
  pub elevation_profile: Option<ElevationProfile>,
}

/// A ridge line surviving footprint clipping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ridge {
  pub start: Point,
  pub end: Point,
  pub source: FeatureSource,
  pub confidence: f64,
  pub elevation_profile: Option<ElevationProfile>,
}

/// Elevation grid with geographic bounds, used by the DSM ridge source.
#[derive(Debug, Clone, PartialEq)]
pub struct DsmGrid {
  /// `heights[row][col]`, row 0 at `bounds` max latitude.
  pub heights: Vec<Vec<f64>>,
  pub bounds: GridBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
  pub min_lng: f64,
  pub min_lat: f64,
  pub max_lng: f64,
  pub max_lat: f64,
}

impl DsmGrid {
  pub fn height(&self) -> usize {
    self.heights.len()
  }

  pub fn width(&self) -> usize {
    self.heights.first().map_or(0, Vec::len)
  }
}

/// A solar-panel-derived roof segment with its downslope compass bearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSegment {
  pub center: Point,
  pub azimuth_degrees: f64,
}

/// An AI-vision-proposed ridge candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct AiVisionRidge {
  pub geometry: Vec<Point>,
  pub confidence: Option<f64>,
}

/// Marker evidence requesting the straight-skeleton geometric fallback.
/// Carries no data: unlike the other sources, this one derives candidate
/// ridges purely from the footprint's own shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkeletonEvidence;

/// The evidence bundle considered by [`crate::ridge::calibrate_ridges`].
///
/// Sources are tried in the field order below; only the highest-priority
/// source yielding at least one clipped ridge is used.
#[derive(Debug, Clone, Default)]
pub struct Evidence {
  pub manual_traces: Option<Vec<(Point, Point)>>,
  pub dsm: Option<DsmGrid>,
  pub solar_segments: Option<Vec<SolarSegment>>,
  pub ai_vision: Option<Vec<AiVisionRidge>>,
  pub skeleton: Option<SkeletonEvidence>,
}

/// Which evidence source produced the calibration result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RidgeMethod {
  ManualOverride,
  DsmPeaks,
  SolarSegments,
  AiVision,
  SkeletonGeometric,
  None,
}

impl std::fmt::Display for RidgeMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let label = match self {
      RidgeMethod::ManualOverride => "manual_override",
      RidgeMethod::DsmPeaks => "dsm_peaks",
      RidgeMethod::SolarSegments => "solar_segments",
      RidgeMethod::AiVision => "ai_vision",
      RidgeMethod::SkeletonGeometric => "skeleton_geometric",
      RidgeMethod::None => "none",
    };
    f.write_str(label)
  }
}

/// Result of [`crate::ridge::calibrate_ridges`].
///
/// Invariant: `method == RidgeMethod::None` iff `ridge_lines` is empty iff
/// `quality_score == 0.0`. Otherwise every ridge in `ridge_lines` shares the
/// same `source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeCalibrationResult {
  pub ridge_lines: Vec<Ridge>,
  pub primary_direction: (f64, f64),
  pub method: RidgeMethod,
  pub quality_score: f64,
}
