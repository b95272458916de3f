//! Public types for footprint selection.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Options controlling a tile-service footprint query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintSelectorOptions {
  pub radius_m: f64,
  pub tileset_id: String,
}

impl Default for FootprintSelectorOptions {
  fn default() -> Self {
    Self {
      radius_m: 30.0,
      tileset_id: "mapbox.mapbox-streets-v8".to_string(),
    }
  }
}

/// A building footprint candidate extracted from a tile-query response.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintCandidate {
  pub ring: Vec<Point>,
  pub distance_m: f64,
  pub contains_point: bool,
  pub area_m2: f64,
  pub building_id: Option<String>,
}

/// Why the selector could not return a chosen footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
  ApiError,
  NoBuildingsFound,
  NoPolygonBuildings,
  FetchError,
}

/// A successfully chosen footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFootprint {
  pub coordinates: Vec<Point>,
  pub confidence: f64,
  pub building_id: Option<String>,
  pub area_m2: f64,
}

/// Structured failure returned instead of a footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintFailure {
  pub error_message: Option<String>,
  pub fallback_reason: FallbackReason,
}

/// Outcome of [`crate::footprint::select_footprint`]. Never a panic, never a
/// thrown error: failures are a variant, not an exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FootprintResult {
  Found(SelectedFootprint),
  NotFound(FootprintFailure),
}

/// Which footprint [`crate::footprint::pick_best_footprint`] chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootprintPickSource {
  Candidate,
  Existing,
}

/// Result of [`crate::footprint::pick_best_footprint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedFootprint {
  pub coordinates: Vec<Point>,
  pub source: FootprintPickSource,
  pub confidence: f64,
}
