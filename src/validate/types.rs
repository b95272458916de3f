//! Public types for measurement validation.

use serde::{Deserialize, Serialize};

use crate::domain::LinearFeature;
use crate::geometry::Point;

/// A single planar roof surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
  pub id: String,
  pub polygon: Vec<Point>,
  pub area: f64,
  pub plan_area: f64,
  #[serde(default)]
  pub requires_review: bool,
}

/// Pipeline-reported totals, compared against the facets' own sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
  pub total_sqft: f64,
}

/// Linear features grouped by roof-edge category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
  #[serde(default)]
  pub ridges: Vec<LinearFeature>,
  #[serde(default)]
  pub hips: Vec<LinearFeature>,
  #[serde(default)]
  pub valleys: Vec<LinearFeature>,
  #[serde(default)]
  pub eaves: Vec<LinearFeature>,
  #[serde(default)]
  pub rakes: Vec<LinearFeature>,
}

impl Edges {
  fn all(&self) -> impl Iterator<Item = &LinearFeature> {
    self
      .ridges
      .iter()
      .chain(self.hips.iter())
      .chain(self.valleys.iter())
      .chain(self.eaves.iter())
      .chain(self.rakes.iter())
  }

  /// Edges whose [`FeatureKind`] participates in connectivity/topology
  /// checks, regardless of which named vec they were grouped under.
  pub(crate) fn interior(&self) -> impl Iterator<Item = &LinearFeature> {
    self.all().filter(|f| f.kind.is_interior())
  }

  pub(crate) fn perimeter(&self) -> impl Iterator<Item = &LinearFeature> {
    self.all().filter(|f| !f.kind.is_interior())
  }
}

/// The complete measurement to validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBundle {
  pub footprint: Vec<Point>,
  pub facets: Vec<Facet>,
  pub edges: Edges,
  pub totals: Totals,
  pub reference_area_sqft: Option<f64>,
}

/// Outcome of [`crate::validate::validate_measurements`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
  pub area_match: bool,
  pub area_error_percent: f64,
  pub area_vs_reference_match: Option<bool>,
  pub area_vs_reference_error_percent: Option<f64>,
  pub perimeter_match: bool,
  pub perimeter_error_percent: f64,
  pub connectivity_valid: bool,
  pub disconnected_count: usize,
  pub facets_closed: bool,
  pub topology_valid: bool,
  pub review_flagged_count: usize,
  pub score: f64,
  pub issues: Vec<String>,
  pub warnings: Vec<String>,
  pub critical_issues: Vec<String>,
  pub manual_review_recommended: bool,
}
