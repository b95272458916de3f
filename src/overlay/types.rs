//! Public types for overlay evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::FeatureKind;
use crate::geometry::Point;

/// Deviation of a single AI-generated feature from its best-matching user
/// trace (or the absence of one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationRecord {
  pub feature_id: String,
  pub kind: FeatureKind,
  pub deviation_ft: f64,
  /// `avg_deviation_ft * 1.5`. Heuristic, not a true maximum deviation.
  pub max_deviation_ft: f64,
  pub alignment_score: f64,
  pub matched_trace_index: Option<usize>,
  pub needs_correction: bool,
}

/// Count mismatch between user traces and AI features for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountDelta {
  pub kind: FeatureKind,
  pub delta: usize,
}

/// A proposed geometry replacement for one AI feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
  pub feature_id: String,
  pub geometry: Vec<Point>,
}

/// Outcome of [`crate::overlay::evaluate_overlay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
  pub overall_score: f64,
  pub deviations: Vec<DeviationRecord>,
  pub missing: Vec<CountDelta>,
  pub extra: Vec<CountDelta>,
  pub recommendations: Vec<String>,
  pub corrections: Vec<Correction>,
}
