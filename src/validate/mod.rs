//! Measurement validation: independent checks combined additively into a
//! single quality score.

mod checks;
mod types;

pub use types::{Edges, Facet, MeasurementBundle, Totals, ValidationResult};

const STARTING_SCORE: f64 = 1.0;
const CRITICAL_REVIEW_SCORE_THRESHOLD: f64 = 0.7;
const CRITICAL_REVIEW_FLAGGED_COUNT: usize = 2;
const CRITICAL_KEYWORDS: [&str; 5] = ["exceeds", "not closed", "disconnected", "outside footprint", "crossing"];

/// Run every check against `bundle` and combine the results into a single
/// report. Never panics; malformed bundles surface as issues, not errors.
pub fn validate_measurements(bundle: &MeasurementBundle) -> ValidationResult {
  let area = checks::check_area_consistency(bundle);
  let facet_sum: f64 = bundle.facets.iter().map(|f| f.area).sum();
  let reference = checks::check_area_vs_reference(bundle, facet_sum);
  let perimeter = checks::check_perimeter_consistency(bundle);
  let connectivity = checks::check_segment_connectivity(bundle);
  let closure = checks::check_facet_closure(bundle);
  let topology = checks::check_topology(bundle);
  let review = checks::check_review_flags(bundle);

  let mut issues = Vec::new();
  let mut warnings = Vec::new();
  let mut score = STARTING_SCORE;

  for outcome in [
    area.outcome,
    reference.outcome,
    perimeter.outcome,
    connectivity.outcome,
    closure.outcome,
    topology.outcome,
    review.outcome,
  ] {
    score -= outcome.penalty;
    issues.extend(outcome.issues);
    warnings.extend(outcome.warnings);
  }

  score = score.clamp(0.0, 1.0);

  let critical_issues: Vec<String> = issues.iter().filter(|issue| is_critical(issue)).cloned().collect();
  let manual_review_recommended =
    !critical_issues.is_empty() || score < CRITICAL_REVIEW_SCORE_THRESHOLD || review.flagged_count > CRITICAL_REVIEW_FLAGGED_COUNT;

  ValidationResult {
    area_match: area.area_match,
    area_error_percent: area.error_percent,
    area_vs_reference_match: reference.matched,
    area_vs_reference_error_percent: reference.error_percent,
    perimeter_match: perimeter.perimeter_match,
    perimeter_error_percent: perimeter.error_percent,
    connectivity_valid: connectivity.connectivity_valid,
    disconnected_count: connectivity.disconnected_count,
    facets_closed: closure.facets_closed,
    topology_valid: topology.topology_valid,
    review_flagged_count: review.flagged_count,
    score,
    issues,
    warnings,
    critical_issues,
    manual_review_recommended,
  }
}

fn is_critical(issue: &str) -> bool {
  CRITICAL_KEYWORDS.iter().any(|keyword| issue.contains(keyword))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{FeatureKind, FeatureSource, LinearFeature};
  use crate::geometry::Point;

  fn square_footprint() -> Vec<Point> {
    vec![
      Point::new(0.0, 0.0).unwrap(),
      Point::new(0.0, 0.001).unwrap(),
      Point::new(0.001, 0.001).unwrap(),
      Point::new(0.001, 0.0).unwrap(),
      Point::new(0.0, 0.0).unwrap(),
    ]
  }

  fn empty_edges() -> Edges {
    Edges::default()
  }

  #[test]
  fn flags_area_mismatch_as_an_issue() {
    let bundle = MeasurementBundle {
      footprint: square_footprint(),
      facets: vec![Facet {
        id: "f1".to_string(),
        polygon: square_footprint(),
        area: 900.0,
        plan_area: 900.0,
        requires_review: false,
      }],
      edges: empty_edges(),
      totals: Totals { total_sqft: 1000.0 },
      reference_area_sqft: None,
    };

    let result = validate_measurements(&bundle);
    assert!(!result.area_match);
    assert!((result.area_error_percent - 10.0).abs() < 0.01);
    assert!(result.score < 1.0);
  }

  #[test]
  fn crossing_hips_produce_a_critical_issue() {
    let hip_a = LinearFeature::new(
      "h1",
      vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.001, 0.001).unwrap()],
      FeatureKind::Hip,
      FeatureSource::Manual,
      0.9,
    );
    let hip_b = LinearFeature::new(
      "h2",
      vec![Point::new(0.0, 0.001).unwrap(), Point::new(0.001, 0.0).unwrap()],
      FeatureKind::Hip,
      FeatureSource::Manual,
      0.9,
    );
    let mut edges = Edges::default();
    edges.hips = vec![hip_a, hip_b];

    let bundle = MeasurementBundle {
      footprint: square_footprint(),
      facets: vec![],
      edges,
      totals: Totals { total_sqft: 0.0 },
      reference_area_sqft: None,
    };

    let result = validate_measurements(&bundle);
    assert!(!result.topology_valid);
    assert!(result.critical_issues.iter().any(|issue| issue.contains("crossing")));
    assert!(result.manual_review_recommended);
  }

  #[test]
  fn clean_bundle_scores_highly() {
    let footprint = square_footprint();
    let eave = LinearFeature::new(
      "e1",
      footprint.clone(),
      FeatureKind::Eave,
      FeatureSource::Manual,
      0.9,
    );
    let mut edges = Edges::default();
    edges.eaves = vec![eave];
    let facet_area = crate::geometry::polygon_area_m2(&footprint) * crate::constants::FEET_PER_METER * crate::constants::FEET_PER_METER;

    let bundle = MeasurementBundle {
      footprint: footprint.clone(),
      facets: vec![Facet {
        id: "f1".to_string(),
        polygon: footprint,
        area: facet_area,
        plan_area: facet_area,
        requires_review: false,
      }],
      edges,
      totals: Totals { total_sqft: facet_area },
      reference_area_sqft: None,
    };

    let result = validate_measurements(&bundle);
    assert!(result.area_match);
    assert!(!result.manual_review_recommended);
    assert!(result.score > 0.9);
  }
}
