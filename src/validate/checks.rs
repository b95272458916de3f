//! One check function per row of the validation table. Each returns a score
//! penalty plus any issue/warning messages; `validate_measurements` combines
//! them.

use crate::constants::{CONNECTIVITY_TOLERANCE_DEG, FACET_CLOSURE_TOLERANCE_DEG};
use crate::geometry::{max_bounds_dimension_ft, perimeter_ft, point_near_polygon_default, proper_segment_intersection};
use crate::validate::types::MeasurementBundle;

const AREA_ISSUE_PERCENT: f64 = 3.0;
const AREA_WARNING_PERCENT: f64 = 1.0;
const AREA_PENALTY: f64 = 0.20;

const REFERENCE_WARNING_PERCENT: f64 = 5.0;

const PERIMETER_ISSUE_PERCENT: f64 = 5.0;
const PERIMETER_WARNING_PERCENT: f64 = 1.0;
const PERIMETER_PENALTY: f64 = 0.15;

const CONNECTIVITY_ISSUE_COUNT: usize = 2;
const CONNECTIVITY_PENALTY: f64 = 0.15;

const CLOSURE_PENALTY: f64 = 0.10;

const TOPOLOGY_PENALTY: f64 = 0.25;
const RIDGE_ISSUE_MULTIPLE: f64 = 2.0;
const RIDGE_WARNING_MULTIPLE: f64 = 1.5;
const HIP_WARNING_MULTIPLE: f64 = 4.0;
const PERIMETER_VS_EDGES_WARNING_PERCENT: f64 = 20.0;

const REVIEW_PENALTY_PER_FACET: f64 = 0.05;
const REVIEW_PENALTY_CAP_COUNT: usize = 4;

/// Outcome of a single check: score penalty plus issue/warning text.
pub(crate) struct CheckOutcome {
  pub penalty: f64,
  pub issues: Vec<String>,
  pub warnings: Vec<String>,
}

impl CheckOutcome {
  fn clean() -> Self {
    Self { penalty: 0.0, issues: Vec::new(), warnings: Vec::new() }
  }
}

pub(crate) struct AreaCheck {
  pub outcome: CheckOutcome,
  pub area_match: bool,
  pub error_percent: f64,
}

pub(crate) fn check_area_consistency(bundle: &MeasurementBundle) -> AreaCheck {
  let facet_sum: f64 = bundle.facets.iter().map(|f| f.area).sum();
  let total = bundle.totals.total_sqft;

  if total == 0.0 {
    return AreaCheck {
      outcome: CheckOutcome {
        penalty: AREA_PENALTY,
        issues: vec!["total area is zero, area consistency check failed".to_string()],
        warnings: Vec::new(),
      },
      area_match: false,
      error_percent: 100.0,
    };
  }

  let error_percent = ((facet_sum - total).abs() / total) * 100.0;
  let mut outcome = CheckOutcome::clean();
  let area_match = error_percent <= AREA_ISSUE_PERCENT;
  if !area_match {
    outcome.penalty += AREA_PENALTY;
    outcome.issues.push(format!("facet area sum differs from reported total by {error_percent:.1}%"));
  } else if error_percent > AREA_WARNING_PERCENT {
    outcome.warnings.push(format!("facet area sum differs from reported total by {error_percent:.1}%"));
  }

  AreaCheck { outcome, area_match, error_percent }
}

pub(crate) struct ReferenceCheck {
  pub outcome: CheckOutcome,
  pub matched: Option<bool>,
  pub error_percent: Option<f64>,
}

pub(crate) fn check_area_vs_reference(bundle: &MeasurementBundle, facet_sum: f64) -> ReferenceCheck {
  let Some(reference) = bundle.reference_area_sqft else {
    return ReferenceCheck { outcome: CheckOutcome::clean(), matched: None, error_percent: None };
  };
  if reference == 0.0 {
    return ReferenceCheck {
      outcome: CheckOutcome::clean(),
      matched: Some(false),
      error_percent: Some(100.0),
    };
  }

  let error_percent = ((facet_sum - reference).abs() / reference) * 100.0;
  let mut outcome = CheckOutcome::clean();
  let matched = error_percent <= REFERENCE_WARNING_PERCENT;
  if !matched {
    outcome.warnings.push(format!("facet area sum differs from the reference area by {error_percent:.1}%"));
  }

  ReferenceCheck { outcome, matched: Some(matched), error_percent: Some(error_percent) }
}

pub(crate) struct PerimeterCheck {
  pub outcome: CheckOutcome,
  pub perimeter_match: bool,
  pub error_percent: f64,
}

pub(crate) fn check_perimeter_consistency(bundle: &MeasurementBundle) -> PerimeterCheck {
  let footprint_perimeter = perimeter_ft(&bundle.footprint);
  let edges_perimeter: f64 = bundle.edges.perimeter().map(|f| f.length_ft).sum();

  if footprint_perimeter == 0.0 {
    return PerimeterCheck {
      outcome: CheckOutcome {
        penalty: PERIMETER_PENALTY,
        issues: vec!["footprint perimeter is zero, perimeter consistency check failed".to_string()],
        warnings: Vec::new(),
      },
      perimeter_match: false,
      error_percent: 100.0,
    };
  }

  let error_percent = ((edges_perimeter - footprint_perimeter).abs() / footprint_perimeter) * 100.0;
  let mut outcome = CheckOutcome::clean();
  let perimeter_match = error_percent <= PERIMETER_ISSUE_PERCENT;
  if !perimeter_match {
    outcome.penalty += PERIMETER_PENALTY;
    outcome.issues.push(format!("eave and rake length differs from footprint perimeter by {error_percent:.1}%"));
  } else if error_percent > PERIMETER_WARNING_PERCENT {
    outcome.warnings.push(format!("eave and rake length differs from footprint perimeter by {error_percent:.1}%"));
  }

  PerimeterCheck { outcome, perimeter_match, error_percent }
}

pub(crate) struct ConnectivityCheck {
  pub outcome: CheckOutcome,
  pub connectivity_valid: bool,
  pub disconnected_count: usize,
}

pub(crate) fn check_segment_connectivity(bundle: &MeasurementBundle) -> ConnectivityCheck {
  let interior_endpoints: Vec<crate::geometry::Point> =
    bundle.edges.interior().flat_map(|f| [f.geometry.first().copied(), f.geometry.last().copied()]).flatten().collect();
  let perimeter_endpoints: Vec<crate::geometry::Point> =
    bundle.edges.perimeter().flat_map(|f| [f.geometry.first().copied(), f.geometry.last().copied()]).flatten().collect();

  let mut disconnected_count = 0usize;
  for (index, point) in interior_endpoints.iter().enumerate() {
    let connects_to_other_interior = interior_endpoints
      .iter()
      .enumerate()
      .any(|(other_index, other)| other_index != index && near(*point, *other));
    let connects_to_perimeter = perimeter_endpoints.iter().any(|other| near(*point, *other));
    if !connects_to_other_interior && !connects_to_perimeter {
      disconnected_count += 1;
    }
  }

  let mut outcome = CheckOutcome::clean();
  let connectivity_valid = disconnected_count <= CONNECTIVITY_ISSUE_COUNT;
  if !connectivity_valid {
    outcome.penalty += CONNECTIVITY_PENALTY;
    outcome.issues.push(format!("{disconnected_count} interior edge endpoints are disconnected"));
  } else if disconnected_count > 0 {
    outcome.warnings.push(format!("{disconnected_count} interior edge endpoints are disconnected"));
  }

  ConnectivityCheck { outcome, connectivity_valid, disconnected_count }
}

fn near(a: crate::geometry::Point, b: crate::geometry::Point) -> bool {
  (a.lng - b.lng).abs() <= CONNECTIVITY_TOLERANCE_DEG && (a.lat - b.lat).abs() <= CONNECTIVITY_TOLERANCE_DEG
}

pub(crate) struct ClosureCheck {
  pub outcome: CheckOutcome,
  pub facets_closed: bool,
}

pub(crate) fn check_facet_closure(bundle: &MeasurementBundle) -> ClosureCheck {
  let mut outcome = CheckOutcome::clean();
  let mut any_undersized = false;
  let mut any_unclosed = false;

  for facet in &bundle.facets {
    if facet.polygon.len() < 3 {
      any_undersized = true;
      continue;
    }
    let first = facet.polygon.first().unwrap();
    let last = facet.polygon.last().unwrap();
    let closed = (first.lng - last.lng).abs() <= FACET_CLOSURE_TOLERANCE_DEG && (first.lat - last.lat).abs() <= FACET_CLOSURE_TOLERANCE_DEG;
    if !closed {
      any_unclosed = true;
    }
  }

  if any_undersized {
    outcome.penalty += CLOSURE_PENALTY;
    outcome.issues.push("a facet has fewer than 3 vertices".to_string());
  }
  if any_unclosed {
    outcome.warnings.push("a facet is not closed".to_string());
  }

  ClosureCheck { outcome, facets_closed: !any_undersized && !any_unclosed }
}

pub(crate) struct TopologyCheck {
  pub outcome: CheckOutcome,
  pub topology_valid: bool,
}

pub(crate) fn check_topology(bundle: &MeasurementBundle) -> TopologyCheck {
  let mut outcome = CheckOutcome::clean();
  let max_dimension = max_bounds_dimension_ft(&bundle.footprint);

  let endpoints_ok = bundle
    .edges
    .interior()
    .flat_map(|f| [f.geometry.first().copied(), f.geometry.last().copied()])
    .flatten()
    .all(|point| point_near_polygon_default(point, &bundle.footprint));
  if !endpoints_ok {
    outcome.issues.push("an interior edge endpoint lies outside footprint".to_string());
  }

  let hips_cross = hips_have_proper_crossing(bundle);
  if hips_cross {
    outcome.issues.push("two hip edges are crossing".to_string());
  }

  let ridge_total: f64 = bundle.edges.ridges.iter().map(|r| r.length_ft).sum();
  let ridge_issue = max_dimension > 0.0 && ridge_total > RIDGE_ISSUE_MULTIPLE * max_dimension;
  if ridge_issue {
    outcome.issues.push("total ridge length exceeds 2x the footprint's max bounds dimension".to_string());
  } else if max_dimension > 0.0 && ridge_total > RIDGE_WARNING_MULTIPLE * max_dimension {
    outcome.warnings.push("total ridge length is approaching 2x the footprint's max bounds dimension".to_string());
  }

  let hip_total: f64 = bundle.edges.hips.iter().map(|h| h.length_ft).sum();
  if max_dimension > 0.0 && hip_total > HIP_WARNING_MULTIPLE * max_dimension {
    outcome.warnings.push("total hip length exceeds 4x the footprint's max bounds dimension".to_string());
  }

  let footprint_perimeter = perimeter_ft(&bundle.footprint);
  if footprint_perimeter > 0.0 {
    let edges_perimeter: f64 = bundle.edges.perimeter().map(|f| f.length_ft).sum();
    let error_percent = ((edges_perimeter - footprint_perimeter).abs() / footprint_perimeter) * 100.0;
    if error_percent > PERIMETER_VS_EDGES_WARNING_PERCENT {
      outcome.warnings.push(format!("eave and rake length differs from footprint perimeter by {error_percent:.1}%"));
    }
  }

  let topology_valid = endpoints_ok && !hips_cross && !ridge_issue;
  if !topology_valid {
    outcome.penalty += TOPOLOGY_PENALTY;
  }

  TopologyCheck { outcome, topology_valid }
}

fn hips_have_proper_crossing(bundle: &MeasurementBundle) -> bool {
  let hips = &bundle.edges.hips;
  for i in 0..hips.len() {
    for j in (i + 1)..hips.len() {
      let (Some(a_start), Some(a_end)) = (hips[i].geometry.first(), hips[i].geometry.last()) else { continue };
      let (Some(b_start), Some(b_end)) = (hips[j].geometry.first(), hips[j].geometry.last()) else { continue };
      if proper_segment_intersection(*a_start, *a_end, *b_start, *b_end).is_some() {
        return true;
      }
    }
  }
  false
}

pub(crate) struct ReviewCheck {
  pub outcome: CheckOutcome,
  pub flagged_count: usize,
}

pub(crate) fn check_review_flags(bundle: &MeasurementBundle) -> ReviewCheck {
  let flagged_count = bundle.facets.iter().filter(|f| f.requires_review).count();
  let mut outcome = CheckOutcome::clean();
  if flagged_count > 0 {
    outcome.penalty += REVIEW_PENALTY_PER_FACET * flagged_count.min(REVIEW_PENALTY_CAP_COUNT) as f64;
    outcome.warnings.push(format!("{flagged_count} facets are flagged for review"));
  }
  ReviewCheck { outcome, flagged_count }
}
