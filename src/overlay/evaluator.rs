//! Comparing AI-generated linear features against user-drawn traces.

use crate::constants::EVALUATOR_FEET_PER_DEGREE;
use crate::domain::{FeatureKind, FeatureSource, LinearFeature, UserTrace};
use crate::geometry::{Point, point_to_segment_distance, sample_equispaced};
use crate::overlay::types::{Correction, CountDelta, DeviationRecord, EvaluationReport};

const DEVIATION_SAMPLE_COUNT: usize = 11;
const ALIGNMENT_DIVISOR_FT: f64 = 10.0;
const NO_MATCH_ALIGNMENT: f64 = 0.5;
const CORRECTION_DEVIATION_THRESHOLD_FT: f64 = 2.0;
const CORRECTION_ALIGNMENT_THRESHOLD: f64 = 0.85;
const MAX_DEVIATION_MULTIPLE: f64 = 1.5;
const CORRECTED_CONFIDENCE: f64 = 0.95;

/// Compare `ai_features` against `user_traces`, grouped by kind.
///
/// `footprint` is accepted for interface parity but the deviation algorithm
/// operates purely on the two polyline sets.
pub fn evaluate_overlay(ai_features: &[LinearFeature], user_traces: &[UserTrace], _footprint: &[Point]) -> EvaluationReport {
  let mut deviations = Vec::new();
  let mut missing = Vec::new();
  let mut extra = Vec::new();

  for kind in FeatureKind::ALL {
    let ai_of_kind: Vec<&LinearFeature> = ai_features.iter().filter(|f| f.kind == kind).collect();
    let traces_of_kind: Vec<(usize, &UserTrace)> = user_traces.iter().enumerate().filter(|(_, t)| t.kind == kind).collect();

    for feature in &ai_of_kind {
      deviations.push(deviate(feature, &traces_of_kind));
    }

    if traces_of_kind.len() > ai_of_kind.len() {
      missing.push(CountDelta { kind, delta: traces_of_kind.len() - ai_of_kind.len() });
    } else if ai_of_kind.len() > traces_of_kind.len() && !traces_of_kind.is_empty() {
      extra.push(CountDelta { kind, delta: ai_of_kind.len() - traces_of_kind.len() });
    }
  }

  let corrections: Vec<Correction> = deviations
    .iter()
    .filter(|d| d.needs_correction)
    .filter_map(|d| {
      let trace_index = d.matched_trace_index?;
      let geometry = user_traces.get(trace_index)?.polyline.clone();
      Some(Correction { feature_id: d.feature_id.clone(), geometry })
    })
    .collect();

  let overall_score = overall_score(&deviations);
  let recommendations = build_recommendations(&corrections, &missing, &extra, &deviations);

  EvaluationReport { overall_score, deviations, missing, extra, recommendations, corrections }
}

fn deviate(feature: &LinearFeature, traces_of_kind: &[(usize, &UserTrace)]) -> DeviationRecord {
  let candidates: Vec<&(usize, &UserTrace)> = traces_of_kind.iter().filter(|(_, t)| t.polyline.len() >= 2).collect();

  if candidates.is_empty() {
    return DeviationRecord {
      feature_id: feature.id.clone(),
      kind: feature.kind,
      deviation_ft: 0.0,
      max_deviation_ft: 0.0,
      alignment_score: NO_MATCH_ALIGNMENT,
      matched_trace_index: None,
      needs_correction: false,
    };
  }

  let (matched_index, deviation_ft) = candidates
    .iter()
    .map(|(index, trace)| (*index, deviation_in_feet(&feature.geometry, &trace.polyline)))
    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
    .expect("candidates is non-empty");

  let alignment_score = (1.0 - deviation_ft / ALIGNMENT_DIVISOR_FT).max(0.0);
  let needs_correction = deviation_ft > CORRECTION_DEVIATION_THRESHOLD_FT || alignment_score < CORRECTION_ALIGNMENT_THRESHOLD;

  DeviationRecord {
    feature_id: feature.id.clone(),
    kind: feature.kind,
    deviation_ft,
    max_deviation_ft: deviation_ft * MAX_DEVIATION_MULTIPLE,
    alignment_score,
    matched_trace_index: Some(matched_index),
    needs_correction,
  }
}

fn deviation_in_feet(ai_polyline: &[Point], user_polyline: &[Point]) -> f64 {
  let samples = sample_equispaced(ai_polyline, DEVIATION_SAMPLE_COUNT);
  let avg_deg = samples.iter().map(|sample| min_distance_to_polyline(*sample, user_polyline)).sum::<f64>() / samples.len() as f64;
  avg_deg * EVALUATOR_FEET_PER_DEGREE
}

fn min_distance_to_polyline(point: Point, polyline: &[Point]) -> f64 {
  polyline
    .windows(2)
    .map(|segment| point_to_segment_distance(point, segment[0], segment[1]))
    .fold(f64::INFINITY, f64::min)
}

fn overall_score(deviations: &[DeviationRecord]) -> f64 {
  if deviations.is_empty() {
    return 50.0;
  }
  let total = deviations.len() as f64;
  let correct = deviations.iter().filter(|d| !d.needs_correction).count() as f64;
  let mean_alignment = deviations.iter().map(|d| d.alignment_score).sum::<f64>() / total;
  (50.0 * (correct / total) + 50.0 * mean_alignment).round()
}

fn build_recommendations(corrections: &[Correction], missing: &[CountDelta], extra: &[CountDelta], deviations: &[DeviationRecord]) -> Vec<String> {
  let mut lines = Vec::new();
  for correction in corrections {
    let deviation = deviations.iter().find(|d| d.feature_id == correction.feature_id);
    let deviation_ft = deviation.map_or(0.0, |d| d.deviation_ft);
    lines.push(format!(
      "Feature {} deviates {deviation_ft:.1} ft from the matching user trace; replacing its geometry is recommended.",
      correction.feature_id
    ));
  }
  for delta in missing {
    lines.push(format!("{} user-traced {} feature(s) have no matching AI feature.", delta.delta, kind_label(delta.kind)));
  }
  for delta in extra {
    lines.push(format!("AI produced {} extra {} feature(s) beyond what users traced.", delta.delta, kind_label(delta.kind)));
  }
  lines
}

fn kind_label(kind: FeatureKind) -> &'static str {
  match kind {
    FeatureKind::Ridge => "ridge",
    FeatureKind::Hip => "hip",
    FeatureKind::Valley => "valley",
    FeatureKind::Eave => "eave",
    FeatureKind::Rake => "rake",
  }
}

/// Apply `corrections` to `features`, replacing geometry on matched
/// features and leaving the rest untouched.
///
/// Corrected features get their length recomputed from the new geometry
/// (summed segment length converted at the evaluator's fixed
/// feet-per-degree constant, not the geodesic scaling used elsewhere),
/// `source` set to `manual`, and `confidence` set to `0.95`.
pub fn apply_corrections(features: &[LinearFeature], corrections: &[Correction]) -> Vec<LinearFeature> {
  features
    .iter()
    .map(|feature| match corrections.iter().find(|c| c.feature_id == feature.id) {
      Some(correction) => LinearFeature {
        geometry: correction.geometry.clone(),
        length_ft: evaluator_length_ft(&correction.geometry),
        source: FeatureSource::Manual,
        confidence: CORRECTED_CONFIDENCE,
        ..feature.clone()
      },
      None => feature.clone(),
    })
    .collect()
}

fn evaluator_length_ft(polyline: &[Point]) -> f64 {
  polyline
    .windows(2)
    .map(|segment| (segment[1].lng - segment[0].lng).hypot(segment[1].lat - segment[0].lat))
    .sum::<f64>()
    * EVALUATOR_FEET_PER_DEGREE
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::FeatureSource;

  fn ridge(id: &str, geometry: Vec<Point>) -> LinearFeature {
    LinearFeature::new(id, geometry, FeatureKind::Ridge, FeatureSource::AiVision, 0.8)
  }

  #[test]
  fn identical_polylines_score_one_hundred() {
    let geometry = vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()];
    let features = vec![ridge("f1", geometry.clone())];
    let traces = vec![UserTrace::new(FeatureKind::Ridge, geometry)];

    let report = evaluate_overlay(&features, &traces, &[]);
    assert_eq!(report.overall_score, 100.0);
    assert!(!report.deviations[0].needs_correction);
    assert!(report.corrections.is_empty());
  }

  #[test]
  fn offset_trace_requires_correction() {
    let ai_geometry = vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()];
    let user_geometry = vec![Point::new(0.0, 0.00001).unwrap(), Point::new(0.0001, 0.00001).unwrap()];
    let features = vec![ridge("f1", ai_geometry)];
    let traces = vec![UserTrace::new(FeatureKind::Ridge, user_geometry)];

    let report = evaluate_overlay(&features, &traces, &[]);
    assert!(report.deviations[0].needs_correction);
    assert!((report.deviations[0].deviation_ft - 3.64).abs() < 0.5);
    assert_eq!(report.corrections.len(), 1);
  }

  #[test]
  fn apply_corrections_is_a_no_op_with_an_empty_list() {
    let feature = ridge("f1", vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()]);
    let corrected = apply_corrections(&[feature.clone()], &[]);
    assert_eq!(corrected, vec![feature]);
  }

  #[test]
  fn missing_user_trace_is_reported() {
    let features: Vec<LinearFeature> = vec![];
    let traces = vec![UserTrace::new(
      FeatureKind::Ridge,
      vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()],
    )];
    let report = evaluate_overlay(&features, &traces, &[]);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].delta, 1);
  }
}
