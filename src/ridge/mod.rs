//! Ridge calibration: turning ambiguous roof evidence into a set of ridge
//! lines clipped to a footprint.

mod clip;
mod sources;
mod types;

pub use types::{
  AiVisionRidge, DsmGrid, ElevationProfile, Evidence, GridBounds, Ridge, RidgeCalibrationResult, RidgeMethod,
  SkeletonEvidence, SolarSegment,
};

use crate::domain::FeatureSource;
use crate::geometry::Point;
use clip::clip_to_footprint;
use types::RawRidge;

type SourceFn = fn(&[Point], &Evidence) -> Option<Vec<RawRidge>>;

/// Sources tried in priority order; the first to yield at least one ridge
/// surviving footprint clipping wins.
const SOURCES: &[(SourceFn, FeatureSource, RidgeMethod)] = &[
  (sources::from_manual, FeatureSource::Manual, RidgeMethod::ManualOverride),
  (sources::from_dsm, FeatureSource::Dsm, RidgeMethod::DsmPeaks),
  (sources::from_solar, FeatureSource::SolarSegment, RidgeMethod::SolarSegments),
  (sources::from_ai_vision, FeatureSource::AiVision, RidgeMethod::AiVision),
  (sources::from_skeleton, FeatureSource::Skeleton, RidgeMethod::SkeletonGeometric),
];

/// Run every evidence source in priority order and return the first whose
/// raw ridges survive footprint clipping.
pub fn calibrate_ridges(footprint: &[Point], evidence: &Evidence) -> RidgeCalibrationResult {
  for (source_fn, feature_source, method) in SOURCES {
    let Some(raw_ridges) = source_fn(footprint, evidence) else {
      continue;
    };

    let clipped: Vec<Ridge> = raw_ridges
      .into_iter()
      .filter_map(|raw| {
        let (start, end) = clip_to_footprint(raw.start, raw.end, footprint)?;
        Some(Ridge {
          start,
          end,
          source: *feature_source,
          confidence: raw.confidence,
          elevation_profile: raw.elevation_profile,
        })
      })
      .collect();

    if clipped.is_empty() {
      continue;
    }

    let quality_score = quality_score_for(*method, &clipped);
    let primary_direction = primary_direction_of(&clipped);
    return RidgeCalibrationResult {
      ridge_lines: clipped,
      primary_direction,
      method: *method,
      quality_score,
    };
  }

  RidgeCalibrationResult {
    ridge_lines: Vec::new(),
    primary_direction: (1.0, 0.0),
    method: RidgeMethod::None,
    quality_score: 0.0,
  }
}

/// Fixed score per source, except AI vision, whose score is the mean of the
/// per-ridge confidences it was given.
fn quality_score_for(method: RidgeMethod, ridges: &[Ridge]) -> f64 {
  match method {
    RidgeMethod::ManualOverride => 0.99,
    RidgeMethod::DsmPeaks => 0.92,
    RidgeMethod::SolarSegments => 0.85,
    RidgeMethod::AiVision => ridges.iter().map(|r| r.confidence).sum::<f64>() / ridges.len() as f64,
    RidgeMethod::SkeletonGeometric => 0.70,
    RidgeMethod::None => 0.0,
  }
}

/// Direction of the longest ridge, as a unit vector. `(1.0, 0.0)` when there
/// are no ridges or every ridge is degenerate.
fn primary_direction_of(ridges: &[Ridge]) -> (f64, f64) {
  ridges
    .iter()
    .map(|r| {
      let dx = r.end.lng - r.start.lng;
      let dy = r.end.lat - r.start.lat;
      (dx.hypot(dy), dx, dy)
    })
    .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
    .and_then(|(len, dx, dy)| if len < 1e-12 { None } else { Some((dx / len, dy / len)) })
    .unwrap_or((1.0, 0.0))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn square() -> Vec<Point> {
    vec![
      Point::new(-0.001, -0.001).unwrap(),
      Point::new(-0.001, 0.001).unwrap(),
      Point::new(0.001, 0.001).unwrap(),
      Point::new(0.001, -0.001).unwrap(),
      Point::new(-0.001, -0.001).unwrap(),
    ]
  }

  #[test]
  fn manual_evidence_wins_over_everything_else() {
    let footprint = square();
    let mut evidence = Evidence::default();
    evidence.manual_traces = Some(vec![(Point::new(-0.0005, 0.0).unwrap(), Point::new(0.0005, 0.0).unwrap())]);
    evidence.solar_segments = Some(vec![SolarSegment {
      center: Point::new(0.0, 0.0).unwrap(),
      azimuth_degrees: 10.0,
    }]);

    let result = calibrate_ridges(&footprint, &evidence);
    assert_eq!(result.method, RidgeMethod::ManualOverride);
    assert_eq!(result.ridge_lines.len(), 1);
    assert_eq!(result.ridge_lines[0].source, FeatureSource::Manual);
  }

  #[test]
  fn falls_through_to_the_next_source_when_the_first_clips_to_nothing() {
    let footprint = square();
    let mut evidence = Evidence::default();
    // Entirely outside the footprint: clips to nothing, so manual is skipped.
    evidence.manual_traces = Some(vec![(Point::new(10.0, 10.0).unwrap(), Point::new(11.0, 11.0).unwrap())]);
    evidence.solar_segments = Some(vec![SolarSegment {
      center: Point::new(0.0, 0.0).unwrap(),
      azimuth_degrees: 10.0,
    }]);

    let result = calibrate_ridges(&footprint, &evidence);
    assert_eq!(result.method, RidgeMethod::SolarSegments);
  }

  #[test]
  fn no_evidence_yields_the_none_method() {
    let footprint = square();
    let evidence = Evidence::default();
    let result = calibrate_ridges(&footprint, &evidence);
    assert_eq!(result.method, RidgeMethod::None);
    assert!(result.ridge_lines.is_empty());
    assert_eq!(result.quality_score, 0.0);
    assert_eq!(result.primary_direction, (1.0, 0.0));
  }
}
