//! Rank 3: ridges inferred from the azimuths of solar-panel-derived roof
//! segments — opposing slopes imply a ridge between them.

use crate::geometry::{Point, vertex_centroid};
use crate::ridge::types::{Evidence, RawRidge, SolarSegment};

const SOLAR_CONFIDENCE: f64 = 0.85;
const OPPOSING_CENTER_DEG: f64 = 180.0;
const OPPOSING_TOLERANCE_DEG: f64 = 30.0;
const PAIR_EXTENSION_DEG: f64 = 1e-3;
const CENTROID_EXTENSION_DEG: f64 = 5e-4;

pub(crate) fn from_solar(footprint: &[Point], evidence: &Evidence) -> Option<Vec<RawRidge>> {
  let segments = evidence.solar_segments.as_ref()?;
  if segments.is_empty() {
    return None;
  }

  let mut ridges = Vec::new();
  for i in 0..segments.len() {
    for j in (i + 1)..segments.len() {
      if is_opposing(segments[i].azimuth_degrees, segments[j].azimuth_degrees) {
        ridges.push(ridge_between(&segments[i], &segments[j]));
      }
    }
  }

  if !ridges.is_empty() {
    return Some(ridges);
  }

  Some(vec![ridge_from_centroid(footprint, segments)])
}

fn is_opposing(a: f64, b: f64) -> bool {
  let diff = (a - b).rem_euclid(360.0);
  let normalized = diff.min(360.0 - diff);
  (OPPOSING_CENTER_DEG - OPPOSING_TOLERANCE_DEG..=OPPOSING_CENTER_DEG + OPPOSING_TOLERANCE_DEG).contains(&normalized)
}

fn ridge_between(a: &SolarSegment, b: &SolarSegment) -> RawRidge {
  let midpoint = Point::new_unchecked((a.center.lng + b.center.lng) / 2.0, (a.center.lat + b.center.lat) / 2.0);
  let joining = (b.center.lng - a.center.lng, b.center.lat - a.center.lat);
  let perpendicular = unit_vector(-joining.1, joining.0);
  extend(midpoint, perpendicular, PAIR_EXTENSION_DEG)
}

fn ridge_from_centroid(footprint: &[Point], segments: &[SolarSegment]) -> RawRidge {
  let centroid = vertex_centroid(footprint);
  let mean_azimuth = circular_mean_azimuth(segments);
  let perpendicular_azimuth = (mean_azimuth + 90.0).to_radians();
  let direction = (perpendicular_azimuth.sin(), perpendicular_azimuth.cos());
  extend(centroid, direction, CENTROID_EXTENSION_DEG)
}

fn circular_mean_azimuth(segments: &[SolarSegment]) -> f64 {
  let (sum_sin, sum_cos) = segments.iter().fold((0.0, 0.0), |(s, c), seg| {
    let radians = seg.azimuth_degrees.to_radians();
    (s + radians.sin(), c + radians.cos())
  });
  sum_sin.atan2(sum_cos).to_degrees().rem_euclid(360.0)
}

fn unit_vector(dx: f64, dy: f64) -> (f64, f64) {
  let len = dx.hypot(dy);
  if len < 1e-12 { (1.0, 0.0) } else { (dx / len, dy / len) }
}

fn extend(center: Point, direction: (f64, f64), amount_deg: f64) -> RawRidge {
  RawRidge {
    start: Point::new_unchecked(center.lng - direction.0 * amount_deg, center.lat - direction.1 * amount_deg),
    end: Point::new_unchecked(center.lng + direction.0 * amount_deg, center.lat + direction.1 * amount_deg),
    confidence: SOLAR_CONFIDENCE,
    elevation_profile: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opposing_pair_produces_one_ridge() {
    let segments = vec![
      SolarSegment {
        center: Point::new(0.0, 0.0001).unwrap(),
        azimuth_degrees: 0.0,
      },
      SolarSegment {
        center: Point::new(0.0, -0.0001).unwrap(),
        azimuth_degrees: 180.0,
      },
    ];
    let mut evidence = Evidence::default();
    evidence.solar_segments = Some(segments);
    let raw = from_solar(&[], &evidence).unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].confidence, SOLAR_CONFIDENCE);
  }

  #[test]
  fn non_opposing_segments_fall_back_to_centroid_ridge() {
    let footprint = vec![
      Point::new(-0.001, -0.001).unwrap(),
      Point::new(-0.001, 0.001).unwrap(),
      Point::new(0.001, 0.001).unwrap(),
      Point::new(0.001, -0.001).unwrap(),
      Point::new(-0.001, -0.001).unwrap(),
    ];
    let segments = vec![SolarSegment {
      center: Point::new(0.0, 0.0).unwrap(),
      azimuth_degrees: 45.0,
    }];
    let mut evidence = Evidence::default();
    evidence.solar_segments = Some(segments);
    let raw = from_solar(&footprint, &evidence).unwrap();
    assert_eq!(raw.len(), 1);
  }

  #[test]
  fn absent_segments_yield_none() {
    let evidence = Evidence::default();
    assert!(from_solar(&[], &evidence).is_none());
  }
}
