//! Rank 5: last-resort ridge construction from the footprint shape alone,
//! when no other evidence is available.
//!
//! A full straight-skeleton decomposition is out of scope; this source
//! approximates it with a single ridge through the footprint's centroid,
//! parallel to its longest edge, extended across the footprint's own
//! bounding diagonal and clipped back to the ring.

use crate::geometry::{Point, ensure_closed, max_bounds_dimension_ft, vertex_centroid};
use crate::ridge::types::{Evidence, RawRidge};

const SKELETON_CONFIDENCE: f64 = 0.70;
const FT_PER_DEG_APPROX: f64 = 364_000.0;

pub(crate) fn from_skeleton(footprint: &[Point], evidence: &Evidence) -> Option<Vec<RawRidge>> {
  evidence.skeleton.as_ref()?;
  if footprint.len() < 4 {
    return None;
  }

  let ring = ensure_closed(footprint);
  let direction = longest_edge_direction(&ring)?;
  let centroid = vertex_centroid(&ring);
  let half_span_deg = (max_bounds_dimension_ft(&ring) / FT_PER_DEG_APPROX).max(1e-6);

  Some(vec![RawRidge {
    start: Point::new_unchecked(centroid.lng - direction.0 * half_span_deg, centroid.lat - direction.1 * half_span_deg),
    end: Point::new_unchecked(centroid.lng + direction.0 * half_span_deg, centroid.lat + direction.1 * half_span_deg),
    confidence: SKELETON_CONFIDENCE,
    elevation_profile: None,
  }])
}

fn longest_edge_direction(ring: &[Point]) -> Option<(f64, f64)> {
  ring
    .windows(2)
    .map(|edge| {
      let dx = edge[1].lng - edge[0].lng;
      let dy = edge[1].lat - edge[0].lat;
      (dx.hypot(dy), dx, dy)
    })
    .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
    .and_then(|(len, dx, dy)| if len < 1e-12 { None } else { Some((dx / len, dy / len)) })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ridge::types::SkeletonEvidence;

  fn rectangle() -> Vec<Point> {
    vec![
      Point::new(0.0, 0.0).unwrap(),
      Point::new(0.002, 0.0).unwrap(),
      Point::new(0.002, 0.001).unwrap(),
      Point::new(0.0, 0.001).unwrap(),
      Point::new(0.0, 0.0).unwrap(),
    ]
  }

  #[test]
  fn builds_a_single_ridge_through_the_centroid() {
    let mut evidence = Evidence::default();
    evidence.skeleton = Some(SkeletonEvidence);
    let raw = from_skeleton(&rectangle(), &evidence).unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].confidence, SKELETON_CONFIDENCE);
  }

  #[test]
  fn absent_request_yields_none() {
    let evidence = Evidence::default();
    assert!(from_skeleton(&rectangle(), &evidence).is_none());
  }

  #[test]
  fn degenerate_footprint_yields_none() {
    let mut evidence = Evidence::default();
    evidence.skeleton = Some(SkeletonEvidence);
    assert!(from_skeleton(&[Point::new(0.0, 0.0).unwrap()], &evidence).is_none());
  }
}
