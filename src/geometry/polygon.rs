//! Polygon ring operations: area, perimeter, closure, and point containment.
//!
//! A ring is a plain `&[Point]`, treated as closed (last vertex equals
//! first). Nothing here enforces simplicity; self-intersection is a
//! validation signal owned by callers, not a constructor error.

use crate::constants::{DEFAULT_NEAR_POLYGON_TOLERANCE_DEG, METERS_PER_DEG_LAT, RING_CLOSURE_EPS_DEG, meters_per_deg_lng, meters_to_feet};
use crate::error::GeomError;
use crate::geometry::point::Point;
use crate::geometry::segment::point_to_segment_distance;

/// Validate an untrusted vertex sequence into a closed ring.
///
/// Collapses consecutive duplicate points (including a trailing point equal
/// to the first, if the input already arrived closed), then requires at
/// least 3 distinct vertices. The returned ring is always closed.
pub fn build_ring(points: Vec<Point>) -> Result<Vec<Point>, GeomError> {
  let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
  for point in points {
    if deduped.last() != Some(&point) {
      deduped.push(point);
    }
  }
  if deduped.len() >= 2 && deduped.first() == deduped.last() {
    deduped.pop();
  }
  if deduped.len() < 3 {
    return Err(GeomError::DegenerateRing { vertex_count: deduped.len() });
  }
  Ok(ensure_closed(&deduped))
}

/// Append the first vertex if the ring is not already closed.
///
/// Idempotent: calling this twice on the same ring produces the same
/// result as calling it once.
pub fn ensure_closed(ring: &[Point]) -> Vec<Point> {
  let mut closed = ring.to_vec();
  match (ring.first(), ring.last()) {
    (Some(first), Some(last)) if !coincident(*first, *last) => closed.push(*first),
    _ => {}
  }
  closed
}

fn coincident(a: Point, b: Point) -> bool {
  (a.lng - b.lng).abs() <= RING_CLOSURE_EPS_DEG && (a.lat - b.lat).abs() <= RING_CLOSURE_EPS_DEG
}

/// Mean latitude of a ring's vertices, used to pick the equirectangular
/// longitude scale factor. Returns `0.0` for an empty ring.
pub fn mean_latitude(ring: &[Point]) -> f64 {
  if ring.is_empty() {
    return 0.0;
  }
  ring.iter().map(|p| p.lat).sum::<f64>() / ring.len() as f64
}

/// Shoelace area of a ring in square meters, using equirectangular scaling
/// at the ring's mean latitude.
///
/// Rings with fewer than 3 points return `0.0`.
pub fn polygon_area_m2(ring: &[Point]) -> f64 {
  if ring.len() < 3 {
    return 0.0;
  }

  let lat_scale = METERS_PER_DEG_LAT;
  let lng_scale = meters_per_deg_lng(mean_latitude(ring));

  let mut sum = 0.0;
  for window in ring.windows(2) {
    let (a, b) = (window[0], window[1]);
    let (x1, y1) = (a.lng * lng_scale, a.lat * lat_scale);
    let (x2, y2) = (b.lng * lng_scale, b.lat * lat_scale);
    sum += x1 * y2 - x2 * y1;
  }
  // Close the ring if the caller passed an open one; harmless if already closed.
  if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
    if !coincident(*first, *last) {
      let (x1, y1) = (last.lng * lng_scale, last.lat * lat_scale);
      let (x2, y2) = (first.lng * lng_scale, first.lat * lat_scale);
      sum += x1 * y2 - x2 * y1;
    }
  }

  (sum / 2.0).abs()
}

/// Perimeter of a closed ring, in feet.
pub fn perimeter_ft(ring: &[Point]) -> f64 {
  let closed = ensure_closed(ring);
  if closed.len() < 2 {
    return 0.0;
  }

  let lat_scale = METERS_PER_DEG_LAT;
  let mut meters = 0.0;
  for window in closed.windows(2) {
    let (a, b) = (window[0], window[1]);
    let lng_scale = meters_per_deg_lng((a.lat + b.lat) / 2.0);
    let dx = (b.lng - a.lng) * lng_scale;
    let dy = (b.lat - a.lat) * lat_scale;
    meters += dx.hypot(dy);
  }
  meters_to_feet(meters)
}

/// Standard horizontal-ray crossing test.
///
/// Points exactly on an edge are implementation-defined; callers must not
/// rely on on-edge determinism.
pub fn point_in_polygon(point: Point, ring: &[Point]) -> bool {
  let mut inside = false;
  for window in ring.windows(2) {
    let (a, b) = (window[0], window[1]);
    let crosses = (a.lat > point.lat) != (b.lat > point.lat);
    if crosses {
      let x_at_point_lat = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
      if point.lng < x_at_point_lat {
        inside = !inside;
      }
    }
  }
  inside
}

/// `point_in_polygon`, extended to also accept points within `tolerance_deg`
/// of any edge.
pub fn point_near_polygon(point: Point, ring: &[Point], tolerance_deg: f64) -> bool {
  if point_in_polygon(point, ring) {
    return true;
  }
  ring
    .windows(2)
    .any(|window| point_to_segment_distance(point, window[0], window[1]) <= tolerance_deg)
}

/// `point_near_polygon` at [`DEFAULT_NEAR_POLYGON_TOLERANCE_DEG`].
pub fn point_near_polygon_default(point: Point, ring: &[Point]) -> bool {
  point_near_polygon(point, ring, DEFAULT_NEAR_POLYGON_TOLERANCE_DEG)
}

/// Axis-aligned bounds of a ring: `(min_lng, min_lat, max_lng, max_lat)`.
pub fn ring_bounds(ring: &[Point]) -> (f64, f64, f64, f64) {
  let mut min_lng = f64::INFINITY;
  let mut min_lat = f64::INFINITY;
  let mut max_lng = f64::NEG_INFINITY;
  let mut max_lat = f64::NEG_INFINITY;
  for p in ring {
    min_lng = min_lng.min(p.lng);
    min_lat = min_lat.min(p.lat);
    max_lng = max_lng.max(p.lng);
    max_lat = max_lat.max(p.lat);
  }
  (min_lng, min_lat, max_lng, max_lat)
}

/// Larger of the ring's bounding-box width and height, in feet, under
/// equirectangular scaling at the ring's mean latitude.
pub fn max_bounds_dimension_ft(ring: &[Point]) -> f64 {
  if ring.is_empty() {
    return 0.0;
  }
  let (min_lng, min_lat, max_lng, max_lat) = ring_bounds(ring);
  let lat_scale = METERS_PER_DEG_LAT;
  let lng_scale = meters_per_deg_lng(mean_latitude(ring));
  let width_m = (max_lng - min_lng) * lng_scale;
  let height_m = (max_lat - min_lat) * lat_scale;
  meters_to_feet(width_m.abs().max(height_m.abs()))
}

/// Centroid of the ring's vertices (simple vertex average, not an
/// area-weighted centroid).
pub fn vertex_centroid(ring: &[Point]) -> Point {
  if ring.is_empty() {
    return Point::new_unchecked(0.0, 0.0);
  }
  let lng = ring.iter().map(|p| p.lng).sum::<f64>() / ring.len() as f64;
  let lat = ring.iter().map(|p| p.lat).sum::<f64>() / ring.len() as f64;
  Point::new_unchecked(lng, lat)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn square() -> Vec<Point> {
    vec![
      Point::new(0.0, 0.0).unwrap(),
      Point::new(0.0, 0.0001).unwrap(),
      Point::new(0.0001, 0.0001).unwrap(),
      Point::new(0.0001, 0.0).unwrap(),
      Point::new(0.0, 0.0).unwrap(),
    ]
  }

  #[test]
  fn ensure_closed_is_idempotent() {
    let mut open = square();
    open.pop();
    let once = ensure_closed(&open);
    let twice = ensure_closed(&once);
    assert_eq!(once, twice);
  }

  #[test]
  fn area_invariant_under_rotation_and_reversal() {
    let ring = square();
    let base = polygon_area_m2(&ring);

    let mut rotated = ring[..ring.len() - 1].to_vec();
    rotated.rotate_left(1);
    rotated.push(rotated[0]);
    assert!((polygon_area_m2(&rotated) - base).abs() < 1e-9);

    let mut reversed = ring.clone();
    reversed.reverse();
    assert!((polygon_area_m2(&reversed) - base).abs() < 1e-9);
  }

  #[test]
  fn area_below_three_points_is_zero() {
    let ring = vec![Point::new(0.0, 0.0).unwrap(), Point::new(1.0, 1.0).unwrap()];
    assert_eq!(polygon_area_m2(&ring), 0.0);
  }

  #[test]
  fn perimeter_matches_square_estimate() {
    let ring = square();
    let ft = perimeter_ft(&ring);
    // 4 * 0.0001 deg * 111320 m/deg * 3.28084 ft/m
    assert!((ft - 146.1).abs() < 0.5);
  }

  #[test]
  fn point_in_polygon_detects_interior_and_exterior() {
    let ring = square();
    assert!(point_in_polygon(Point::new(0.00005, 0.00005).unwrap(), &ring));
    assert!(!point_in_polygon(Point::new(1.0, 1.0).unwrap(), &ring));
  }

  #[test]
  fn build_ring_closes_and_dedupes() {
    let mut open = square();
    open.pop();
    let ring = build_ring(open).unwrap();
    assert_eq!(ring.first(), ring.last());
  }

  #[test]
  fn build_ring_rejects_fewer_than_three_distinct_vertices() {
    let degenerate = vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0, 0.0).unwrap(), Point::new(1.0, 1.0).unwrap()];
    assert_eq!(build_ring(degenerate), Err(GeomError::DegenerateRing { vertex_count: 2 }));
  }

  #[test]
  fn point_near_polygon_respects_tolerance() {
    let ring = square();
    let just_outside = Point::new(-0.00001, 0.00005).unwrap();
    assert!(!point_in_polygon(just_outside, &ring));
    assert!(point_near_polygon(just_outside, &ring, 5e-5));
    assert!(!point_near_polygon(just_outside, &ring, 1e-7));
  }
}
