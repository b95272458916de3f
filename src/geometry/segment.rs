//! Point-to-segment distance and segment intersection primitives.

use crate::constants::{
  METERS_PER_DEG_LAT, PROPER_INTERSECTION_CROSS_EPS, PROPER_INTERSECTION_PARAM_EPS, SEGMENT_INTERSECTION_EPS,
  meters_per_deg_lng, meters_to_feet,
};
use crate::geometry::point::Point;

/// Distance, in the input coordinate units (degrees when `Point` is in
/// lng/lat), from `point` to the segment `a`-`b`, with the projection
/// clamped to `t ∈ [0, 1]`.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
  let dx = b.lng - a.lng;
  let dy = b.lat - a.lat;
  let len_sq = dx * dx + dy * dy;

  let t = if len_sq <= f64::EPSILON {
    0.0
  } else {
    (((point.lng - a.lng) * dx + (point.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0)
  };

  let proj_lng = a.lng + t * dx;
  let proj_lat = a.lat + t * dy;
  (point.lng - proj_lng).hypot(point.lat - proj_lat)
}

/// Great-circle-free segment length, in meters, using equirectangular
/// scaling at the endpoint mean latitude.
pub fn segment_length_m(a: Point, b: Point) -> f64 {
  let lng_scale = meters_per_deg_lng((a.lat + b.lat) / 2.0);
  let dx = (b.lng - a.lng) * lng_scale;
  let dy = (b.lat - a.lat) * METERS_PER_DEG_LAT;
  dx.hypot(dy)
}

/// `segment_length_m`, converted to feet.
pub fn segment_length_ft(a: Point, b: Point) -> f64 {
  meters_to_feet(segment_length_m(a, b))
}

/// Intersection point of segments `(a1, a2)` and `(b1, b2)`, when both
/// intersection parameters lie in `[0, 1]`.
///
/// Returns `None` when the segments are (near-)parallel: the cross-product
/// magnitude of their direction vectors falls below
/// [`crate::constants::SEGMENT_INTERSECTION_EPS`].
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
  let (t, u, cross) = solve_intersection(a1, a2, b1, b2)?;
  if cross.abs() < SEGMENT_INTERSECTION_EPS {
    return None;
  }
  if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
    return None;
  }
  Some(Point::new_unchecked(a1.lng + t * (a2.lng - a1.lng), a1.lat + t * (a2.lat - a1.lat)))
}

/// Strict interior crossing of segments `(a1, a2)` and `(b1, b2)`.
///
/// Both parameters must lie in the open interval `(ε, 1−ε)` with
/// `ε = `[`crate::constants::PROPER_INTERSECTION_PARAM_EPS`], and the
/// cross-product magnitude must exceed
/// [`crate::constants::PROPER_INTERSECTION_CROSS_EPS`]. Shared endpoints do
/// not count as a proper intersection.
pub fn proper_segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
  let (t, u, cross) = solve_intersection(a1, a2, b1, b2)?;
  if cross.abs() <= PROPER_INTERSECTION_CROSS_EPS {
    return None;
  }
  let eps = PROPER_INTERSECTION_PARAM_EPS;
  if !(eps..=1.0 - eps).contains(&t) || !(eps..=1.0 - eps).contains(&u) {
    return None;
  }
  Some(Point::new_unchecked(a1.lng + t * (a2.lng - a1.lng), a1.lat + t * (a2.lat - a1.lat)))
}

/// Solve for the intersection parameters `t` (along `a1`-`a2`) and `u`
/// (along `b1`-`b2`), plus the direction cross-product used to classify
/// parallel segments. Returns `None` only when both directions are exactly
/// zero-length (undefined cross product).
fn solve_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<(f64, f64, f64)> {
  let r = (a2.lng - a1.lng, a2.lat - a1.lat);
  let s = (b2.lng - b1.lng, b2.lat - b1.lat);
  let cross = r.0 * s.1 - r.1 * s.0;
  if cross == 0.0 {
    return Some((0.0, 0.0, 0.0));
  }

  let diff = (b1.lng - a1.lng, b1.lat - a1.lat);
  let t = (diff.0 * s.1 - diff.1 * s.0) / cross;
  let u = (diff.0 * r.1 - diff.1 * r.0) / cross;
  Some((t, u, cross))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn point_to_segment_clamps_to_endpoints() {
    let a = Point::new(0.0, 0.0).unwrap();
    let b = Point::new(1.0, 0.0).unwrap();
    let beyond = Point::new(2.0, 0.0).unwrap();
    assert!((point_to_segment_distance(beyond, a, b) - 1.0).abs() < 1e-12);
  }

  #[test]
  fn point_to_segment_projects_onto_midpoint() {
    let a = Point::new(0.0, 0.0).unwrap();
    let b = Point::new(0.0, 2.0).unwrap();
    let p = Point::new(1.0, 1.0).unwrap();
    assert!((point_to_segment_distance(p, a, b) - 1.0).abs() < 1e-12);
  }

  #[test]
  fn crossing_segments_intersect_at_center() {
    let p = segment_intersection(
      Point::new(0.0, 0.0).unwrap(),
      Point::new(1.0, 1.0).unwrap(),
      Point::new(0.0, 1.0).unwrap(),
      Point::new(1.0, 0.0).unwrap(),
    )
    .unwrap();
    assert!((p.lng - 0.5).abs() < 1e-9);
    assert!((p.lat - 0.5).abs() < 1e-9);
  }

  #[test]
  fn parallel_segments_do_not_intersect() {
    let p = segment_intersection(
      Point::new(0.0, 0.0).unwrap(),
      Point::new(1.0, 0.0).unwrap(),
      Point::new(0.0, 1.0).unwrap(),
      Point::new(1.0, 1.0).unwrap(),
    );
    assert!(p.is_none());
  }

  #[test]
  fn proper_intersection_excludes_shared_endpoints() {
    let shared_endpoint = proper_segment_intersection(
      Point::new(0.0, 0.0).unwrap(),
      Point::new(1.0, 1.0).unwrap(),
      Point::new(1.0, 1.0).unwrap(),
      Point::new(2.0, 0.0).unwrap(),
    );
    assert!(shared_endpoint.is_none());

    let proper = proper_segment_intersection(
      Point::new(0.0, 0.0).unwrap(),
      Point::new(1.0, 1.0).unwrap(),
      Point::new(0.0, 1.0).unwrap(),
      Point::new(1.0, 0.0).unwrap(),
    );
    assert!(proper.is_some());
  }
}
