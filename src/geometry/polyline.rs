//! Arc-length parameterization over polylines.

use crate::geometry::point::Point;
use crate::geometry::segment::{segment_length_ft, segment_length_m};

/// Total length of a polyline, in meters, summing consecutive segment
/// lengths under equirectangular scaling.
pub fn polyline_length_m(points: &[Point]) -> f64 {
  points.windows(2).map(|w| segment_length_m(w[0], w[1])).sum()
}

/// Total length of a polyline, in feet.
pub fn polyline_length_ft(points: &[Point]) -> f64 {
  points.windows(2).map(|w| segment_length_ft(w[0], w[1])).sum()
}

/// Arc-length-parameterized interpolation along `points`.
///
/// `t <= 0` returns the first vertex, `t >= 1` the last. Otherwise the
/// enclosing segment is located by accumulated length and the result is a
/// linear interpolation within that segment. Returns `None` for an empty
/// polyline.
pub fn interpolate_along_polyline(points: &[Point], t: f64) -> Option<Point> {
  let first = *points.first()?;
  if points.len() == 1 || t <= 0.0 {
    return Some(first);
  }
  let last = *points.last().unwrap();
  if t >= 1.0 {
    return Some(last);
  }

  let total_len = polyline_length_m(points);
  if total_len <= 0.0 {
    return Some(first);
  }

  let target = t * total_len;
  let mut accumulated = 0.0;
  for window in points.windows(2) {
    let (a, b) = (window[0], window[1]);
    let seg_len = segment_length_m(a, b);
    if accumulated + seg_len >= target || seg_len <= 0.0 {
      let remaining = (target - accumulated).max(0.0);
      let fraction = if seg_len > 0.0 { (remaining / seg_len).clamp(0.0, 1.0) } else { 0.0 };
      return Some(Point::new_unchecked(
        a.lng + fraction * (b.lng - a.lng),
        a.lat + fraction * (b.lat - a.lat),
      ));
    }
    accumulated += seg_len;
  }

  Some(last)
}

/// Sample a polyline at `count` equispaced arc-length parameters
/// `t_i = i / (count - 1)` for `i = 0..count`.
pub fn sample_equispaced(points: &[Point], count: usize) -> Vec<Point> {
  if count == 0 {
    return Vec::new();
  }
  if count == 1 {
    return interpolate_along_polyline(points, 0.0).into_iter().collect();
  }
  (0..count)
    .filter_map(|i| interpolate_along_polyline(points, i as f64 / (count - 1) as f64))
    .collect()
}
