//! Clipping a candidate ridge segment to a footprint ring.

use crate::geometry::{Point, ensure_closed, point_in_polygon, segment_intersection};

/// Clip `(start, end)` to `footprint`.
///
/// Intersects the segment with every footprint edge. With two or more
/// intersections, emits the span between the ones nearest and farthest from
/// `start`. With zero or one intersections, keeps the segment unchanged only
/// if both endpoints already lie inside the footprint; otherwise discards
/// it.
pub(crate) fn clip_to_footprint(start: Point, end: Point, footprint: &[Point]) -> Option<(Point, Point)> {
  let ring = ensure_closed(footprint);

  let mut intersections: Vec<Point> = ring
    .windows(2)
    .filter_map(|edge| segment_intersection(start, end, edge[0], edge[1]))
    .collect();

  if intersections.len() >= 2 {
    intersections.sort_by(|a, b| distance_from_start(*a, start).partial_cmp(&distance_from_start(*b, start)).unwrap());
    let first = *intersections.first().unwrap();
    let last = *intersections.last().unwrap();
    return Some((first, last));
  }

  if point_in_polygon(start, &ring) && point_in_polygon(end, &ring) {
    return Some((start, end));
  }

  None
}

fn distance_from_start(point: Point, start: Point) -> f64 {
  (point.lng - start.lng).hypot(point.lat - start.lat)
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
  fn clips_segment_crossing_both_edges() {
    let ring = square();
    let clipped = clip_to_footprint(Point::new(-0.002, 0.0).unwrap(), Point::new(0.002, 0.0).unwrap(), &ring).unwrap();
    assert!((clipped.0.lng - (-0.001)).abs() < 1e-9);
    assert!((clipped.1.lng - 0.001).abs() < 1e-9);
  }

  #[test]
  fn keeps_segment_fully_inside() {
    let ring = square();
    let start = Point::new(-0.0005, 0.0).unwrap();
    let end = Point::new(0.0005, 0.0).unwrap();
    let clipped = clip_to_footprint(start, end, &ring).unwrap();
    assert_eq!(clipped, (start, end));
  }

  #[test]
  fn discards_segment_fully_outside() {
    let ring = square();
    let clipped = clip_to_footprint(Point::new(0.01, 0.01).unwrap(), Point::new(0.02, 0.02).unwrap(), &ring);
    assert!(clipped.is_none());
  }
}
