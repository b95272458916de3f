//! Planar geometry primitives over `(lng, lat)` points.
//!
//! Every function here is total over already-validated [`Point`] values;
//! the only fallible boundary in this module is [`Point::new`] itself.
//! Thresholds (tolerances, epsilons) are part of the public contract and
//! are re-exported from [`crate::constants`].

mod point;
mod polygon;
mod polyline;
mod segment;

pub use point::Point;
pub use polygon::{
  build_ring, ensure_closed, max_bounds_dimension_ft, mean_latitude, point_in_polygon, point_near_polygon,
  point_near_polygon_default, polygon_area_m2, perimeter_ft, ring_bounds, vertex_centroid,
};
pub use polyline::{interpolate_along_polyline, polyline_length_ft, polyline_length_m, sample_equispaced};
pub use segment::{point_to_segment_distance, proper_segment_intersection, segment_intersection, segment_length_ft, segment_length_m};

/// A polygon ring: an ordered sequence of points, treated as closed.
pub type Ring = Vec<Point>;
