//! Numeric constants that are part of this crate's contract.
//!
//! None of these may be tuned without changing observable behavior: callers
//! depend on the exact conversion factors below, not just their rough
//! magnitude.

/// Meters per degree of latitude, constant across the globe under the
/// equirectangular approximation used throughout the geometry primitives.
pub const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Feet per meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Feet per degree used only by the overlay evaluator's deviation scoring.
///
/// This is an equator-approximate simplification and is *not* the same
/// constant as `METERS_PER_DEG_LAT * FEET_PER_METER`; the evaluator trades
/// latitude-aware precision for a single fixed constant, by contract.
pub const EVALUATOR_FEET_PER_DEGREE: f64 = 364_000.0;

/// Default tolerance, in degrees, for `point_near_polygon`. Roughly 5 meters
/// at the equator.
pub const DEFAULT_NEAR_POLYGON_TOLERANCE_DEG: f64 = 5e-5;

/// Below this cross-product magnitude, two segments are treated as parallel
/// (no intersection) by `segment_intersection`.
pub const SEGMENT_INTERSECTION_EPS: f64 = 1e-7;

/// Parameter-range epsilon for `proper_segment_intersection`: both
/// intersection parameters must lie strictly inside `(EPS, 1 - EPS)`.
pub const PROPER_INTERSECTION_PARAM_EPS: f64 = 1e-3;

/// Cross-product magnitude floor for `proper_segment_intersection`.
pub const PROPER_INTERSECTION_CROSS_EPS: f64 = 1e-12;

/// Floating-point tolerance for treating a ring's first and last vertex as
/// already coincident in `ensure_closed`.
pub const RING_CLOSURE_EPS_DEG: f64 = 1e-9;

/// Tolerance used by the measurement validator when treating two endpoints
/// as connected, or an endpoint as lying on the footprint boundary.
pub const CONNECTIVITY_TOLERANCE_DEG: f64 = 5e-5;

/// Tolerance used by the measurement validator's facet-closure check.
pub const FACET_CLOSURE_TOLERANCE_DEG: f64 = 1e-5;

/// Convert a meter distance to feet.
pub fn meters_to_feet(meters: f64) -> f64 {
  meters * FEET_PER_METER
}

/// Meters per degree of longitude at latitude `lat_deg`, under the
/// equirectangular approximation.
pub fn meters_per_deg_lng(lat_deg: f64) -> f64 {
  METERS_PER_DEG_LAT * lat_deg.to_radians().cos()
}
