//! The crate's single validating boundary.
//!
//! Every operation past construction takes already-validated [`crate::geometry::Point`]
//! values and is total; only building a `Point` or a [`crate::geometry::Polygon`] can fail.

use thiserror::Error;

/// Errors raised while constructing geometry primitives.
///
/// This is deliberately the only `Result`-returning boundary for pure
/// geometry in this crate: once a `Point` or `Polygon` exists, every
/// operation on it is total and returns a defined sentinel instead of an
/// error (see the crate's error handling design).
#[derive(Debug, Error, PartialEq)]
pub enum GeomError {
  #[error("longitude {0} is not finite or outside [-180, 180]")]
  InvalidLongitude(f64),

  #[error("latitude {0} is not finite or outside [-90, 90]")]
  InvalidLatitude(f64),

  #[error("ring has {vertex_count} vertices after deduplication, need at least 3")]
  DegenerateRing { vertex_count: usize },
}
