//! Computational-geometry core of a roof-measurement pipeline.
//!
//! Three tightly coupled components, leaves first:
//!
//! - [`geometry`] — planar primitives under an equirectangular
//!   approximation: distance, area, containment, intersection.
//! - [`footprint`] — choose the best building footprint from candidates
//!   retrieved from a vector-tile service.
//! - [`ridge`] — derive ridge line geometry from a prioritized cascade of
//!   evidence sources.
//! - [`validate`] — score a complete measurement against internal
//!   consistency checks.
//! - [`overlay`] — compare AI-generated features against user traces and
//!   propose corrections.
//!
//! The crate is pure except for one I/O seam in [`footprint`]: the
//! outbound tile-service query behind [`footprint::TileQueryClient`].

pub mod constants;
pub mod domain;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod overlay;
pub mod ridge;
pub mod validate;

pub use domain::{FeatureKind, FeatureSource, LinearFeature, UserTrace};
pub use error::GeomError;
pub use footprint::{FootprintResult, pick_best_footprint, select_footprint};
pub use geometry::Point;
pub use overlay::{apply_corrections, evaluate_overlay};
pub use ridge::{RidgeCalibrationResult, calibrate_ridges};
pub use validate::{ValidationResult, validate_measurements};
