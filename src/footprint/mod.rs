//! Footprint Selection: choose the best building footprint among candidates
//! retrieved from a vector-tile service.
//!
//! Everything here is pure except the query issued through
//! [`TileQueryClient`], which is the crate's only I/O seam.

mod client;
mod geojson;
mod selector;
mod types;

pub use client::{FetchFailure, ReqwestTileQueryClient, TileQueryClient, TileQueryRequest};
pub use geojson::{Feature, FeatureCollection, Geometry, Properties, TileQueryProperties};
pub use selector::{pick_best_footprint, select_footprint};
pub use types::{
  FallbackReason, FootprintCandidate, FootprintFailure, FootprintPickSource, FootprintResult, FootprintSelectorOptions,
  PickedFootprint, SelectedFootprint,
};

/// Square feet to square meters, the inverse of the validator's
/// `FEET_PER_METER` convention (squared).
pub(crate) fn sqft_to_m2(sqft: f64) -> f64 {
  sqft / (crate::constants::FEET_PER_METER * crate::constants::FEET_PER_METER)
}
