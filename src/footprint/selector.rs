//! Candidate extraction, ranking, and confidence scoring.

use std::cmp::Reverse;

use crate::footprint::client::{FetchFailure, TileQueryClient, TileQueryRequest};
use crate::footprint::geojson::{FeatureCollection, Geometry};
use crate::footprint::types::{
  FallbackReason, FootprintCandidate, FootprintFailure, FootprintPickSource, FootprintResult, FootprintSelectorOptions,
  PickedFootprint, SelectedFootprint,
};
use crate::geometry::{Point, point_in_polygon, polygon_area_m2};

const RETRY_RADIUS_M: f64 = 100.0;
const RESIDENTIAL_MIN_M2: f64 = 100.0;
const RESIDENTIAL_MAX_M2: f64 = 500.0;
const DISTANCE_TIE_BUCKET_M: f64 = 5.0;

/// Existing-footprint confidence used by [`pick_best_footprint`] when the
/// already-known footprint is kept over a fresh candidate. The spec leaves
/// this value open; the selector's own confidence floor is reused here so a
/// kept "existing" footprint is never reported as more confident than a
/// freshly scored candidate could ever be.
const EXISTING_FOOTPRINT_CONFIDENCE: f64 = 0.5;

/// Select the best building footprint near `(lng, lat)`.
///
/// Never panics and never returns a `Result`: failures are reported as
/// [`FootprintResult::NotFound`].
pub fn select_footprint(
  client: &dyn TileQueryClient,
  lng: f64,
  lat: f64,
  access_token: &str,
  options: &FootprintSelectorOptions,
  cancelled: &dyn Fn() -> bool,
) -> FootprintResult {
  let target = match Point::new(lng, lat) {
    Ok(point) => point,
    Err(err) => {
      return FootprintResult::NotFound(FootprintFailure {
        error_message: Some(err.to_string()),
        fallback_reason: FallbackReason::FetchError,
      });
    }
  };

  let first = fetch_and_extract(client, target, access_token, options.radius_m, &options.tileset_id, cancelled);
  let (candidates, had_features) = match first {
    Ok(outcome) => outcome,
    Err(failure) => return FootprintResult::NotFound(failure),
  };

  let (candidates, had_features) = if candidates.is_empty() && options.radius_m < RETRY_RADIUS_M {
    match fetch_and_extract(client, target, access_token, RETRY_RADIUS_M, &options.tileset_id, cancelled) {
      Ok(outcome) => outcome,
      Err(failure) => return FootprintResult::NotFound(failure),
    }
  } else {
    (candidates, had_features)
  };

  if candidates.is_empty() {
    let fallback_reason = if had_features {
      FallbackReason::NoPolygonBuildings
    } else {
      FallbackReason::NoBuildingsFound
    };
    return FootprintResult::NotFound(FootprintFailure {
      error_message: None,
      fallback_reason,
    });
  }

  let ranked = rank_candidates(candidates);
  let best = ranked.into_iter().next().expect("checked non-empty above");
  let confidence = score_confidence(&best);

  FootprintResult::Found(SelectedFootprint {
    coordinates: best.ring,
    confidence,
    building_id: best.building_id,
    area_m2: best.area_m2,
  })
}

fn fetch_and_extract(
  client: &dyn TileQueryClient,
  target: Point,
  access_token: &str,
  radius_m: f64,
  tileset_id: &str,
  cancelled: &dyn Fn() -> bool,
) -> Result<(Vec<FootprintCandidate>, bool), FootprintFailure> {
  let request = TileQueryRequest {
    lng: target.lng,
    lat: target.lat,
    radius_m,
    tileset_id: tileset_id.to_string(),
    access_token: access_token.to_string(),
  };

  let collection = client.query(&request, cancelled).map_err(map_fetch_failure)?;
  let had_features = !collection.features.is_empty();
  let candidates = extract_candidates(&collection, target);
  Ok((candidates, had_features))
}

fn map_fetch_failure(failure: FetchFailure) -> FootprintFailure {
  match failure {
    FetchFailure::Status(code) => FootprintFailure {
      error_message: Some(format!("tile service returned status {code}")),
      fallback_reason: FallbackReason::ApiError,
    },
    FetchFailure::Cancelled => FootprintFailure {
      error_message: Some("tile query cancelled".to_string()),
      fallback_reason: FallbackReason::FetchError,
    },
    FetchFailure::Timeout => FootprintFailure {
      error_message: Some("tile query timed out".to_string()),
      fallback_reason: FallbackReason::FetchError,
    },
    FetchFailure::Transport(message) => FootprintFailure {
      error_message: Some(message),
      fallback_reason: FallbackReason::FetchError,
    },
  }
}

/// Extract candidates from every `Polygon` feature and each sub-polygon's
/// outer ring in every `MultiPolygon` feature, skipping outer rings with
/// fewer than 4 points.
fn extract_candidates(collection: &FeatureCollection, target: Point) -> Vec<FootprintCandidate> {
  let mut candidates = Vec::new();
  for feature in &collection.features {
    let distance_m = feature.properties.tilequery.distance.unwrap_or(f64::MAX);
    let building_id = feature.properties.id.as_ref().map(|id| match id {
      serde_json::Value::String(s) => s.clone(),
      other => other.to_string(),
    });

    let outer_rings: Vec<&Vec<[f64; 2]>> = match &feature.geometry {
      Geometry::Polygon { coordinates } => coordinates.first().into_iter().collect(),
      Geometry::MultiPolygon { coordinates } => coordinates.iter().filter_map(|poly| poly.first()).collect(),
      Geometry::Other => Vec::new(),
    };

    for outer in outer_rings {
      if outer.len() < 4 {
        continue;
      }
      let Some(points) = points_from_coords(outer) else { continue };
      let Ok(ring) = crate::geometry::build_ring(points) else { continue };
      let contains_point = point_in_polygon(target, &ring);
      let area_m2 = polygon_area_m2(&ring);
      candidates.push(FootprintCandidate {
        ring,
        distance_m,
        contains_point,
        area_m2,
        building_id: building_id.clone(),
      });
    }
  }
  candidates
}

fn points_from_coords(raw: &[[f64; 2]]) -> Option<Vec<Point>> {
  raw.iter().map(|[lng, lat]| Point::new(*lng, *lat).ok()).collect()
}

fn rank_key(candidate: &FootprintCandidate) -> (Reverse<bool>, i64, Reverse<bool>) {
  let distance_bucket = (candidate.distance_m / DISTANCE_TIE_BUCKET_M).floor() as i64;
  let residential = (RESIDENTIAL_MIN_M2..=RESIDENTIAL_MAX_M2).contains(&candidate.area_m2);
  (Reverse(candidate.contains_point), distance_bucket, Reverse(residential))
}

fn rank_candidates(mut candidates: Vec<FootprintCandidate>) -> Vec<FootprintCandidate> {
  candidates.sort_by(|a, b| rank_key(a).cmp(&rank_key(b)));
  candidates
}

fn score_confidence(candidate: &FootprintCandidate) -> f64 {
  let mut confidence: f64 = 0.92;
  if !candidate.contains_point {
    confidence -= 0.10;
  }
  if candidate.distance_m > 10.0 {
    confidence -= 0.05;
  }
  if candidate.distance_m > 20.0 {
    confidence -= 0.10;
  }
  if candidate.area_m2 < 50.0 {
    confidence -= 0.15;
  }
  if candidate.area_m2 > 2000.0 {
    confidence -= 0.05;
  }
  confidence.clamp(0.5, 0.98)
}

/// Pick between a freshly retrieved candidate and an already-known
/// footprint.
///
/// Prefers the one whose area is closer to `target_area_sqft` when given;
/// otherwise prefers the ring with more vertices; otherwise keeps
/// `existing`.
pub fn pick_best_footprint(candidate: &FootprintCandidate, existing: &[Point], target_area_sqft: Option<f64>) -> PickedFootprint {
  if let Some(target_sqft) = target_area_sqft {
    let target_m2 = crate::footprint::sqft_to_m2(target_sqft);
    let existing_area_m2 = polygon_area_m2(existing);
    let candidate_diff = (candidate.area_m2 - target_m2).abs();
    let existing_diff = (existing_area_m2 - target_m2).abs();

    if candidate_diff < existing_diff {
      return candidate_pick(candidate);
    }
    if existing_diff < candidate_diff {
      return existing_pick(existing);
    }
  }

  if candidate.ring.len() > existing.len() {
    candidate_pick(candidate)
  } else {
    existing_pick(existing)
  }
}

fn candidate_pick(candidate: &FootprintCandidate) -> PickedFootprint {
  PickedFootprint {
    coordinates: candidate.ring.clone(),
    source: FootprintPickSource::Candidate,
    confidence: score_confidence(candidate),
  }
}

fn existing_pick(existing: &[Point]) -> PickedFootprint {
  PickedFootprint {
    coordinates: existing.to_vec(),
    source: FootprintPickSource::Existing,
    confidence: EXISTING_FOOTPRINT_CONFIDENCE,
  }
}
