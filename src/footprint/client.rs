//! The crate's only I/O seam: an outbound tile-service query.
//!
//! [`TileQueryClient`] keeps the ranking and selection logic in
//! [`crate::footprint::selector`] pure and unit-testable against a fake
//! implementation; [`ReqwestTileQueryClient`] is the production transport.

use std::time::Duration;

use crate::footprint::geojson::FeatureCollection;

/// One outbound tile query.
#[derive(Debug, Clone, PartialEq)]
pub struct TileQueryRequest {
  pub lng: f64,
  pub lat: f64,
  pub radius_m: f64,
  pub tileset_id: String,
  pub access_token: String,
}

/// Transport-level failure, folded by the selector into
/// [`crate::footprint::FallbackReason::ApiError`] or
/// [`crate::footprint::FallbackReason::FetchError`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
  /// Cancellation signal observed before or during the call.
  Cancelled,
  /// The request exceeded its configured timeout.
  Timeout,
  /// Connection, TLS, or body-decoding failure.
  Transport(String),
  /// A non-2xx HTTP response.
  Status(u16),
}

/// A tile-query transport. Implementations must never panic.
pub trait TileQueryClient {
  /// Issue one query. `cancelled` is polled by the implementation at least
  /// once before the call begins; implementations are not required to
  /// interrupt an in-flight request mid-flight, but must check it again
  /// once a response is available.
  fn query(&self, request: &TileQueryRequest, cancelled: &dyn Fn() -> bool) -> Result<FeatureCollection, FetchFailure>;
}

/// Production tile-query client backed by a blocking `reqwest` client.
pub struct ReqwestTileQueryClient {
  http: reqwest::blocking::Client,
}

impl ReqwestTileQueryClient {
  /// Build a client with the given total request timeout.
  pub fn new(timeout: Duration) -> Self {
    let http = reqwest::blocking::Client::builder()
      .timeout(timeout)
      .build()
      .expect("reqwest client configuration is static and always valid");
    Self { http }
  }
}

fn build_url(request: &TileQueryRequest) -> String {
  format!(
    "https://api.mapbox.com/v4/{tileset}/tilequery/{lng},{lat}.json?radius={radius}&layers=building&limit=50&geometry=polygon&access_token={token}",
    tileset = request.tileset_id,
    lng = request.lng,
    lat = request.lat,
    radius = request.radius_m,
    token = request.access_token,
  )
}

impl TileQueryClient for ReqwestTileQueryClient {
  fn query(&self, request: &TileQueryRequest, cancelled: &dyn Fn() -> bool) -> Result<FeatureCollection, FetchFailure> {
    if cancelled() {
      return Err(FetchFailure::Cancelled);
    }

    let url = build_url(request);
    let response = self.http.get(&url).send().map_err(|err| {
      if err.is_timeout() {
        log::warn!("tile query timed out after configured duration");
        FetchFailure::Timeout
      } else {
        log::warn!("tile query transport error: {err}");
        FetchFailure::Transport(err.to_string())
      }
    })?;

    if cancelled() {
      return Err(FetchFailure::Cancelled);
    }

    let status = response.status();
    if !status.is_success() {
      log::warn!("tile query returned non-2xx status {}", status.as_u16());
      return Err(FetchFailure::Status(status.as_u16()));
    }

    let body = response.text().map_err(|err| FetchFailure::Transport(err.to_string()))?;
    serde_json::from_str(&body).map_err(|err| {
      log::warn!("tile query response failed to parse as GeoJSON: {err}");
      FetchFailure::Transport(err.to_string())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_includes_required_query_parameters() {
    let request = TileQueryRequest {
      lng: -122.4,
      lat: 37.8,
      radius_m: 30.0,
      tileset_id: "mapbox.mapbox-streets-v8".to_string(),
      access_token: "tok".to_string(),
    };
    let url = build_url(&request);
    assert!(url.starts_with("https://api.mapbox.com/v4/mapbox.mapbox-streets-v8/tilequery/-122.4,37.8.json?"));
    assert!(url.contains("radius=30"));
    assert!(url.contains("layers=building"));
    assert!(url.contains("limit=50"));
    assert!(url.contains("geometry=polygon"));
    assert!(url.contains("access_token=tok"));
  }
}
