//! Minimal GeoJSON shapes for the Mapbox tilequery response.
//!
//! Only the fields this crate actually reads are modeled; unknown fields are
//! ignored by `serde_json` by default.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
  #[serde(default)]
  pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
  pub geometry: Geometry,
  #[serde(default)]
  pub properties: Properties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
  Polygon {
    coordinates: Vec<Vec<[f64; 2]>>,
  },
  MultiPolygon {
    coordinates: Vec<Vec<Vec<[f64; 2]>>>,
  },
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
  pub id: Option<serde_json::Value>,
  #[serde(default)]
  pub tilequery: TileQueryProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileQueryProperties {
  pub distance: Option<f64>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_polygon_feature() {
    let body = r#"{
      "features": [
        {
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[0,1],[1,1],[1,0],[0,0]]] },
          "properties": { "id": 42, "tilequery": { "distance": 12.5 } }
        }
      ]
    }"#;
    let parsed: FeatureCollection = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.features.len(), 1);
    assert_eq!(parsed.features[0].properties.tilequery.distance, Some(12.5));
    match &parsed.features[0].geometry {
      Geometry::Polygon { coordinates } => assert_eq!(coordinates[0].len(), 5),
      _ => panic!("expected polygon"),
    }
  }

  #[test]
  fn parses_multipolygon_feature() {
    let body = r#"{
      "features": [
        {
          "geometry": { "type": "MultiPolygon", "coordinates": [[[[0,0],[0,1],[1,1],[1,0],[0,0]]]] },
          "properties": {}
        }
      ]
    }"#;
    let parsed: FeatureCollection = serde_json::from_str(body).unwrap();
    match &parsed.features[0].geometry {
      Geometry::MultiPolygon { coordinates } => assert_eq!(coordinates.len(), 1),
      _ => panic!("expected multipolygon"),
    }
  }

  #[test]
  fn empty_feature_collection_parses() {
    let parsed: FeatureCollection = serde_json::from_str("{}").unwrap();
    assert!(parsed.features.is_empty());
  }
}
