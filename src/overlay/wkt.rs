//! `LINESTRING(lng lat, lng lat, ...)` parsing and emission, used wherever
//! linear features cross a text boundary.

use crate::geometry::Point;

/// Parse a `LINESTRING(...)` string into its vertices.
///
/// Accepts arbitrary whitespace around coordinates and the comma separator.
/// Returns `None` on malformed input (missing wrapper, non-numeric
/// coordinate, or an odd number of tokens in a coordinate pair).
pub fn parse_linestring(text: &str) -> Option<Vec<Point>> {
  let trimmed = text.trim();
  let upper = trimmed.to_ascii_uppercase();
  if !upper.starts_with("LINESTRING") {
    return None;
  }
  let open = trimmed.find('(')?;
  let close = trimmed.rfind(')')?;
  if close <= open {
    return None;
  }
  let body = &trimmed[open + 1..close];

  body
    .split(',')
    .map(|pair| {
      let mut tokens = pair.split_whitespace();
      let lng: f64 = tokens.next()?.parse().ok()?;
      let lat: f64 = tokens.next()?.parse().ok()?;
      if tokens.next().is_some() {
        return None;
      }
      Point::new(lng, lat).ok()
    })
    .collect()
}

/// Emit `points` as `LINESTRING(lng lat, lng lat, ...)`: single space
/// between a coordinate pair, `", "` between vertices.
pub fn emit_linestring(points: &[Point]) -> String {
  let body = points.iter().map(|p| format!("{} {}", p.lng, p.lat)).collect::<Vec<_>>().join(", ");
  format!("LINESTRING({body})")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_a_simple_linestring() {
    let points = vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()];
    let text = emit_linestring(&points);
    assert_eq!(text, "LINESTRING(0 0, 0.0001 0)");
    assert_eq!(parse_linestring(&text).unwrap(), points);
  }

  #[test]
  fn tolerates_irregular_whitespace() {
    let text = "LINESTRING(  0   0 ,0.0001  0 )";
    let points = parse_linestring(text).unwrap();
    assert_eq!(points, vec![Point::new(0.0, 0.0).unwrap(), Point::new(0.0001, 0.0).unwrap()]);
  }

  #[test]
  fn rejects_text_missing_the_wrapper() {
    assert!(parse_linestring("0 0, 1 1").is_none());
  }
}
