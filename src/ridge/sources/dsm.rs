//! Rank 2: ridges detected as rows/columns of local-maximum elevation
//! cells in a digital surface model.

use crate::geometry::Point;
use crate::ridge::types::{DsmGrid, ElevationProfile, Evidence, RawRidge};

const ROW_COVERAGE_THRESHOLD: f64 = 0.6;
const MIN_CONFIDENCE: f64 = 0.90;
const MAX_CONFIDENCE: f64 = 0.92;

pub(crate) fn from_dsm(_footprint: &[Point], evidence: &Evidence) -> Option<Vec<RawRidge>> {
  let grid = evidence.dsm.as_ref()?;
  let width = grid.width();
  let height = grid.height();
  if width < 3 || height < 3 {
    return None;
  }

  let mut ridges = Vec::new();
  ridges.extend(horizontal_ridges(grid, width, height));
  ridges.extend(vertical_ridges(grid, width, height));

  if ridges.is_empty() { None } else { Some(ridges) }
}

fn horizontal_ridges(grid: &DsmGrid, width: usize, height: usize) -> Vec<RawRidge> {
  let mut ridges = Vec::new();
  for y in 1..height - 1 {
    let mut peak_count = 0usize;
    let mut max_along = f64::NEG_INFINITY;
    for x in 0..width {
      let value = grid.heights[y][x];
      max_along = max_along.max(value);
      if value > grid.heights[y - 1][x] && value > grid.heights[y + 1][x] {
        peak_count += 1;
      }
    }
    if (peak_count as f64) > ROW_COVERAGE_THRESHOLD * width as f64 {
      let lat = grid.bounds.max_lat - (y as f64 / height as f64) * (grid.bounds.max_lat - grid.bounds.min_lat);
      let coverage = peak_count as f64 / width as f64;
      let start = Point::new_unchecked(grid.bounds.min_lng, lat);
      let end = Point::new_unchecked(grid.bounds.max_lng, lat);
      ridges.push(RawRidge {
        start,
        end,
        confidence: scaled_confidence(coverage),
        elevation_profile: Some(ElevationProfile { start, end, max_along }),
      });
    }
  }
  ridges
}

fn vertical_ridges(grid: &DsmGrid, width: usize, height: usize) -> Vec<RawRidge> {
  let mut ridges = Vec::new();
  for x in 1..width - 1 {
    let mut peak_count = 0usize;
    let mut max_along = f64::NEG_INFINITY;
    for y in 0..height {
      let value = grid.heights[y][x];
      max_along = max_along.max(value);
      if value > grid.heights[y][x - 1] && value > grid.heights[y][x + 1] {
        peak_count += 1;
      }
    }
    if (peak_count as f64) > ROW_COVERAGE_THRESHOLD * height as f64 {
      let lng = grid.bounds.min_lng + (x as f64 / width as f64) * (grid.bounds.max_lng - grid.bounds.min_lng);
      let coverage = peak_count as f64 / height as f64;
      let start = Point::new_unchecked(lng, grid.bounds.min_lat);
      let end = Point::new_unchecked(lng, grid.bounds.max_lat);
      ridges.push(RawRidge {
        start,
        end,
        confidence: scaled_confidence(coverage),
        elevation_profile: Some(ElevationProfile { start, end, max_along }),
      });
    }
  }
  ridges
}

/// Scale confidence within the spec's `0.90..=0.92` band by how far the
/// row/column's peak coverage exceeds the qualifying threshold.
fn scaled_confidence(coverage: f64) -> f64 {
  let excess = ((coverage - ROW_COVERAGE_THRESHOLD) / (1.0 - ROW_COVERAGE_THRESHOLD)).clamp(0.0, 1.0);
  MIN_CONFIDENCE + excess * (MAX_CONFIDENCE - MIN_CONFIDENCE)
}
