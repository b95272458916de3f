//! Rank 1: manually traced ridges, highest priority, never second-guessed.

use crate::geometry::Point;
use crate::ridge::types::{Evidence, RawRidge};

const MANUAL_CONFIDENCE: f64 = 0.99;

pub(crate) fn from_manual(_footprint: &[Point], evidence: &Evidence) -> Option<Vec<RawRidge>> {
  let traces = evidence.manual_traces.as_ref()?;
  if traces.is_empty() {
    return None;
  }
  Some(
    traces
      .iter()
      .map(|(start, end)| RawRidge {
        start: *start,
        end: *end,
        confidence: MANUAL_CONFIDENCE,
        elevation_profile: None,
      })
      .collect(),
  )
}
