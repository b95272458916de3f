//! Rank 4: ridges proposed by an external vision model, each carrying its
//! own optional confidence.

use crate::geometry::Point;
use crate::ridge::types::{AiVisionRidge, Evidence, RawRidge};

const DEFAULT_CONFIDENCE: f64 = 0.75;

pub(crate) fn from_ai_vision(_footprint: &[Point], evidence: &Evidence) -> Option<Vec<RawRidge>> {
  let proposals = evidence.ai_vision.as_ref()?;
  if proposals.is_empty() {
    return None;
  }

  let ridges: Vec<RawRidge> = proposals.iter().filter_map(raw_ridge_of).collect();
  if ridges.is_empty() { None } else { Some(ridges) }
}

fn raw_ridge_of(proposal: &AiVisionRidge) -> Option<RawRidge> {
  let start = *proposal.geometry.first()?;
  let end = *proposal.geometry.last()?;
  Some(RawRidge {
    start,
    end,
    confidence: proposal.confidence.unwrap_or(DEFAULT_CONFIDENCE),
    elevation_profile: None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absent_evidence_yields_none() {
    let evidence = Evidence::default();
    assert!(from_ai_vision(&[], &evidence).is_none());
  }

  #[test]
  fn uses_explicit_confidence_when_present() {
    let mut evidence = Evidence::default();
    evidence.ai_vision = Some(vec![AiVisionRidge {
      geometry: vec![Point::new(0.0, 0.0).unwrap(), Point::new(1.0, 0.0).unwrap()],
      confidence: Some(0.6),
    }]);
    let raw = from_ai_vision(&[], &evidence).unwrap();
    assert_eq!(raw[0].confidence, 0.6);
  }

  #[test]
  fn falls_back_to_default_confidence_when_absent() {
    let mut evidence = Evidence::default();
    evidence.ai_vision = Some(vec![AiVisionRidge {
      geometry: vec![Point::new(0.0, 0.0).unwrap(), Point::new(1.0, 0.0).unwrap()],
      confidence: None,
    }]);
    let raw = from_ai_vision(&[], &evidence).unwrap();
    assert_eq!(raw[0].confidence, DEFAULT_CONFIDENCE);
  }

  #[test]
  fn skips_proposals_with_fewer_than_two_vertices() {
    let mut evidence = Evidence::default();
    evidence.ai_vision = Some(vec![AiVisionRidge {
      geometry: vec![Point::new(0.0, 0.0).unwrap()],
      confidence: None,
    }]);
    assert!(from_ai_vision(&[], &evidence).is_none());
  }
}
