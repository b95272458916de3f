//! Comparing AI-generated roof features against user-drawn ground truth.

mod evaluator;
mod types;
mod wkt;

pub use evaluator::{apply_corrections, evaluate_overlay};
pub use types::{Correction, CountDelta, DeviationRecord, EvaluationReport};
pub use wkt::{emit_linestring, parse_linestring};
