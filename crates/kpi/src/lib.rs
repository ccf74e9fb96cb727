//! Parking KPI Evaluation
//!
//! Associates detections with ground truth frame by frame and aggregates:
//! - True positives, false positives and missed ground truth
//! - Precision, recall and mean hangout distance
//! - Pass/fail verdict against configured limits

mod config;
mod evaluator;
mod summary;

pub use config::KpiConfig;
pub use evaluator::KpiEvaluator;
pub use summary::{FrameKpi, KpiSummary, Verdict};

use recording::RecordingError;
use thiserror::Error;

/// KPI evaluation errors
#[derive(Error, Debug)]
pub enum KpiError {
    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    #[error("Recording {0} has no ground truth to evaluate against")]
    NoGroundTruth(String),
}
