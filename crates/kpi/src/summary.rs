//! KPI results

use association::DetectionMatch;
use serde::{Deserialize, Serialize};

use crate::KpiConfig;

/// Counts for one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameKpi {
    pub timestamp_us: u64,

    /// Detections evaluated
    pub detections: usize,

    /// Detections matched to a ground truth line
    pub true_positives: usize,

    /// Detections without a matching ground truth line
    pub false_positives: usize,

    /// False positives caused by zero-length detections
    pub degenerate_detections: usize,

    /// Ground truth lines long enough to be matched
    pub ground_truth: usize,

    /// Ground truth lines no detection matched
    pub missed: usize,

    /// Sum of average hangout distances of true positives (meters)
    pub distance_sum: f64,

    /// Per-detection association results
    pub matches: Vec<DetectionMatch>,
}

/// Pass/fail outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    Failed { reasons: Vec<String> },
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }
}

/// Aggregated KPIs of a recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    pub recording: String,
    pub frames: usize,
    pub detections: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub degenerate_detections: usize,
    pub ground_truth: usize,
    pub missed: usize,

    /// True positives over detections (1.0 without detections)
    pub precision: f64,

    /// Detected ground truth over all ground truth
    pub recall: f64,

    /// Mean hangout distance of true positives (meters, 0.0 without any)
    pub mean_hangout_m: f64,

    pub verdict: Verdict,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub frame_results: Vec<FrameKpi>,
}

impl KpiSummary {
    /// Aggregate frame results and judge them against `config`
    pub fn from_frames(recording: &str, frame_results: Vec<FrameKpi>, config: &KpiConfig) -> Self {
        let detections = frame_results.iter().map(|f| f.detections).sum::<usize>();
        let true_positives = frame_results.iter().map(|f| f.true_positives).sum::<usize>();
        let false_positives = frame_results.iter().map(|f| f.false_positives).sum::<usize>();
        let degenerate_detections = frame_results.iter().map(|f| f.degenerate_detections).sum();
        let ground_truth = frame_results.iter().map(|f| f.ground_truth).sum::<usize>();
        let missed = frame_results.iter().map(|f| f.missed).sum::<usize>();
        let distance_sum = frame_results.iter().map(|f| f.distance_sum).sum::<f64>();

        let precision = ratio(true_positives, detections);
        let recall = ratio(ground_truth.saturating_sub(missed), ground_truth);
        let mean_hangout_m = if true_positives > 0 {
            distance_sum / true_positives as f64
        } else {
            0.0
        };

        let mut reasons = Vec::new();
        if precision < config.min_precision {
            reasons.push(format!(
                "precision {:.3} below {:.3}",
                precision, config.min_precision
            ));
        }
        if recall < config.min_recall {
            reasons.push(format!("recall {:.3} below {:.3}", recall, config.min_recall));
        }
        if mean_hangout_m > config.max_mean_hangout_m {
            reasons.push(format!(
                "mean hangout distance {:.3} m above {:.3} m",
                mean_hangout_m, config.max_mean_hangout_m
            ));
        }

        let verdict = if reasons.is_empty() {
            Verdict::Passed
        } else {
            Verdict::Failed { reasons }
        };

        Self {
            recording: recording.to_string(),
            frames: frame_results.len(),
            detections,
            true_positives,
            false_positives,
            degenerate_detections,
            ground_truth,
            missed,
            precision,
            recall,
            mean_hangout_m,
            verdict,
            frame_results,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        1.0
    } else {
        numerator as f64 / denominator as f64
    }
}
