//! Match results

use parking_geometry::LineDistances;
use serde::{Deserialize, Serialize};

/// Outcome of pairing one detection with one ground-truth line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_match: bool,
    /// Hangout distance at the detection start point (meters)
    pub dist_start: f64,
    /// Hangout distance at the detection end point (meters)
    pub dist_end: f64,
    /// Mean of both distances (meters)
    pub dist_avg: f64,
}

impl MatchResult {
    pub fn new(is_match: bool, distances: LineDistances) -> Self {
        Self {
            is_match,
            dist_start: distances.start,
            dist_end: distances.end,
            dist_avg: distances.average(),
        }
    }

    /// Negative result with zero distances
    pub fn no_match() -> Self {
        Self::default()
    }

    /// `(is_match, dist_start, dist_end, dist_avg)`
    pub fn as_tuple(&self) -> (bool, f64, f64, f64) {
        (self.is_match, self.dist_start, self.dist_end, self.dist_avg)
    }
}

/// Result for one detection of a set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionMatch {
    /// Index into the detection slice
    pub detection_index: usize,
    /// Index of the selected ground-truth line, if any was eligible
    pub gt_index: Option<usize>,
    pub result: MatchResult,
}
