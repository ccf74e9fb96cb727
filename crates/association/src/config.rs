//! Association configuration

use parking_geometry::BoundaryConfig;
use serde::{Deserialize, Serialize};

/// Matching strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgoType {
    /// Average hangout distance and angle below thresholds
    #[default]
    HangoutAngle,
    /// Detection crosses or touches the tolerance rectangle
    Rectangle,
}

/// How the nearest ground-truth line is picked for a detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSelection {
    /// Smallest average of the two endpoint hangout distances
    #[default]
    AverageDistance,
    /// Smallest start distance, ties broken by end distance.
    /// Reproduces the ordering of the legacy KPI evaluators.
    Lexicographic,
}

/// Association configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    /// Strategy used by `match_lines`
    pub algo: AlgoType,

    /// Maximum average hangout distance (meters)
    pub hangout_threshold_m: f64,

    /// Maximum angle between detection and ground truth (degrees)
    pub angle_threshold_deg: f64,

    /// Nearest candidate rule for detection sets
    pub selection: CandidateSelection,

    /// Tolerance rectangle settings
    pub boundary: BoundaryConfig,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            algo: AlgoType::HangoutAngle,
            hangout_threshold_m: 0.6,
            angle_threshold_deg: 4.0,
            selection: CandidateSelection::AverageDistance,
            boundary: BoundaryConfig::default(),
        }
    }
}

impl AssociationConfig {
    /// Create strict config (tighter thresholds)
    pub fn strict() -> Self {
        Self::default().with_thresholds(0.3, 2.0)
    }

    /// Create lenient config (wider thresholds)
    pub fn lenient() -> Self {
        Self::default().with_thresholds(1.0, 8.0)
    }

    pub fn with_algo(mut self, algo: AlgoType) -> Self {
        self.algo = algo;
        self
    }

    pub fn with_thresholds(mut self, hangout_threshold_m: f64, angle_threshold_deg: f64) -> Self {
        self.hangout_threshold_m = hangout_threshold_m;
        self.angle_threshold_deg = angle_threshold_deg;
        self
    }

    pub fn with_selection(mut self, selection: CandidateSelection) -> Self {
        self.selection = selection;
        self
    }
}
