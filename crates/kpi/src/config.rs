//! KPI configuration

use association::AssociationConfig;
use recording::DetectionSource;
use serde::{Deserialize, Serialize};

/// KPI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    /// Association strategy and thresholds
    pub association: AssociationConfig,

    /// Detections to evaluate
    pub detection_source: DetectionSource,

    /// Detections below this confidence are ignored
    pub min_confidence: f64,

    /// Minimum share of detections that match ground truth
    pub min_precision: f64,

    /// Minimum share of ground truth lines that are detected
    pub min_recall: f64,

    /// Maximum mean hangout distance of matched detections (meters)
    pub max_mean_hangout_m: f64,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            association: AssociationConfig::default(),
            detection_source: DetectionSource::Pcl,
            min_confidence: 0.0,
            min_precision: 0.9,
            min_recall: 0.8,
            max_mean_hangout_m: 0.3,
        }
    }
}

impl KpiConfig {
    /// Create strict config (tighter association, higher rates)
    pub fn strict() -> Self {
        Self {
            association: AssociationConfig::strict(),
            min_precision: 0.95,
            min_recall: 0.9,
            max_mean_hangout_m: 0.15,
            ..Default::default()
        }
    }

    /// Create lenient config (wider association, lower rates)
    pub fn lenient() -> Self {
        Self {
            association: AssociationConfig::lenient(),
            min_precision: 0.8,
            min_recall: 0.6,
            max_mean_hangout_m: 0.5,
            ..Default::default()
        }
    }
}
