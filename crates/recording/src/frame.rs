//! Recording model

use std::path::Path;

use parking_geometry::{GeoPoint, GtLine, LocalTangentPlane, PclDelimiter, PmdLine, VehicleLine};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::RecordingError;

/// Which CEM detections are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Parking environment delimiters
    #[default]
    Pcl,
    /// Parking marker detection lines
    Pmd,
    /// Both
    All,
}

/// Ego position and heading at a frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EgoPose {
    /// GPS antenna position
    pub position: GeoPoint,
    /// Heading in radians, counter-clockwise from east
    pub yaw: f64,
}

/// Surveyed ground truth of the recording
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundTruth {
    #[serde(default)]
    pub lines: Vec<GtLine>,
}

impl GroundTruth {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One evaluation timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp_us: u64,

    /// Needed to project geodetic ground truth
    #[serde(default)]
    pub ego: Option<EgoPose>,

    #[serde(default)]
    pub pcl_delimiters: Vec<PclDelimiter>,

    #[serde(default)]
    pub pmd_lines: Vec<PmdLine>,

    /// Ground truth already in vehicle frame
    #[serde(default)]
    pub gt_lines: Vec<VehicleLine>,
}

impl Frame {
    /// Detections of the selected source with at least `min_confidence`
    pub fn detected_lines(&self, source: DetectionSource, min_confidence: f64) -> Vec<VehicleLine> {
        let pcl: &[PclDelimiter] = match source {
            DetectionSource::Pcl | DetectionSource::All => &self.pcl_delimiters,
            DetectionSource::Pmd => &[],
        };
        let pmd: &[PmdLine] = match source {
            DetectionSource::Pmd | DetectionSource::All => &self.pmd_lines,
            DetectionSource::Pcl => &[],
        };

        pcl.iter()
            .filter(|d| d.confidence >= min_confidence)
            .map(VehicleLine::from_cem_pcl)
            .chain(
                pmd.iter()
                    .filter(|l| l.confidence >= min_confidence)
                    .map(VehicleLine::from_cem_pmd),
            )
            .collect()
    }

    /// Ground truth in the vehicle frame of this timestamp
    pub fn ground_truth_lines(&self, ground_truth: &GroundTruth) -> Vec<VehicleLine> {
        let mut lines = self.gt_lines.clone();

        if ground_truth.is_empty() {
            return lines;
        }

        match &self.ego {
            Some(ego) => {
                let gps = LocalTangentPlane::new(ego.position);
                lines.extend(ground_truth.lines.iter().map(|gt| gt.to_vehicle(&gps, ego.yaw)));
            }
            None => {
                warn!(
                    "Frame {} has no ego pose, skipping {} geodetic ground truth lines",
                    self.timestamp_us,
                    ground_truth.lines.len()
                );
            }
        }

        lines
    }
}

/// Decoded recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub name: String,

    #[serde(default)]
    pub ground_truth: GroundTruth,

    pub frames: Vec<Frame>,
}

impl Recording {
    /// Parse a recording document
    pub fn from_json_str(json: &str) -> Result<Self, RecordingError> {
        let recording: Recording = serde_json::from_str(json)?;
        if recording.frames.is_empty() {
            return Err(RecordingError::Empty(recording.name));
        }
        Ok(recording)
    }

    /// Read and parse a recording file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let recording = Self::from_json_str(&json)?;
        info!(
            "Loaded recording {} ({} frames, {} geodetic ground truth lines)",
            recording.name,
            recording.frames.len(),
            recording.ground_truth.lines.len()
        );
        Ok(recording)
    }
}
