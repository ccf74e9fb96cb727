//! Parking Recordings
//!
//! Recordings already decoded from the signal layer: per-frame CEM
//! detections, ego pose, and ground truth either geodetic (surveyed lines,
//! static for the recording) or in vehicle frame (simulation traces).

mod error;
mod frame;

pub use error::RecordingError;
pub use frame::{DetectionSource, EgoPose, Frame, GroundTruth, Recording};
