//! Line Association
//!
//! Pairs detected parking lines with ground-truth lines and classifies each
//! pairing as a match or not:
//! - Hangout distance + angle thresholds (default)
//! - Tolerance rectangle (true/false positive)
//! - Nearest ground truth selection for whole detection sets

mod config;
mod matcher;
mod result;

pub use config::{AlgoType, AssociationConfig, CandidateSelection};
pub use matcher::Association;
pub use result::{DetectionMatch, MatchResult};

pub use parking_geometry::GeometryError;
