//! CEM detection records
//!
//! Parking environment delimiters (PCL) and painted marker lines (PMD) as
//! delivered by sensor fusion, already decoded from the signal layer.

use serde::{Deserialize, Serialize};

use crate::line::VehicleLine;
use crate::point::VehiclePoint;

/// Kind of parking delimiter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterType {
    ParkingLine,
    WheelStopper,
    Curb,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Parking environment delimiter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PclDelimiter {
    /// Track id assigned by sensor fusion
    pub id: u32,

    #[serde(default)]
    pub delimiter_type: DelimiterType,

    pub start: VehiclePoint,
    pub end: VehiclePoint,

    /// Existence probability (0-1)
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

/// Parking marker detection line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmdLine {
    pub id: u32,
    pub start: VehiclePoint,
    pub end: VehiclePoint,

    /// Detection confidence (0-1)
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl VehicleLine {
    pub fn from_cem_pcl(delimiter: &PclDelimiter) -> Self {
        VehicleLine::new(delimiter.start, delimiter.end)
    }

    pub fn from_cem_pmd(line: &PmdLine) -> Self {
        VehicleLine::new(line.start, line.end)
    }
}

impl From<&PclDelimiter> for VehicleLine {
    fn from(delimiter: &PclDelimiter) -> Self {
        VehicleLine::from_cem_pcl(delimiter)
    }
}

impl From<&PmdLine> for VehicleLine {
    fn from(line: &PmdLine) -> Self {
        VehicleLine::from_cem_pmd(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcl_delimiter_conversion() {
        let json = r#"{
            "id": 7,
            "delimiter_type": "wheel_stopper",
            "start": {"x": 4.0, "y": -1.0},
            "end": {"x": 4.0, "y": 1.0}
        }"#;
        let delimiter: PclDelimiter = serde_json::from_str(json).unwrap();
        assert_eq!(delimiter.delimiter_type, DelimiterType::WheelStopper);
        assert_eq!(delimiter.confidence, 1.0);

        let line = VehicleLine::from_cem_pcl(&delimiter);
        assert_eq!(line.start, VehiclePoint::new(4.0, -1.0));
        assert_eq!(line.end, VehiclePoint::new(4.0, 1.0));
    }

    #[test]
    fn test_unknown_delimiter_type() {
        let json = r#"{"id": 1, "delimiter_type": "bollard",
            "start": {"x": 0.0, "y": 0.0}, "end": {"x": 1.0, "y": 0.0}}"#;
        let delimiter: PclDelimiter = serde_json::from_str(json).unwrap();
        assert_eq!(delimiter.delimiter_type, DelimiterType::Unknown);
    }

    #[test]
    fn test_pmd_line_conversion() {
        let pmd = PmdLine {
            id: 3,
            start: VehiclePoint::new(1.0, 2.0),
            end: VehiclePoint::new(6.0, 2.0),
            confidence: 0.8,
        };
        let line: VehicleLine = (&pmd).into();
        assert_eq!(line, VehicleLine::new(pmd.start, pmd.end));
    }
}
