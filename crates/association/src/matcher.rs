//! Association strategies

use std::cmp::Ordering;

use parking_geometry::{GeometryError, LineBoundary, LineDistances, VehicleLine};
use tracing::{debug, trace};

use crate::config::{AlgoType, AssociationConfig, CandidateSelection};
use crate::result::{DetectionMatch, MatchResult};

/// Stateless association service
#[derive(Debug, Clone, Default)]
pub struct Association {
    config: AssociationConfig,
}

impl Association {
    pub fn new(config: AssociationConfig) -> Self {
        Self { config }
    }

    /// Match one detection against one ground-truth line with the configured
    /// strategy. Ground truth too short to match yields `no_match`.
    pub fn match_lines(
        &self,
        gt_line: &VehicleLine,
        detected_line: &VehicleLine,
    ) -> Result<MatchResult, GeometryError> {
        self.match_with(gt_line, detected_line, self.config.algo)
    }

    /// Same as `match_lines` with an explicit strategy
    pub fn match_with(
        &self,
        gt_line: &VehicleLine,
        detected_line: &VehicleLine,
        algo: AlgoType,
    ) -> Result<MatchResult, GeometryError> {
        if !gt_line.is_matchable() {
            trace!("Ground truth too short to match: len2 {}", gt_line.len2());
            return Ok(MatchResult::no_match());
        }

        match algo {
            AlgoType::HangoutAngle => self.hangout_and_angle_match(gt_line, detected_line),
            AlgoType::Rectangle => self.rectangle_match(gt_line, detected_line),
        }
    }

    /// Average hangout distance and angle both within thresholds
    pub fn hangout_and_angle_match(
        &self,
        gt_line: &VehicleLine,
        detected_line: &VehicleLine,
    ) -> Result<MatchResult, GeometryError> {
        let distances = detected_line.hangout_distance_line(gt_line)?;
        let angle = detected_line.angle(gt_line)?;
        let is_match = distances.average() <= self.config.hangout_threshold_m
            && angle <= self.config.angle_threshold_deg;

        debug!(
            "Hangout/angle match: avg {:.3} m, angle {:.2} deg -> {}",
            distances.average(),
            angle,
            is_match
        );
        Ok(MatchResult::new(is_match, distances))
    }

    /// Detection crosses or touches the tolerance rectangle of `gt_line`
    pub fn rectangle_match(
        &self,
        gt_line: &VehicleLine,
        detected_line: &VehicleLine,
    ) -> Result<MatchResult, GeometryError> {
        let boundary = LineBoundary::for_line_with(gt_line, &self.config.boundary)?;
        let is_match = boundary.true_positive(detected_line);
        let distances = detected_line.hangout_distance_line(gt_line)?;

        debug!("Rectangle match: avg {:.3} m -> {}", distances.average(), is_match);
        Ok(MatchResult::new(is_match, distances))
    }

    /// Nearest ground-truth line for each detection, classified by the
    /// tolerance rectangle.
    pub fn simple_match(
        &self,
        gt_lines: &[VehicleLine],
        detected_lines: &[VehicleLine],
    ) -> Result<Vec<DetectionMatch>, GeometryError> {
        self.match_each(gt_lines, detected_lines, |gt, detected, _| {
            let boundary = LineBoundary::for_line_with(gt, &self.config.boundary)?;
            Ok(boundary.true_positive(detected))
        })
    }

    /// Nearest ground-truth line for each detection, matched when its
    /// average hangout distance is within the threshold.
    pub fn hangout_match(
        &self,
        gt_lines: &[VehicleLine],
        detected_lines: &[VehicleLine],
    ) -> Result<Vec<DetectionMatch>, GeometryError> {
        let threshold = self.config.hangout_threshold_m;
        self.match_each(gt_lines, detected_lines, |_, _, distances| {
            Ok(distances.average() <= threshold)
        })
    }

    /// Index and hangout distances of the ground-truth line nearest to
    /// `detected_line`. Lines too short to match are skipped.
    pub fn nearest_ground_truth(
        &self,
        gt_lines: &[VehicleLine],
        detected_line: &VehicleLine,
    ) -> Result<Option<(usize, LineDistances)>, GeometryError> {
        let mut best: Option<(usize, LineDistances)> = None;

        for (index, gt_line) in gt_lines.iter().enumerate() {
            if !gt_line.is_matchable() {
                continue;
            }
            let distances = detected_line.hangout_distance_line(gt_line)?;
            let closer = match &best {
                None => true,
                Some((_, current)) => {
                    compare(self.config.selection, &distances, current) == Ordering::Less
                }
            };
            if closer {
                best = Some((index, distances));
            }
        }

        Ok(best)
    }

    fn match_each<F>(
        &self,
        gt_lines: &[VehicleLine],
        detected_lines: &[VehicleLine],
        accept: F,
    ) -> Result<Vec<DetectionMatch>, GeometryError>
    where
        F: Fn(&VehicleLine, &VehicleLine, &LineDistances) -> Result<bool, GeometryError>,
    {
        let mut matches = Vec::with_capacity(detected_lines.len());

        for (detection_index, detected_line) in detected_lines.iter().enumerate() {
            let entry = match self.nearest_ground_truth(gt_lines, detected_line)? {
                Some((gt_index, distances)) => {
                    let is_match = accept(&gt_lines[gt_index], detected_line, &distances)?;
                    DetectionMatch {
                        detection_index,
                        gt_index: Some(gt_index),
                        result: MatchResult::new(is_match, distances),
                    }
                }
                None => DetectionMatch {
                    detection_index,
                    gt_index: None,
                    result: MatchResult::no_match(),
                },
            };
            matches.push(entry);
        }

        debug!(
            "Associated {} detections against {} ground truth lines",
            detected_lines.len(),
            gt_lines.len()
        );
        Ok(matches)
    }
}

fn compare(selection: CandidateSelection, a: &LineDistances, b: &LineDistances) -> Ordering {
    match selection {
        CandidateSelection::AverageDistance => a.average().total_cmp(&b.average()),
        CandidateSelection::Lexicographic => a
            .start
            .total_cmp(&b.start)
            .then_with(|| a.end.total_cmp(&b.end)),
    }
}
