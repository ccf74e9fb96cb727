//! Frame and recording evaluation

use std::path::Path;

use association::{Association, DetectionMatch, GeometryError, MatchResult};
use metrics::{counter, histogram};
use parking_geometry::VehicleLine;
use recording::{Frame, GroundTruth, Recording};
use tracing::{debug, info, warn};

use crate::{FrameKpi, KpiConfig, KpiError, KpiSummary};

/// Evaluates recordings against ground truth
pub struct KpiEvaluator {
    config: KpiConfig,
    association: Association,
}

impl KpiEvaluator {
    pub fn new(config: KpiConfig) -> Self {
        info!("Creating KPI evaluator with config: {:?}", config);
        Self {
            association: Association::new(config.association),
            config,
        }
    }

    /// Load a recording file and evaluate it
    pub fn evaluate_file(&self, path: impl AsRef<Path>) -> Result<KpiSummary, KpiError> {
        let recording = Recording::load(path)?;
        self.evaluate(&recording)
    }

    /// Evaluate every frame of a recording
    pub fn evaluate(&self, recording: &Recording) -> Result<KpiSummary, KpiError> {
        let frame_results: Vec<FrameKpi> = recording
            .frames
            .iter()
            .map(|frame| self.evaluate_frame(frame, &recording.ground_truth))
            .collect();

        if frame_results.iter().all(|f| f.ground_truth == 0) {
            return Err(KpiError::NoGroundTruth(recording.name.clone()));
        }

        let summary = KpiSummary::from_frames(&recording.name, frame_results, &self.config);
        info!(
            "Recording {}: precision {:.3}, recall {:.3}, mean hangout {:.3} m, passed: {}",
            summary.recording,
            summary.precision,
            summary.recall,
            summary.mean_hangout_m,
            summary.verdict.is_passed()
        );
        Ok(summary)
    }

    /// Associate the detections of one frame with its ground truth
    pub fn evaluate_frame(&self, frame: &Frame, ground_truth: &GroundTruth) -> FrameKpi {
        let detected = frame.detected_lines(self.config.detection_source, self.config.min_confidence);
        let gt_lines = frame.ground_truth_lines(ground_truth);
        let mut kpi = self.evaluate_lines(&gt_lines, &detected);
        kpi.timestamp_us = frame.timestamp_us;

        counter!("kpi_frames_evaluated_total").increment(1);
        counter!("kpi_true_positive_total").increment(kpi.true_positives as u64);
        counter!("kpi_false_positive_total").increment(kpi.false_positives as u64);
        counter!("kpi_missed_total").increment(kpi.missed as u64);

        debug!(
            "Frame {}: {} detections, {} TP, {} FP, {} missed",
            frame.timestamp_us, kpi.detections, kpi.true_positives, kpi.false_positives, kpi.missed
        );
        kpi
    }

    /// Associate detections with vehicle-frame ground truth.
    ///
    /// Each detection is paired with its nearest ground truth line and
    /// judged with the configured strategy. Detections the geometry cannot
    /// evaluate count as false positives.
    pub fn evaluate_lines(&self, gt_lines: &[VehicleLine], detected: &[VehicleLine]) -> FrameKpi {
        let mut kpi = FrameKpi {
            detections: detected.len(),
            ground_truth: gt_lines.iter().filter(|l| l.is_matchable()).count(),
            ..Default::default()
        };
        let mut gt_detected = vec![false; gt_lines.len()];

        for (detection_index, line) in detected.iter().enumerate() {
            match self.associate(gt_lines, line) {
                Ok((gt_index, result)) => {
                    if result.is_match {
                        kpi.true_positives += 1;
                        kpi.distance_sum += result.dist_avg;
                        histogram!("kpi_hangout_distance_m").record(result.dist_avg);
                        if let Some(index) = gt_index {
                            gt_detected[index] = true;
                        }
                    } else {
                        kpi.false_positives += 1;
                    }
                    kpi.matches.push(DetectionMatch {
                        detection_index,
                        gt_index,
                        result,
                    });
                }
                Err(err) => {
                    warn!("Detection {} could not be associated: {}", detection_index, err);
                    kpi.false_positives += 1;
                    kpi.degenerate_detections += 1;
                    kpi.matches.push(DetectionMatch {
                        detection_index,
                        gt_index: None,
                        result: MatchResult::no_match(),
                    });
                }
            }
        }

        kpi.missed = gt_lines
            .iter()
            .zip(&gt_detected)
            .filter(|(line, detected)| line.is_matchable() && !**detected)
            .count();
        kpi
    }

    fn associate(
        &self,
        gt_lines: &[VehicleLine],
        line: &VehicleLine,
    ) -> Result<(Option<usize>, MatchResult), GeometryError> {
        // Zero-length detections are degenerate regardless of strategy
        if line.len2() == 0.0 {
            return Err(GeometryError::DegenerateGeometry {
                operation: "KpiEvaluator::associate",
            });
        }

        match self.association.nearest_ground_truth(gt_lines, line)? {
            Some((index, _)) => {
                let result = self.association.match_lines(&gt_lines[index], line)?;
                Ok((Some(index), result))
            }
            None => Ok((None, MatchResult::no_match())),
        }
    }
}
