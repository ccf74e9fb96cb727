//! Tolerance rectangle around a ground-truth line
//!
//! A detection is a true positive when it crosses the rectangle or has an
//! endpoint inside it.

use serde::{Deserialize, Serialize};

use crate::line::VehicleLine;
use crate::point::VehiclePoint;
use crate::GeometryError;

/// Default half-width of the boundary rectangle (meters)
pub const BOUNDARY_RADIUS_M: f64 = 0.5;

/// Boundary construction settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Offset of the rectangle from the line, along the line and across it (meters)
    pub radius_m: f64,

    /// Also test the closing edge (corner 3 back to corner 0) in `line_crossing`.
    /// Off by default so results stay comparable with existing KPI baselines.
    pub close_boundary: bool,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            radius_m: BOUNDARY_RADIUS_M,
            close_boundary: false,
        }
    }
}

/// Oriented rectangle around a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBoundary {
    /// Corners in order around the rectangle
    pub corners: [VehiclePoint; 4],
    close_boundary: bool,
}

impl LineBoundary {
    /// Build the boundary with the default 0.5 m radius
    pub fn for_line(line: &VehicleLine) -> Result<Self, GeometryError> {
        Self::for_line_with(line, &BoundaryConfig::default())
    }

    /// Build the boundary with explicit settings
    pub fn for_line_with(line: &VehicleLine, config: &BoundaryConfig) -> Result<Self, GeometryError> {
        let direction = line.direction().normalized("LineBoundary::for_line")? * config.radius_m;
        let normal = direction.perp();

        Ok(Self {
            corners: [
                line.start - direction + normal,
                line.end + direction + normal,
                line.end + direction - normal,
                line.start - direction - normal,
            ],
            close_boundary: config.close_boundary,
        })
    }

    /// Edges tested by `line_crossing`
    pub fn edges(&self) -> impl Iterator<Item = VehicleLine> + '_ {
        let open = self
            .corners
            .windows(2)
            .map(|pair| VehicleLine::new(pair[0], pair[1]));
        let closing = self
            .close_boundary
            .then(|| VehicleLine::new(self.corners[3], self.corners[0]));
        open.chain(closing)
    }

    /// Point-in-rectangle test, inclusive of the edges
    pub fn point_in(&self, point: &VehiclePoint) -> bool {
        let [c0, c1, _, c3] = self.corners;
        let ab = c1 - c0;
        let ad = c3 - c0;
        let am = *point - c0;

        let along = am.dot(&ab);
        let across = am.dot(&ad);
        (0.0..=ab.norm2()).contains(&along) && (0.0..=ad.norm2()).contains(&across)
    }

    /// Whether `line` intersects one of the boundary edges
    pub fn line_crossing(&self, line: &VehicleLine) -> bool {
        self.edges().any(|edge| match edge.seg_intersect(line) {
            Ok(p) => edge.is_point_inside(&p) && line.is_point_inside(&p),
            Err(_) => false,
        })
    }

    /// Line crosses the boundary or has an endpoint inside it
    pub fn true_positive(&self, line: &VehicleLine) -> bool {
        self.line_crossing(line) || self.point_in(&line.start) || self.point_in(&line.end)
    }

    pub fn false_positive(&self, line: &VehicleLine) -> bool {
        !self.true_positive(line)
    }
}
