//! Directed line segments and association metrics

use serde::{Deserialize, Serialize};

use crate::point::{Vector2, VehiclePoint};
use crate::GeometryError;

/// Ground truth lines with a squared length at or below this are never matched
pub const MIN_MATCHABLE_LEN2: f64 = 0.01;

/// Shortest distance from `p` to the segment `a`-`b`.
///
/// When the foot of the perpendicular falls outside the segment the distance
/// to the nearer endpoint is returned instead.
pub fn segment_point_distance(
    a: VehiclePoint,
    b: VehiclePoint,
    p: VehiclePoint,
) -> Result<f64, GeometryError> {
    if p == a || p == b {
        return Ok(0.0);
    }

    let ab = b - a;
    let ab_norm = ab.norm();
    if ab_norm == 0.0 {
        return Err(GeometryError::degenerate("segment_point_distance"));
    }

    // Angle at A above 90 degrees: P lies beyond A
    let ap = p - a;
    if ap.dot(&ab) < 0.0 {
        return Ok(ap.norm());
    }

    // Angle at B above 90 degrees: P lies beyond B
    let bp = p - b;
    if bp.dot(&(a - b)) < 0.0 {
        return Ok(bp.norm());
    }

    Ok((a - b).cross(&(a - p)).abs() / ab_norm)
}

/// Pair of endpoint distances between a detection and a reference line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDistances {
    /// Distance measured at the detection start point
    pub start: f64,
    /// Distance measured at the detection end point
    pub end: f64,
}

impl LineDistances {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Mean of both endpoint distances
    pub fn average(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Directed segment in the vehicle frame (delimiter, wheel stopper edge, ...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleLine {
    pub start: VehiclePoint,
    pub end: VehiclePoint,
}

impl VehicleLine {
    pub const fn new(start: VehiclePoint, end: VehiclePoint) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    /// Squared length
    pub fn len2(&self) -> f64 {
        self.direction().norm2()
    }

    /// Same segment with start and end exchanged
    pub fn reversed(&self) -> VehicleLine {
        VehicleLine::new(self.end, self.start)
    }

    /// Whether the segment is long enough to take part in matching
    pub fn is_matchable(&self) -> bool {
        self.len2() > MIN_MATCHABLE_LEN2
    }

    /// Approximate "is between" test: `p` lies inside the circle that has
    /// this segment as its diameter.
    pub fn is_point_inside(&self, p: &VehiclePoint) -> bool {
        self.start.distance2(p) + self.end.distance2(p) <= self.len2()
    }

    /// Perpendicular distance from `p` to the supporting line if `p` lies
    /// within the segment span, else the distance to the nearer endpoint.
    pub fn hangout_distance_point(&self, p: &VehiclePoint) -> Result<f64, GeometryError> {
        let direction = self.direction();
        let length = direction.norm();
        if length == 0.0 {
            return Err(GeometryError::degenerate("hangout_distance_point"));
        }

        if self.is_point_inside(p) {
            Ok(direction.cross(&(*p - self.start)).abs() / length)
        } else {
            Ok(self.simple_distance_endpoint(p))
        }
    }

    /// Orient this line so that its start corresponds to `reference.start`.
    ///
    /// Endpoints are exchanged only when the crossed pairing is strictly
    /// closer than the direct one.
    pub fn swap_line_end_points(&self, reference: &VehicleLine) -> VehicleLine {
        let direct = self.start.distance_to(&reference.start) + self.end.distance_to(&reference.end);
        let crossed = self.start.distance_to(&reference.end) + self.end.distance_to(&reference.start);
        if crossed < direct {
            self.reversed()
        } else {
            *self
        }
    }

    /// Hangout distances of both endpoints to `gt_line`
    pub fn hangout_distance_line(&self, gt_line: &VehicleLine) -> Result<LineDistances, GeometryError> {
        let oriented = self.swap_line_end_points(gt_line);
        Ok(LineDistances::new(
            gt_line.hangout_distance_point(&oriented.start)?,
            gt_line.hangout_distance_point(&oriented.end)?,
        ))
    }

    /// Euclidean distances between paired endpoints
    pub fn simple_endpoint_distance_line(&self, other: &VehicleLine) -> LineDistances {
        let oriented = self.swap_line_end_points(other);
        LineDistances::new(
            oriented.start.distance_to(&other.start),
            oriented.end.distance_to(&other.end),
        )
    }

    /// Distance from `p` to the nearer endpoint
    pub fn simple_distance_endpoint(&self, p: &VehiclePoint) -> f64 {
        self.start.distance_to(p).min(self.end.distance_to(p))
    }

    /// Angle between the two segments in degrees, folded into [0, 90]
    pub fn angle(&self, other: &VehicleLine) -> Result<f64, GeometryError> {
        let u = self.direction().normalized("angle")?;
        let v = other.direction().normalized("angle")?;
        let degrees = u.dot(&v).clamp(-1.0, 1.0).acos().to_degrees();
        if degrees > 90.0 {
            Ok(180.0 - degrees)
        } else {
            Ok(degrees)
        }
    }

    /// Intersection point of the two supporting lines.
    ///
    /// Not bounded to either segment; check with `is_point_inside`.
    pub fn seg_intersect(&self, other: &VehicleLine) -> Result<VehiclePoint, GeometryError> {
        let da = self.direction();
        let db = other.direction();
        if da.norm2() == 0.0 || db.norm2() == 0.0 {
            return Err(GeometryError::degenerate("seg_intersect"));
        }

        let dp = self.start - other.start;
        let dap = da.perp();
        let denom = dap.dot(&db);
        if denom.abs() <= f64::EPSILON * da.norm() * db.norm() {
            return Err(GeometryError::ParallelLines);
        }

        let num = dap.dot(&dp);
        Ok(other.start + db * (num / denom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> VehicleLine {
        VehicleLine::new(VehiclePoint::new(x1, y1), VehiclePoint::new(x2, y2))
    }

    #[test]
    fn test_segment_point_distance_perpendicular() {
        let d = segment_point_distance(
            VehiclePoint::new(0.0, 0.0),
            VehiclePoint::new(2.0, 0.0),
            VehiclePoint::new(1.0, 1.5),
        )
        .unwrap();
        assert!((d - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_segment_point_distance_beyond_endpoints() {
        let a = VehiclePoint::new(0.0, 0.0);
        let b = VehiclePoint::new(2.0, 0.0);
        let before = segment_point_distance(a, b, VehiclePoint::new(-3.0, 4.0)).unwrap();
        let after = segment_point_distance(a, b, VehiclePoint::new(5.0, 4.0)).unwrap();
        assert!((before - 5.0).abs() < 1e-12);
        assert!((after - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_point_distance_endpoint_is_zero() {
        let a = VehiclePoint::new(1.0, 1.0);
        let b = VehiclePoint::new(1.0, 1.0);
        // Coincident endpoint short-circuits before the degenerate check
        assert_eq!(segment_point_distance(a, b, a).unwrap(), 0.0);
        assert!(segment_point_distance(a, b, VehiclePoint::new(2.0, 2.0)).is_err());
    }

    #[test]
    fn test_is_point_inside() {
        let l = line(0.0, 0.0, 2.0, 0.0);
        assert!(l.is_point_inside(&VehiclePoint::new(1.0, 0.5)));
        assert!(l.is_point_inside(&VehiclePoint::new(0.0, 0.0)));
        assert!(!l.is_point_inside(&VehiclePoint::new(2.5, 0.0)));
        assert!(!l.is_point_inside(&VehiclePoint::new(1.0, 1.5)));
    }

    #[test]
    fn test_hangout_distance_point() {
        let l = line(0.0, 0.0, 4.0, 0.0);
        assert!((l.hangout_distance_point(&VehiclePoint::new(2.0, 0.3)).unwrap() - 0.3).abs() < 1e-12);
        // Outside the span: nearest endpoint
        assert!((l.hangout_distance_point(&VehiclePoint::new(7.0, 4.0)).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_hangout_distance_point_degenerate() {
        let l = line(1.0, 1.0, 1.0, 1.0);
        let err = l.hangout_distance_point(&VehiclePoint::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_swap_line_end_points() {
        let gt = line(0.0, 0.0, 5.0, 0.0);
        let det = line(5.0, 0.2, 0.0, 0.1);
        let oriented = det.swap_line_end_points(&gt);
        assert_eq!(oriented, det.reversed());
        // Already aligned: untouched
        assert_eq!(oriented.swap_line_end_points(&gt), oriented);
    }

    #[test]
    fn test_hangout_distance_line_resolves_endpoint_order() {
        let gt = line(0.0, 0.0, 5.0, 0.0);
        let det = line(5.0, 0.2, 0.0, 0.1);
        let distances = det.hangout_distance_line(&gt).unwrap();
        assert!((distances.start - 0.1).abs() < 1e-12);
        assert!((distances.end - 0.2).abs() < 1e-12);
        assert!((distances.average() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_simple_endpoint_distances() {
        let gt = line(0.0, 0.0, 4.0, 0.0);
        let det = line(4.0, 3.0, 0.0, 1.0);
        let distances = det.simple_endpoint_distance_line(&gt);
        assert!((distances.start - 1.0).abs() < 1e-12);
        assert!((distances.end - 3.0).abs() < 1e-12);
        assert!((gt.simple_distance_endpoint(&VehiclePoint::new(4.0, 2.0)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_folds_direction() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(1.0, 0.0, 0.0, 0.0);
        let c = line(0.0, 0.0, 1.0, 1.0);
        assert!(a.angle(&b).unwrap().abs() < 1e-9);
        assert!((a.angle(&c).unwrap() - 45.0).abs() < 1e-9);
        assert!((b.angle(&c).unwrap() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_zero_length_is_error() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(2.0, 2.0, 2.0, 2.0);
        assert!(a.angle(&b).is_err());
    }

    #[test]
    fn test_seg_intersect() {
        let a = line(0.0, 0.0, 2.0, 2.0);
        let b = line(0.0, 2.0, 2.0, 0.0);
        let p = a.seg_intersect(&b).unwrap();
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_seg_intersect_unbounded() {
        // Supporting lines meet outside both segments
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(5.0, 1.0, 5.0, 2.0);
        let p = a.seg_intersect(&b).unwrap();
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(!a.is_point_inside(&p));
    }

    #[test]
    fn test_seg_intersect_parallel() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(0.0, 1.0, 1.0, 1.0);
        assert_eq!(a.seg_intersect(&b).unwrap_err(), GeometryError::ParallelLines);
    }

    #[test]
    fn test_matchable_threshold() {
        assert!(!line(0.0, 0.0, 0.099, 0.0).is_matchable());
        assert!(line(0.0, 0.0, 0.101, 0.0).is_matchable());

        // 0.06² + 0.08² is exactly 0.01 in f64
        let at_threshold = line(0.0, 0.0, 0.06, 0.08);
        assert_eq!(at_threshold.len2(), MIN_MATCHABLE_LEN2);
        assert!(!at_threshold.is_matchable());

        // 0.1² rounds just above the threshold
        assert!(line(0.0, 0.0, 0.1, 0.0).is_matchable());
        assert!(!line(0.0, 0.0, 0.0, 0.0).is_matchable());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f64> {
            -50.0..50.0f64
        }

        proptest! {
            #[test]
            fn points_on_segment_have_zero_distance(
                ax in coord(), ay in coord(), bx in coord(), by in coord(), t in 0.0..=1.0f64,
            ) {
                let a = VehiclePoint::new(ax, ay);
                let b = VehiclePoint::new(bx, by);
                prop_assume!(a.distance_to(&b) > 0.1);
                let p = a + (b - a) * t;
                let d = segment_point_distance(a, b, p).unwrap();
                prop_assert!(d < 1e-8);
            }

            #[test]
            fn feet_outside_segment_use_nearest_endpoint(
                ax in coord(), ay in coord(), bx in coord(), by in coord(),
                t in 1.01..5.0f64, offset in -10.0..10.0f64, before in any::<bool>(),
            ) {
                let a = VehiclePoint::new(ax, ay);
                let b = VehiclePoint::new(bx, by);
                prop_assume!(a.distance_to(&b) > 0.1);
                let along = if before { -t + 1.0 } else { t };
                let normal = (b - a).perp().normalized("test").unwrap();
                let p = a + (b - a) * along + normal * offset;
                let expected = a.distance_to(&p).min(b.distance_to(&p));
                let d = segment_point_distance(a, b, p).unwrap();
                prop_assert!((d - expected).abs() < 1e-9);
            }

            #[test]
            fn angle_is_symmetric_and_folded(
                ax in coord(), ay in coord(), bx in coord(), by in coord(),
                cx in coord(), cy in coord(), dx in coord(), dy in coord(),
            ) {
                let l1 = line(ax, ay, bx, by);
                let l2 = line(cx, cy, dx, dy);
                prop_assume!(l1.len2() > 1e-6 && l2.len2() > 1e-6);
                let forward = l1.angle(&l2).unwrap();
                let backward = l2.angle(&l1).unwrap();
                prop_assert_eq!(forward, backward);
                prop_assert!((0.0..=90.0).contains(&forward));
            }
        }
    }
}
