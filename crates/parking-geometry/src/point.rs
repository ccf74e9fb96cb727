//! Vehicle-frame points and 2-vectors

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Point in the ego-vehicle planar frame (meters, x forward, y left)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclePoint {
    pub x: f64,
    pub y: f64,
}

impl VehiclePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point
    pub fn distance2(&self, other: &VehiclePoint) -> f64 {
        (*self - *other).norm2()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &VehiclePoint) -> f64 {
        (*self - *other).norm()
    }
}

impl Sub for VehiclePoint {
    type Output = Vector2;

    fn sub(self, rhs: VehiclePoint) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector2> for VehiclePoint {
    type Output = VehiclePoint;

    fn add(self, rhs: Vector2) -> VehiclePoint {
        VehiclePoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector2> for VehiclePoint {
    type Output = VehiclePoint;

    fn sub(self, rhs: Vector2) -> VehiclePoint {
        VehiclePoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl IntoIterator for VehiclePoint {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.x, self.y].into_iter()
    }
}

/// Free 2-vector, the difference of two points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product
    pub fn cross(&self, other: &Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Rotated 90 degrees counter-clockwise
    pub fn perp(&self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    /// Unit vector in the same direction
    pub fn normalized(&self, operation: &'static str) -> Result<Vector2, GeometryError> {
        let norm = self.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(GeometryError::degenerate(operation));
        }
        Ok(Vector2::new(self.x / norm, self.y / norm))
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_subtraction_yields_vector() {
        let v = VehiclePoint::new(3.0, 5.0) - VehiclePoint::new(1.0, 1.0);
        assert_eq!(v, Vector2::new(2.0, 4.0));
    }

    #[test]
    fn test_point_iterates_x_then_y() {
        let coords: Vec<f64> = VehiclePoint::new(1.5, -2.0).into_iter().collect();
        assert_eq!(coords, vec![1.5, -2.0]);
    }

    #[test]
    fn test_cross_and_perp() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 2.0);
        assert_eq!(a.cross(&b), 2.0);
        assert_eq!(a.perp(), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_normalize_zero_vector_is_degenerate() {
        let err = Vector2::default().normalized("test").unwrap_err();
        assert_eq!(err, GeometryError::DegenerateGeometry { operation: "test" });
    }

    #[test]
    fn test_distance() {
        let a = VehiclePoint::new(0.0, 0.0);
        let b = VehiclePoint::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((a.distance2(&b) - 25.0).abs() < 1e-12);
    }
}
