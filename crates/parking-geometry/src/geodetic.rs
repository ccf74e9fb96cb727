//! Geodetic ground truth and its projection into the vehicle frame

use serde::{Deserialize, Serialize};

use crate::line::VehicleLine;
use crate::point::VehiclePoint;

/// WGS-84 semi-major axis (meters)
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Geodetic coordinate (degrees, degrees, meters above ellipsoid)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub height: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }

    /// Earth-centered, earth-fixed coordinates (meters)
    fn to_ecef(self) -> [f64; 3] {
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let (sin_lat, cos_lat) = self.lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = self.lon.to_radians().sin_cos();
        let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        [
            (n + self.height) * cos_lat * cos_lon,
            (n + self.height) * cos_lat * sin_lon,
            (n * (1.0 - e2) + self.height) * sin_lat,
        ]
    }
}

/// Local east/north/up offset (meters)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

/// Converts geodetic coordinates into a local east/north/up frame
pub trait EnuConverter {
    fn to_enu(&self, point: &GeoPoint) -> Enu;
}

/// Tangent plane anchored at a reference position, usually the ego GPS fix
#[derive(Debug, Clone, Copy)]
pub struct LocalTangentPlane {
    origin_ecef: [f64; 3],
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl LocalTangentPlane {
    pub fn new(origin: GeoPoint) -> Self {
        let (sin_lat, cos_lat) = origin.lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = origin.lon.to_radians().sin_cos();
        Self {
            origin_ecef: origin.to_ecef(),
            sin_lat,
            cos_lat,
            sin_lon,
            cos_lon,
        }
    }
}

impl EnuConverter for LocalTangentPlane {
    fn to_enu(&self, point: &GeoPoint) -> Enu {
        let ecef = point.to_ecef();
        let dx = ecef[0] - self.origin_ecef[0];
        let dy = ecef[1] - self.origin_ecef[1];
        let dz = ecef[2] - self.origin_ecef[2];

        Enu {
            east: -self.sin_lon * dx + self.cos_lon * dy,
            north: -self.sin_lat * self.cos_lon * dx - self.sin_lat * self.sin_lon * dy
                + self.cos_lat * dz,
            up: self.cos_lat * self.cos_lon * dx + self.cos_lat * self.sin_lon * dy + self.sin_lat * dz,
        }
    }
}

/// Ground-truth line with geodetic endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GtLine {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl GtLine {
    pub const fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    /// Project into the vehicle frame (x forward, y left).
    ///
    /// `yaw` is the vehicle heading in radians, counter-clockwise from east.
    pub fn to_vehicle<C: EnuConverter + ?Sized>(&self, gps: &C, yaw: f64) -> VehicleLine {
        VehicleLine::new(
            enu_to_vehicle(gps.to_enu(&self.start), yaw),
            enu_to_vehicle(gps.to_enu(&self.end), yaw),
        )
    }
}

fn enu_to_vehicle(enu: Enu, yaw: f64) -> VehiclePoint {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    VehiclePoint::new(
        enu.east * cos_yaw + enu.north * sin_yaw,
        -enu.east * sin_yaw + enu.north * cos_yaw,
    )
}
