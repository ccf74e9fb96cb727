//! Parking Geometry
//!
//! Planar geometry used to associate detected parking-slot delimiters,
//! wheel stoppers and painted lines with ground truth:
//! - Vehicle-frame points and segments
//! - Hangout, endpoint and angle metrics
//! - Tolerance rectangle around a ground-truth line
//! - Geodetic ground truth to vehicle frame transform
//! - CEM detection records

pub mod boundary;
pub mod cem;
pub mod geodetic;
pub mod line;
pub mod point;

mod error;

pub use boundary::{BoundaryConfig, LineBoundary, BOUNDARY_RADIUS_M};
pub use cem::{DelimiterType, PclDelimiter, PmdLine};
pub use error::GeometryError;
pub use geodetic::{Enu, EnuConverter, GeoPoint, GtLine, LocalTangentPlane};
pub use line::{segment_point_distance, LineDistances, VehicleLine, MIN_MATCHABLE_LEN2};
pub use point::{Vector2, VehiclePoint};
