//! # Geographic Utilities
//!
//! Geometric primitives shared by course resolution, layout and lie classification.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two coordinates |
//! | [`is_in_circle`] | Inclusive radius test around a center |
//! | [`point_in_polygon`] | Containment in a (possibly unclosed) ring |
//! | [`polygon_centroid`] | Vertex-mean center of a ring |
//! | [`squared_degree_distance`] | Cheap planar proximity metric in degrees |
//! | [`compute_bounds`] | North/south/east/west box over a set of points |
//! | [`midpoint`] | Planar midpoint of two coordinates |
//!
//! ## Example
//!
//! ```rust
//! use course_geometry::{Coordinate, Meters, geo_utils};
//!
//! let tee = Coordinate::new(51.5074, -0.1278);
//! let green = Coordinate::new(51.5090, -0.1300);
//!
//! let dist = geo_utils::haversine_distance(&tee, &green);
//! assert!(dist > 200.0 && dist < 250.0);
//!
//! assert!(geo_utils::is_in_circle(&green, &green, Meters(0.0)));
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Planar polygon math
//!
//! Containment and centroid work directly on degrees, treating latitude and
//! longitude as a flat plane. A golf course spans well under a kilometer, so the
//! distortion is negligible next to GPS error. Distances always go through the
//! haversine formula.

use geo::{Contains, Coord, Distance, Haversine, LineString, Point, Polygon};
use crate::{Bounds, Coordinate, Meters};

// =============================================================================
// Distance Functions
// =============================================================================

/// Great-circle distance between two coordinates, in meters.
///
/// Symmetric, non-negative and zero for identical points.
///
/// # Example
///
/// ```rust
/// use course_geometry::{Coordinate, geo_utils};
///
/// let london = Coordinate::new(51.5074, -0.1278);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0);
/// ```
#[inline]
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let point1 = Point::new(a.longitude, a.latitude);
    let point2 = Point::new(b.longitude, b.latitude);
    Haversine::distance(point1, point2)
}

/// Check whether `point` lies within `radius` of `center`. The boundary is inclusive.
#[inline]
pub fn is_in_circle(point: &Coordinate, center: &Coordinate, radius: Meters) -> bool {
    haversine_distance(point, center) <= radius.0
}

/// Planar squared distance in degrees.
///
/// Only meaningful for comparing proximity between nearby points (label
/// placement, nearest-hole lookups). Not a length.
#[inline]
pub fn squared_degree_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = a.latitude - b.latitude;
    let d_lng = a.longitude - b.longitude;
    d_lat * d_lat + d_lng * d_lng
}

// =============================================================================
// Polygon Functions
// =============================================================================

/// Test whether a point lies inside a ring.
///
/// The ring may be open or explicitly closed; it is always treated as closed by
/// wrapping from the last vertex back to the first. Rings with fewer than three
/// vertices contain nothing.
///
/// # Example
///
/// ```rust
/// use course_geometry::{Coordinate, geo_utils};
///
/// let square = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(1.0, 1.0),
///     Coordinate::new(1.0, 0.0),
/// ];
///
/// assert!(geo_utils::point_in_polygon(&Coordinate::new(0.5, 0.5), &square));
/// assert!(!geo_utils::point_in_polygon(&Coordinate::new(1.5, 0.5), &square));
/// assert!(!geo_utils::point_in_polygon(&Coordinate::new(0.5, 0.5), &square[..2]));
/// ```
pub fn point_in_polygon(point: &Coordinate, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 || !point.is_finite() {
        return false;
    }
    to_geo_polygon(ring).contains(&Point::new(point.longitude, point.latitude))
}

/// Convert a ring of coordinates to a `geo` polygon (x = longitude, y = latitude).
///
/// `Polygon::new` closes the exterior itself, so open rings are fine.
pub(crate) fn to_geo_polygon(ring: &[Coordinate]) -> Polygon<f64> {
    let coords: Vec<Coord> = ring
        .iter()
        .map(|c| Coord { x: c.longitude, y: c.latitude })
        .collect();
    Polygon::new(LineString::new(coords), vec![])
}

/// Arithmetic mean of a ring's vertices.
///
/// This is not the area-weighted centroid; it is only used to anchor labels.
/// An empty ring yields `(0, 0)`.
pub fn polygon_centroid(ring: &[Coordinate]) -> Coordinate {
    if ring.is_empty() {
        return Coordinate::new(0.0, 0.0);
    }

    let sum_lat: f64 = ring.iter().map(|p| p.latitude).sum();
    let sum_lng: f64 = ring.iter().map(|p| p.longitude).sum();
    let n = ring.len() as f64;

    Coordinate::new(sum_lat / n, sum_lng / n)
}

/// Planar midpoint of two coordinates.
#[inline]
pub fn midpoint(a: &Coordinate, b: &Coordinate) -> Coordinate {
    Coordinate::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}

// =============================================================================
// Bounding Box Functions
// =============================================================================

/// Compute the bounding box of a set of coordinates.
///
/// Returns `None` for empty input.
///
/// ```rust
/// use course_geometry::{Coordinate, geo_utils};
///
/// let points = vec![
///     Coordinate::new(51.5000, -0.1300),
///     Coordinate::new(51.5100, -0.1200),
/// ];
///
/// let bounds = geo_utils::compute_bounds(&points).unwrap();
/// assert_eq!(bounds.north, 51.5100);
/// assert_eq!(bounds.west, -0.1300);
/// ```
pub fn compute_bounds(points: &[Coordinate]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let mut north = f64::MIN;
    let mut south = f64::MAX;
    let mut east = f64::MIN;
    let mut west = f64::MAX;

    for p in points {
        north = north.max(p.latitude);
        south = south.min(p.latitude);
        east = east.max(p.longitude);
        west = west.min(p.longitude);
    }

    Some(Bounds { north, south, east, west })
}

// =============================================================================
// Unit Tests
// =============================================================================
