//! Geodesic construction helpers for drawn shapes.

use crate::core::geo::GeoPos;
use geo::{HaversineDestination, HaversineIntermediate};
use geo_types::Point;

/// Vertices per range ring.
pub const RANGE_RING_SEGMENTS: usize = 256;

/// Sample points along a great-circle arc.
pub const GREAT_CIRCLE_SEGMENTS: usize = 128;

/// A closed geodesic circle of the given radius around a center, built from
/// haversine destination points swept over the full bearing range.
///
/// The first vertex is repeated at the end so the polyline closes.
pub fn range_ring(center: GeoPos, range_km: f64) -> Vec<GeoPos> {
    if !(range_km > 0.0) || !center.is_valid() {
        return Vec::new();
    }
    let origin = Point::new(center.lon, center.lat);
    let distance_m = range_km * 1000.0;
    let mut ring: Vec<GeoPos> = (0..RANGE_RING_SEGMENTS)
        .map(|i| {
            let bearing = 360.0 * i as f64 / RANGE_RING_SEGMENTS as f64;
            let p = origin.haversine_destination(bearing, distance_m);
            GeoPos::new(p.x(), p.y())
        })
        .collect();
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

/// Points along the great circle from `a` to `b`, endpoints included.
pub fn great_circle_arc(a: GeoPos, b: GeoPos) -> Vec<GeoPos> {
    if !a.is_valid() || !b.is_valid() {
        return Vec::new();
    }
    let start = Point::new(a.lon, a.lat);
    let end = Point::new(b.lon, b.lat);
    (0..=GREAT_CIRCLE_SEGMENTS)
        .map(|i| {
            let f = i as f64 / GREAT_CIRCLE_SEGMENTS as f64;
            let p = start.haversine_intermediate(&end, f);
            GeoPos::new(p.x(), p.y())
        })
        .collect()
}
