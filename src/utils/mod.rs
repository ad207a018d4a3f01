pub mod nearest;
pub mod parallel;

use geo_types::{Coord, LineString};

/// Euclidean distance between two coordinates.
#[inline]
pub fn coord_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// True when a line has no extent: fewer than two points, or all points equal.
pub fn is_degenerate(line: &LineString<f64>) -> bool {
    match line.0.first() {
        None => true,
        Some(first) => line.0.iter().all(|c| c == first),
    }
}
