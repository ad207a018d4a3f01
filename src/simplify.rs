use crate::error::{AoiError, Result, Stage};
use crate::fragments::Fragments;
use crate::morphology::repair_invalid_geometry;
use geo::Simplify;
use geo_types::{MultiPolygon, Polygon};
use log::debug;

/// Douglas-Peucker simplification of every ring, followed by a repair pass.
///
/// Ring-by-ring simplification can make rings touch or cross, so the result
/// goes through [`repair_invalid_geometry`]. If that splits it, the largest
/// piece is kept and the rest reported. A tolerance of zero returns the input.
pub fn simplify_polygon(polygon: Polygon<f64>, tolerance: f64) -> Result<Fragments> {
    if tolerance <= 0.0 {
        return Ok(Fragments::Single(polygon));
    }

    let before = vertex_count(&polygon);
    let simplified = polygon.simplify(tolerance);
    let repaired = repair_invalid_geometry(&MultiPolygon::new(vec![simplified]))
        .map_err(|_| AoiError::DegenerateGeometry { stage: Stage::Simplify })?;
    let out = Fragments::largest(repaired, Stage::Simplify)?;

    debug!(
        "Simplified at {}: {} -> {} vertices",
        tolerance,
        before,
        vertex_count(out.polygon())
    );
    Ok(out)
}

fn vertex_count(polygon: &Polygon<f64>) -> usize {
    polygon.exterior().0.len() + polygon.interiors().iter().map(|r| r.0.len()).sum::<usize>()
}
