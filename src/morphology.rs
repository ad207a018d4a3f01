use crate::error::{AoiError, Result, Stage};
use geo::algorithm::buffer::Buffer;
use geo::{Area, BooleanOps};
use geo_types::{MultiPolygon, Polygon};
use log::debug;

/// Pieces and holes smaller than this share of the total area are overlay
/// residue, not geometry.
const SLIVER_AREA_RATIO: f64 = 1e-9;

/// Repairs a possibly self-intersecting geometry.
///
/// This is a zero-width self-union: unioning with the empty geometry makes the
/// overlay engine re-derive every ring from the fill rule, which resolves
/// self-intersections and overlapping parts into a valid set of disjoint
/// polygons. Slivers left by the overlay (see [`drop_slivers`]) are removed.
/// Empty input stays empty. A non-empty input that repairs to nothing is
/// reported as `DegenerateGeometry`.
pub fn repair_invalid_geometry(geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
    if geometry.0.is_empty() {
        return Ok(MultiPolygon::new(vec![]));
    }

    let repaired = drop_slivers(geometry.union(&MultiPolygon::new(vec![])));
    if repaired.0.is_empty() {
        return Err(AoiError::DegenerateGeometry { stage: Stage::Repair });
    }
    Ok(repaired)
}

/// Removes polygons and interior rings whose area is negligible next to the
/// whole geometry.
///
/// Negative buffers and differences leave near-zero-area fragments at cusps;
/// counted as components or holes they would fail the single-polygon contract.
pub fn drop_slivers(geometry: MultiPolygon<f64>) -> MultiPolygon<f64> {
    let total = geometry.unsigned_area();
    let min_area = total * SLIVER_AREA_RATIO;

    let mut dropped = 0;
    let mut kept = Vec::with_capacity(geometry.0.len());
    for polygon in geometry {
        if polygon.unsigned_area() <= min_area {
            dropped += 1;
            continue;
        }
        let (exterior, interiors) = polygon.into_inner();
        let before = interiors.len();
        let interiors: Vec<_> = interiors
            .into_iter()
            .filter(|ring| Polygon::new(ring.clone(), vec![]).unsigned_area() > min_area)
            .collect();
        dropped += before - interiors.len();
        kept.push(Polygon::new(exterior, interiors));
    }

    if dropped > 0 {
        debug!("Dropped {} sliver(s) below {:e}", dropped, min_area);
    }
    MultiPolygon::new(kept)
}

/// Morphological closing: dilate by `distance`, erode by `distance`, repair.
///
/// Bridges gaps narrower than about `2 * distance` and fills narrow notches.
/// A distance of zero returns the input unchanged.
pub fn close(geometry: MultiPolygon<f64>, distance: f64) -> Result<MultiPolygon<f64>> {
    if distance <= 0.0 {
        return Ok(geometry);
    }

    let before = geometry.0.len();
    let dilated = geometry.buffer(distance);
    let eroded = dilated.buffer(-distance);
    if eroded.0.is_empty() {
        return Err(AoiError::DegenerateGeometry { stage: Stage::Closing });
    }
    let closed = repair_invalid_geometry(&eroded)?;

    debug!(
        "Closing by {} took {} component(s) to {}",
        distance,
        before,
        closed.0.len()
    );
    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::buffer::buffer_lines;
    use geo_types::{polygon, LineString};

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
        ]
    }

    #[test]
    fn test_repair_bowtie() {
        // Self-intersecting ring crossing at (5, 5).
        let bowtie = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![],
        );
        let repaired = repair_invalid_geometry(&MultiPolygon::new(vec![bowtie])).unwrap();
        assert!(!repaired.0.is_empty());
        for poly in &repaired {
            assert!(poly.unsigned_area() > 0.0);
        }
    }

    #[test]
    fn test_repair_keeps_valid_polygon() {
        let mp = MultiPolygon::new(vec![square(0.0, 0.0, 10.0)]);
        let repaired = repair_invalid_geometry(&mp).unwrap();
        assert_eq!(repaired.0.len(), 1);
        assert_abs_diff_eq!(repaired.unsigned_area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_repair_empty_is_empty() {
        let repaired = repair_invalid_geometry(&MultiPolygon::new(vec![])).unwrap();
        assert!(repaired.0.is_empty());
    }

    #[test]
    fn test_repair_drops_sliver_piece() {
        let sliver = polygon![(x: 100.0, y: 100.0), (x: 100.001, y: 100.0), (x: 100.0, y: 100.0000001)];
        let mp = MultiPolygon::new(vec![square(0.0, 0.0, 10.0), sliver]);
        let repaired = repair_invalid_geometry(&mp).unwrap();
        assert_eq!(repaired.0.len(), 1);
        assert_abs_diff_eq!(repaired.unsigned_area(), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_drop_slivers_removes_tiny_hole() {
        let hole = LineString::from(vec![(5.0, 5.0), (5.0001, 5.0), (5.0, 5.0000001), (5.0, 5.0)]);
        let holed = Polygon::new(square(0.0, 0.0, 10.0).exterior().clone(), vec![hole]);
        let cleaned = drop_slivers(MultiPolygon::new(vec![holed]));
        assert_eq!(cleaned.0.len(), 1);
        assert!(cleaned.0[0].interiors().is_empty());
    }

    #[test]
    fn test_close_joins_stadiums_one_unit_apart() {
        let lines = vec![
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]),
            LineString::from(vec![(13.0, 0.0), (23.0, 0.0)]),
        ];
        let buffered = buffer_lines(&lines, 1.0).unwrap();
        assert_eq!(buffered.geometry.0.len(), 2);

        let closed = close(buffered.geometry, 1.0).unwrap();
        assert_eq!(closed.0.len(), 1);
        assert!(closed.0[0].interiors().is_empty());
    }

    #[test]
    fn test_close_bridges_small_gap() {
        // 2 unit gap, closing by 2 covers it.
        let mp = MultiPolygon::new(vec![square(0.0, 0.0, 10.0), square(12.0, 0.0, 10.0)]);
        let closed = close(mp, 2.0).unwrap();
        assert_eq!(closed.0.len(), 1);
    }

    #[test]
    fn test_close_leaves_wide_gap() {
        let mp = MultiPolygon::new(vec![square(0.0, 0.0, 10.0), square(30.0, 0.0, 10.0)]);
        let closed = close(mp, 2.0).unwrap();
        assert_eq!(closed.0.len(), 2);
    }

    #[test]
    fn test_close_zero_is_identity() {
        let mp = MultiPolygon::new(vec![square(0.0, 0.0, 10.0), square(30.0, 0.0, 10.0)]);
        let closed = close(mp.clone(), 0.0).unwrap();
        assert_eq!(closed, mp);
    }
}
