use crate::error::{AoiError, Result, Stage};
use geo_types::{MultiPolygon, Polygon};

/// Enforces the final contract: exactly one polygon and no holes.
pub fn validate(geometry: MultiPolygon<f64>) -> Result<Polygon<f64>> {
    let mut polygons = geometry.0;
    match polygons.len() {
        0 => Err(AoiError::DegenerateGeometry { stage: Stage::Validate }),
        1 => {
            let polygon = polygons.remove(0);
            match polygon.interiors().len() {
                0 => Ok(polygon),
                remaining => Err(AoiError::HoleRemains { remaining }),
            }
        }
        remaining => Err(AoiError::Connectivity { remaining }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    fn square(x: f64) -> Polygon<f64> {
        polygon![(x: x, y: 0.0), (x: x + 10.0, y: 0.0), (x: x + 10.0, y: 10.0), (x: x, y: 10.0)]
    }

    #[test]
    fn test_accepts_single_hole_free_polygon() {
        let poly = validate(MultiPolygon::new(vec![square(0.0)])).unwrap();
        assert_eq!(poly, square(0.0));
    }

    #[test]
    fn test_rejects_holes() {
        let donut = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            interiors: [
                [(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 2.0)],
                [(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 6.0), (x: 5.0, y: 6.0)],
            ],
        );
        let err = validate(MultiPolygon::new(vec![donut])).unwrap_err();
        assert_eq!(err, AoiError::HoleRemains { remaining: 2 });
    }

    #[test]
    fn test_rejects_multiple_components() {
        let err = validate(MultiPolygon::new(vec![square(0.0), square(20.0), square(40.0)])).unwrap_err();
        assert_eq!(err, AoiError::Connectivity { remaining: 3 });
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate(MultiPolygon::new(vec![])).unwrap_err();
        assert_eq!(err, AoiError::DegenerateGeometry { stage: Stage::Validate });
    }
}
