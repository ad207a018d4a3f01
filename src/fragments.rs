use crate::error::{AoiError, Result, Stage};
use geo::Area;
use geo_types::{MultiPolygon, Polygon};
use log::warn;

/// Outcome of a step that must end with one polygon but may split it.
///
/// When a geometry falls apart, only the largest piece is kept. The pieces
/// that were dropped are carried along instead of vanishing, so callers can
/// audit or reject the loss.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragments {
    Single(Polygon<f64>),
    MultiPart {
        kept: Polygon<f64>,
        discarded: Vec<Polygon<f64>>,
        discarded_area: f64,
    },
}

impl Fragments {
    /// Keeps the largest polygon by area; ties go to the earliest one.
    pub fn largest(geometry: MultiPolygon<f64>, stage: Stage) -> Result<Self> {
        let mut pieces = geometry.0;
        if pieces.is_empty() {
            return Err(AoiError::DegenerateGeometry { stage });
        }
        if pieces.len() == 1 {
            return Ok(Fragments::Single(pieces.remove(0)));
        }

        let mut best = 0;
        let mut best_area = pieces[0].unsigned_area();
        for (i, piece) in pieces.iter().enumerate().skip(1) {
            let area = piece.unsigned_area();
            if area > best_area {
                best = i;
                best_area = area;
            }
        }

        let kept = pieces.remove(best);
        let discarded_area: f64 = pieces.iter().map(|p| p.unsigned_area()).sum();
        warn!(
            "{} split into {} pieces; keeping the largest ({:.3}) and discarding {:.3}",
            stage,
            pieces.len() + 1,
            best_area,
            discarded_area
        );

        Ok(Fragments::MultiPart {
            kept,
            discarded: pieces,
            discarded_area,
        })
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        match self {
            Fragments::Single(p) => p,
            Fragments::MultiPart { kept, .. } => kept,
        }
    }

    pub fn into_polygon(self) -> Polygon<f64> {
        match self {
            Fragments::Single(p) => p,
            Fragments::MultiPart { kept, .. } => kept,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Fragments::Single(_))
    }

    pub fn discarded_area(&self) -> f64 {
        match self {
            Fragments::Single(_) => 0.0,
            Fragments::MultiPart { discarded_area, .. } => *discarded_area,
        }
    }

    pub fn discarded_count(&self) -> usize {
        match self {
            Fragments::Single(_) => 0,
            Fragments::MultiPart { discarded, .. } => discarded.len(),
        }
    }

    /// Carries the losses of an earlier step into this one.
    ///
    /// Used by multi-pass operations so the final outcome accounts for every
    /// piece dropped along the way.
    pub fn absorb(self, earlier: Vec<Polygon<f64>>) -> Self {
        if earlier.is_empty() {
            return self;
        }
        let (kept, mut discarded) = match self {
            Fragments::Single(p) => (p, Vec::new()),
            Fragments::MultiPart { kept, discarded, .. } => (kept, discarded),
        };
        let mut all = earlier;
        all.append(&mut discarded);
        let discarded_area: f64 = all.iter().map(|p| p.unsigned_area()).sum();
        Fragments::MultiPart {
            kept,
            discarded: all,
            discarded_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo_types::polygon;

    fn square(x: f64, size: f64) -> Polygon<f64> {
        polygon![(x: x, y: 0.0), (x: x + size, y: 0.0), (x: x + size, y: size), (x: x, y: size)]
    }

    #[test]
    fn test_single_piece() {
        let out = Fragments::largest(MultiPolygon::new(vec![square(0.0, 4.0)]), Stage::Simplify).unwrap();
        assert!(out.is_single());
        assert_eq!(out.discarded_area(), 0.0);
    }

    #[test]
    fn test_largest_wins() {
        let mp = MultiPolygon::new(vec![square(0.0, 2.0), square(10.0, 5.0), square(20.0, 3.0)]);
        let out = Fragments::largest(mp, Stage::ChannelCut).unwrap();
        assert!(!out.is_single());
        assert_abs_diff_eq!(out.polygon().unsigned_area(), 25.0);
        assert_abs_diff_eq!(out.discarded_area(), 13.0);
        assert_eq!(out.discarded_count(), 2);
    }

    #[test]
    fn test_tie_keeps_first() {
        let mp = MultiPolygon::new(vec![square(0.0, 3.0), square(10.0, 3.0)]);
        let out = Fragments::largest(mp, Stage::ChannelCut).unwrap();
        assert_eq!(out.polygon(), &square(0.0, 3.0));
    }

    #[test]
    fn test_empty_is_degenerate() {
        let err = Fragments::largest(MultiPolygon::new(vec![]), Stage::Simplify).unwrap_err();
        assert_eq!(err, AoiError::DegenerateGeometry { stage: Stage::Simplify });
    }

    #[test]
    fn test_absorb_accumulates() {
        let out = Fragments::Single(square(0.0, 5.0)).absorb(vec![square(10.0, 1.0)]);
        assert_eq!(out.discarded_count(), 1);
        assert_abs_diff_eq!(out.discarded_area(), 1.0);
    }
}
