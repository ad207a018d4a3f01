use crate::buffer::{cutting_corridor, union_all};
use crate::error::{AoiError, Result, Stage};
use crate::fragments::Fragments;
use crate::morphology::repair_invalid_geometry;
use crate::utils::nearest::nearest_points;
use geo::{Area, BooleanOps};
use geo_types::{LineString, MultiPolygon, Polygon};
use log::debug;

/// Upper bound on channel-cutting passes. A single pass normally severs
/// every hole; the extra passes cover cuts that leave a sliver behind.
pub const MAX_CHANNEL_PASSES: usize = 3;

/// Drops every interior ring enclosing at most `max_area`.
///
/// Returns the new polygon and how many rings were filled. The exterior is
/// never touched. `max_area == 0` disables filling.
pub fn fill_holes_by_area(polygon: Polygon<f64>, max_area: f64) -> (Polygon<f64>, usize) {
    if max_area <= 0.0 || polygon.interiors().is_empty() {
        return (polygon, 0);
    }

    let (exterior, interiors) = polygon.into_inner();
    let before = interiors.len();
    let kept: Vec<LineString<f64>> = interiors
        .into_iter()
        .filter(|ring| ring_area(ring) > max_area)
        .collect();
    let filled = before - kept.len();

    debug!("Filled {} of {} hole(s) at threshold {}", filled, before, max_area);
    (Polygon::new(exterior, kept), filled)
}

/// Removes holes by cutting a thin channel from each one to the exterior.
///
/// Each pass joins every hole to the exterior along their nearest-point
/// segment (lengthened by `extend` at both ends), buffers the segments with
/// flat caps and mitred joins, and subtracts the union of these strips. If the
/// polygon falls apart, the largest piece is kept and the rest is reported in
/// the returned [`Fragments`]. Stops once no holes remain or after
/// [`MAX_CHANNEL_PASSES`] passes.
pub fn cut_channels(polygon: Polygon<f64>, half_width: f64, extend: f64) -> Result<Fragments> {
    if half_width <= 0.0 {
        return Err(AoiError::InvalidInput(format!(
            "channel half-width must be positive, got {}",
            half_width
        )));
    }

    let mut current = polygon;
    let mut discarded: Vec<Polygon<f64>> = Vec::new();

    for pass in 1..=MAX_CHANNEL_PASSES {
        if current.interiors().is_empty() {
            break;
        }

        let exterior = current.exterior();
        let cuts: Vec<MultiPolygon<f64>> = current
            .interiors()
            .iter()
            .filter_map(|hole| nearest_points(&[hole], &[exterior]))
            .map(|pair| cutting_corridor(pair.segment(), half_width, extend))
            .collect();
        if cuts.is_empty() {
            break;
        }

        let holes_before = current.interiors().len();
        let cut_union = union_all(cuts);
        let remainder = MultiPolygon::new(vec![current]).difference(&cut_union);
        if remainder.0.is_empty() {
            return Err(AoiError::DegenerateGeometry { stage: Stage::ChannelCut });
        }
        let remainder = repair_invalid_geometry(&remainder)?;

        match Fragments::largest(remainder, Stage::ChannelCut)? {
            Fragments::Single(p) => current = p,
            Fragments::MultiPart { kept, discarded: mut lost, .. } => {
                discarded.append(&mut lost);
                current = kept;
            }
        }

        debug!(
            "Channel pass {}: {} hole(s) -> {}",
            pass,
            holes_before,
            current.interiors().len()
        );
    }

    Ok(Fragments::Single(current).absorb(discarded))
}

fn ring_area(ring: &LineString<f64>) -> f64 {
    Polygon::new(ring.clone(), vec![]).unsigned_area()
}

#[cfg(test)]
#[path = "holes_tests.rs"]
mod tests;
