use crate::error::{AoiError, Result, Stage};
use crate::utils::{coord_distance, is_degenerate, parallel::map_ordered};
use geo::algorithm::buffer::{Buffer, BufferStyle, LineCap, LineJoin};
use geo::BooleanOps;
use geo_types::{Coord, Line, LineString, MultiPolygon, Point};
use log::debug;

/// Miter limit used for channel corridors.
const CHANNEL_MITER_LIMIT: f64 = 5.0;

/// Result of inflating and merging a set of lines.
#[derive(Debug, Clone)]
pub struct BufferedLines {
    pub geometry: MultiPolygon<f64>,
    /// Number of zero-length lines that were skipped.
    pub skipped: usize,
}

/// Inflates every line by `half_width` (round caps and joins) and unions the
/// results into a single geometry.
///
/// Zero-length lines contribute nothing and are skipped. Fails with
/// `InvalidInput` for a non-positive width and with `DegenerateGeometry` when
/// nothing is left to union.
pub fn buffer_lines(lines: &[LineString<f64>], half_width: f64) -> Result<BufferedLines> {
    if !half_width.is_finite() || half_width <= 0.0 {
        return Err(AoiError::InvalidInput(format!(
            "buffer width must be positive, got {}",
            half_width
        )));
    }

    let usable: Vec<&LineString<f64>> = lines.iter().filter(|l| !is_degenerate(l)).collect();
    let skipped = lines.len() - usable.len();
    if skipped > 0 {
        debug!("Skipping {} zero-length line(s) before buffering", skipped);
    }

    let pieces = map_ordered(&usable, |line| line.buffer(half_width));
    let geometry = union_all(pieces);

    if geometry.0.is_empty() {
        return Err(AoiError::DegenerateGeometry { stage: Stage::BufferUnion });
    }

    debug!(
        "Buffered {} line(s) by {} into {} component(s)",
        usable.len(),
        half_width,
        geometry.0.len()
    );

    Ok(BufferedLines { geometry, skipped })
}

/// Unions a sequence of geometries in order.
pub fn union_all<I>(geometries: I) -> MultiPolygon<f64>
where
    I: IntoIterator<Item = MultiPolygon<f64>>,
{
    geometries
        .into_iter()
        .fold(MultiPolygon::new(vec![]), |acc, geom| {
            if acc.0.is_empty() {
                geom
            } else if geom.0.is_empty() {
                acc
            } else {
                acc.union(&geom)
            }
        })
}

/// Round-capped corridor of half-width `half_width` around a segment.
///
/// A zero-length segment (touching components) yields a disc.
pub fn corridor(segment: Line<f64>, half_width: f64) -> MultiPolygon<f64> {
    if segment.start == segment.end {
        return Point::from(segment.start).buffer(half_width);
    }
    LineString::from(segment).buffer(half_width)
}

/// Flat-ended, mitred corridor used to cut a channel from a hole to the exterior.
///
/// The segment is first lengthened by `extend` at both ends.
pub fn cutting_corridor(segment: Line<f64>, half_width: f64, extend: f64) -> MultiPolygon<f64> {
    let segment = extend_segment(segment, extend);
    if segment.start == segment.end {
        return Point::from(segment.start).buffer(half_width);
    }
    let style = BufferStyle::new(half_width)
        .line_cap(LineCap::Butt)
        .line_join(LineJoin::Miter(CHANNEL_MITER_LIMIT));
    LineString::from(segment).buffer_with_style(style)
}

/// Lengthens a segment by `by` beyond both ends along its own direction.
///
/// Zero-length segments have no direction and come back unchanged.
pub fn extend_segment(segment: Line<f64>, by: f64) -> Line<f64> {
    let length = coord_distance(segment.start, segment.end);
    if by <= 0.0 || length == 0.0 {
        return segment;
    }
    let ux = (segment.end.x - segment.start.x) / length;
    let uy = (segment.end.y - segment.start.y) / length;
    Line::new(
        Coord { x: segment.start.x - ux * by, y: segment.start.y - uy * by },
        Coord { x: segment.end.x + ux * by, y: segment.end.y + uy * by },
    )
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
