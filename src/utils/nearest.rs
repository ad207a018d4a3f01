use crate::utils::coord_distance;
use geo::{Closest, ClosestPoint};
use geo_types::{Coord, Line, LineString, Point, Polygon};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

// Wrapper for Line to be indexable by rstar
#[derive(Clone, Copy, Debug)]
struct IndexedLine {
    line: Line<f64>,
}

impl RTreeObject for IndexedLine {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let p1 = self.line.start;
        let p2 = self.line.end;
        AABB::from_corners(
            [p1.x.min(p2.x), p1.y.min(p2.y)],
            [p1.x.max(p2.x), p1.y.max(p2.y)],
        )
    }
}

impl PointDistance for IndexedLine {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let query = Coord { x: point[0], y: point[1] };
        let c = closest_coord_on_line(&self.line, query);
        let dx = c.x - query.x;
        let dy = c.y - query.y;
        dx * dx + dy * dy
    }
}

/// The closest pair of points between two boundaries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPair {
    /// Point on the first boundary.
    pub from: Coord<f64>,
    /// Point on the second boundary.
    pub to: Coord<f64>,
    pub distance: f64,
}

impl NearestPair {
    /// The segment joining the two points, from the first boundary to the second.
    pub fn segment(&self) -> Line<f64> {
        Line::new(self.from, self.to)
    }
}

/// Exterior followed by every interior ring.
pub fn polygon_rings(polygon: &Polygon<f64>) -> Vec<&LineString<f64>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors().iter())
        .collect()
}

/// Finds the nearest-point pair between two sets of rings.
///
/// Every vertex of each side is queried against an R-tree of the other
/// side's segments. For boundaries that do not cross this yields the true
/// minimum, since the closest approach of two disjoint segments always
/// involves an endpoint of one of them. The first strict minimum wins, so
/// the answer is stable for identical input.
///
/// Returns `None` when either side has no segments.
pub fn nearest_points(from: &[&LineString<f64>], to: &[&LineString<f64>]) -> Option<NearestPair> {
    let from_tree = segment_tree(from);
    let to_tree = segment_tree(to);

    let mut best: Option<NearestPair> = None;
    let mut consider = |a: Coord<f64>, b: Coord<f64>| {
        let distance = coord_distance(a, b);
        if best.map_or(true, |current| distance < current.distance) {
            best = Some(NearestPair { from: a, to: b, distance });
        }
    };

    for c in from.iter().flat_map(|ring| ring.coords()) {
        if let Some(seg) = to_tree.nearest_neighbor(&[c.x, c.y]) {
            consider(*c, closest_coord_on_line(&seg.line, *c));
        }
    }

    for c in to.iter().flat_map(|ring| ring.coords()) {
        if let Some(seg) = from_tree.nearest_neighbor(&[c.x, c.y]) {
            consider(closest_coord_on_line(&seg.line, *c), *c);
        }
    }

    best
}

/// Nearest-point pair between the full boundaries of two polygons.
pub fn nearest_between_polygons(a: &Polygon<f64>, b: &Polygon<f64>) -> Option<NearestPair> {
    nearest_points(&polygon_rings(a), &polygon_rings(b))
}

fn segment_tree(rings: &[&LineString<f64>]) -> RTree<IndexedLine> {
    let segments: Vec<IndexedLine> = rings
        .iter()
        .flat_map(|ring| ring.lines())
        .map(|line| IndexedLine { line })
        .collect();
    RTree::bulk_load(segments)
}

fn closest_coord_on_line(line: &Line<f64>, query: Coord<f64>) -> Coord<f64> {
    match line.closest_point(&Point::from(query)) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => p.into(),
        Closest::Indeterminate => line.start,
    }
}
