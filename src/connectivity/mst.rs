use crate::utils::coord_distance;
use geo_types::Coord;

/// Minimum spanning tree over the complete graph of `points`.
///
/// Prim's algorithm, O(n²), rooted at point 0. Edges are returned as
/// `(parent, child)` in the order they join the tree. When several candidates
/// share the minimum weight, the one with the lowest index wins, which makes
/// the tree fully determined by the input order.
pub fn prim_mst(points: &[Coord<f64>]) -> Vec<(usize, usize)> {
    let n = points.len();
    if n <= 1 {
        return Vec::new();
    }

    let mut in_tree = vec![false; n];
    let mut best_dist = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];

    in_tree[0] = true;
    for j in 1..n {
        best_dist[j] = coord_distance(points[0], points[j]);
    }

    let mut edges = Vec::with_capacity(n - 1);
    for _ in 1..n {
        let mut next = None;
        let mut dmin = f64::INFINITY;
        for j in 0..n {
            if !in_tree[j] && best_dist[j] < dmin {
                dmin = best_dist[j];
                next = Some(j);
            }
        }

        // Only reachable with non-finite coordinates.
        let Some(v) = next else {
            break;
        };

        in_tree[v] = true;
        edges.push((parent[v], v));

        for j in 0..n {
            if !in_tree[j] {
                let d = coord_distance(points[v], points[j]);
                if d < best_dist[j] {
                    best_dist[j] = d;
                    parent[j] = v;
                }
            }
        }
    }

    edges
}
