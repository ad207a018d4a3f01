//! Connectivity repair: bridge disjoint components with corridors placed
//! along a minimum spanning tree of the components.

pub mod mst;

use crate::buffer::{corridor, union_all};
use crate::error::{AoiError, Result, Stage};
use crate::morphology::repair_invalid_geometry;
use crate::utils::nearest::nearest_between_polygons;
use crate::utils::parallel::map_ordered;
use geo::Centroid;
use geo_types::{Coord, Line, MultiPolygon};
use log::debug;
use mst::prim_mst;

/// How connectivity repair ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    /// Repair was switched off (`max_gap == 0`).
    Disabled,
    /// At most one component is left.
    Connected,
    /// A pass found no MST edge short enough to bridge.
    GapsExceeded { remaining: usize },
    /// The pass budget ran out with components still apart.
    IterationsExhausted { remaining: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityReport {
    /// Number of passes that built an MST.
    pub passes: usize,
    /// Every bridging segment, in placement order.
    pub corridors: Vec<Line<f64>>,
    /// Component count after the last pass.
    pub components: usize,
    pub status: ConnectivityStatus,
}

#[derive(Debug, Clone)]
pub struct ConnectivityOutcome {
    pub geometry: MultiPolygon<f64>,
    pub report: ConnectivityReport,
}

/// Joins components whose boundaries are at most `max_gap` apart.
#[derive(Debug, Clone)]
pub struct CorridorConnector {
    pub max_gap: f64,
    /// Half-width of each corridor.
    pub connector_width: f64,
    pub max_iterations: usize,
}

impl CorridorConnector {
    pub fn new(max_gap: f64, connector_width: f64, max_iterations: usize) -> Self {
        Self {
            max_gap,
            connector_width,
            max_iterations,
        }
    }

    /// Runs repair passes until one component remains, no gap can be
    /// bridged, or the pass budget is spent.
    ///
    /// Leftover components are not an error here; the caller decides.
    pub fn connect(&self, geometry: MultiPolygon<f64>) -> Result<ConnectivityOutcome> {
        let mut current = geometry;
        let mut corridors = Vec::new();
        let mut passes = 0;

        if self.max_gap <= 0.0 {
            let components = current.0.len();
            return Ok(ConnectivityOutcome {
                geometry: current,
                report: ConnectivityReport {
                    passes,
                    corridors,
                    components,
                    status: ConnectivityStatus::Disabled,
                },
            });
        }

        let status = loop {
            let n = current.0.len();
            if n <= 1 {
                break ConnectivityStatus::Connected;
            }
            if passes >= self.max_iterations {
                break ConnectivityStatus::IterationsExhausted { remaining: n };
            }
            passes += 1;

            let centroids = component_centroids(&current)?;
            let edges = prim_mst(&centroids);

            let pairs = map_ordered(&edges, |&(i, j)| {
                nearest_between_polygons(&current.0[i], &current.0[j])
            });
            let bridges: Vec<Line<f64>> = pairs
                .into_iter()
                .flatten()
                .filter(|pair| pair.distance <= self.max_gap)
                .map(|pair| pair.segment())
                .collect();

            debug!(
                "Connectivity pass {}: {} components, {} MST edges, {} within {}",
                passes,
                n,
                edges.len(),
                bridges.len(),
                self.max_gap
            );

            if bridges.is_empty() {
                break ConnectivityStatus::GapsExceeded { remaining: n };
            }

            let pieces: Vec<MultiPolygon<f64>> = bridges
                .iter()
                .map(|segment| corridor(*segment, self.connector_width))
                .collect();
            let merged = union_all(std::iter::once(current).chain(pieces));
            current = repair_invalid_geometry(&merged)?;
            if current.0.is_empty() {
                return Err(AoiError::DegenerateGeometry { stage: Stage::Connectivity });
            }
            corridors.extend(bridges);
        };

        let components = current.0.len();
        Ok(ConnectivityOutcome {
            geometry: current,
            report: ConnectivityReport {
                passes,
                corridors,
                components,
                status,
            },
        })
    }
}

fn component_centroids(geometry: &MultiPolygon<f64>) -> Result<Vec<Coord<f64>>> {
    geometry
        .iter()
        .map(|component| {
            component
                .centroid()
                .map(|p| p.0)
                .ok_or(AoiError::DegenerateGeometry { stage: Stage::Connectivity })
        })
        .collect()
}
