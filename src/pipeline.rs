use crate::buffer::buffer_lines;
use crate::config::AoiConfig;
use crate::connectivity::{ConnectivityReport, CorridorConnector};
use crate::error::{AoiError, Result, Stage};
use crate::fragments::Fragments;
use crate::holes::{cut_channels, fill_holes_by_area};
use crate::morphology;
use crate::simplify::simplify_polygon;
use crate::validate::validate;
use geo_types::{Geometry, LineString, MultiPolygon, Polygon};
use log::debug;

/// Material dropped by a largest-fragment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Discard {
    pub stage: Stage,
    pub pieces: usize,
    pub area: f64,
}

/// What the pipeline did on the way to the final polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct AoiReport {
    pub lines: usize,
    /// Zero-length lines that contributed nothing.
    pub skipped_lines: usize,
    pub components_after_buffer: usize,
    pub components_after_closing: usize,
    pub connectivity: ConnectivityReport,
    /// Holes present once the geometry was a single polygon.
    pub holes_before: usize,
    pub holes_filled: usize,
    pub holes_cut: usize,
    pub discarded: Vec<Discard>,
}

impl AoiReport {
    /// Total area thrown away by largest-fragment steps.
    pub fn discarded_area(&self) -> f64 {
        self.discarded.iter().map(|d| d.area).sum()
    }
}

/// The area of interest: one polygon with no holes.
#[derive(Debug, Clone)]
pub struct Aoi {
    pub polygon: Polygon<f64>,
    pub report: AoiReport,
}

/// Collects line features and turns them into an AOI polygon.
pub struct AoiBuilder {
    config: AoiConfig,
    lines: Vec<LineString<f64>>,
}

impl AoiBuilder {
    pub fn new(config: AoiConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
        }
    }

    pub fn config(&self) -> &AoiConfig {
        &self.config
    }

    /// Adds the lines of a geometry.
    ///
    /// Accepts lines, line strings, multi line strings, and collections of
    /// those. Anything else is rejected and nothing from it is added.
    pub fn add_geometry(&mut self, geom: Geometry<f64>) -> Result<()> {
        let mut lines = Vec::new();
        extract_lines(geom, &mut lines)?;
        self.lines.extend(lines);
        Ok(())
    }

    pub fn add_line_string(&mut self, line: LineString<f64>) {
        self.lines.push(line);
    }

    /// Runs every stage and returns the AOI, or the first error met.
    pub fn build(&self) -> Result<Aoi> {
        let config = &self.config;
        config.validate()?;
        if self.lines.is_empty() {
            return Err(AoiError::InvalidInput("no line features".to_string()));
        }

        // 1. Buffer lines -> union
        let buffered = buffer_lines(&self.lines, config.buffer_width)?;
        let components_after_buffer = buffered.geometry.0.len();

        // 2. Close small gaps
        let geometry = morphology::close(buffered.geometry, config.gap_close_distance)?;
        let components_after_closing = geometry.0.len();

        // 3. Bridge what is still disjoint
        let connector = CorridorConnector::new(
            config.max_connect_gap,
            config.connector_width(),
            config.max_connect_iterations,
        );
        let connected = connector.connect(geometry)?;
        debug!(
            "Connectivity: {:?} after {} pass(es), {} corridor(s)",
            connected.report.status,
            connected.report.passes,
            connected.report.corridors.len()
        );

        // Must be a single polygon before hole removal
        let polygon = single_component(connected.geometry)?;
        let holes_before = polygon.interiors().len();

        // 4. Holes: fill small ones, then optionally cut channels to the rest
        let (polygon, holes_filled) = fill_holes_by_area(polygon, config.hole_fill_area_threshold);
        let mut discarded = Vec::new();
        let mut holes_cut = 0;
        let polygon = if config.enable_channel_cutting {
            let remaining = polygon.interiors().len();
            let out = cut_channels(
                polygon,
                config.channel_half_width(),
                config.channel_extend_distance,
            )?;
            holes_cut = remaining.saturating_sub(out.polygon().interiors().len());
            record_discard(&mut discarded, Stage::ChannelCut, &out);
            out.into_polygon()
        } else {
            polygon
        };

        // 5. Simplify
        let out = simplify_polygon(polygon, config.simplify_tolerance)?;
        record_discard(&mut discarded, Stage::Simplify, &out);

        // 6. Final contract
        let polygon = validate(MultiPolygon::new(vec![out.into_polygon()]))?;

        let report = AoiReport {
            lines: self.lines.len(),
            skipped_lines: buffered.skipped,
            components_after_buffer,
            components_after_closing,
            connectivity: connected.report,
            holes_before,
            holes_filled,
            holes_cut,
            discarded,
        };
        debug!(
            "AOI built from {} line(s): {} hole(s) filled, {} cut, {:.3} discarded",
            report.lines,
            report.holes_filled,
            report.holes_cut,
            report.discarded_area()
        );

        Ok(Aoi { polygon, report })
    }
}

/// Convenience wrapper: builds an AOI straight from line strings.
pub fn lines_to_aoi<I>(lines: I, config: AoiConfig) -> Result<Aoi>
where
    I: IntoIterator<Item = LineString<f64>>,
{
    let mut builder = AoiBuilder::new(config);
    for line in lines {
        builder.add_line_string(line);
    }
    builder.build()
}

fn single_component(geometry: MultiPolygon<f64>) -> Result<Polygon<f64>> {
    let mut polygons = geometry.0;
    match polygons.len() {
        0 => Err(AoiError::DegenerateGeometry { stage: Stage::Connectivity }),
        1 => Ok(polygons.remove(0)),
        remaining => Err(AoiError::Connectivity { remaining }),
    }
}

fn record_discard(discarded: &mut Vec<Discard>, stage: Stage, out: &Fragments) {
    if !out.is_single() {
        discarded.push(Discard {
            stage,
            pieces: out.discarded_count(),
            area: out.discarded_area(),
        });
    }
}

fn extract_lines(geom: Geometry<f64>, out: &mut Vec<LineString<f64>>) -> Result<()> {
    match geom {
        Geometry::LineString(ls) => out.push(ls),
        Geometry::MultiLineString(mls) => out.extend(mls.0),
        Geometry::Line(line) => out.push(LineString::from(line)),
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                extract_lines(g, out)?;
            }
        }
        other => {
            return Err(AoiError::InvalidInput(format!(
                "unsupported geometry type: {}",
                geometry_kind(&other)
            )))
        }
    }
    Ok(())
}

fn geometry_kind(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
