//! Reads line features from GeoJSON, builds an AOI polygon, writes it back.
//!
//! Coordinates must already be in a projected, metric CRS; this demo does no
//! reprojection.

use clap::Parser;
use geo_aoi::{AoiBuilder, AoiConfig};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use std::convert::TryInto;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GeoJSON file (LineStrings, projected CRS)
    #[arg(short, long)]
    input: PathBuf,

    /// Output GeoJSON file (single Polygon)
    #[arg(short, long)]
    output: PathBuf,

    /// Corridor half-width around lines
    #[arg(long)]
    buffer: f64,

    #[arg(long, default_value_t = 0.0)]
    gap_close: f64,

    /// Max gap to bridge between disjoint components
    #[arg(long, default_value_t = 0.0)]
    connect_gaps: f64,

    /// Half-width of connector corridors (defaults to --buffer)
    #[arg(long)]
    connector_width: Option<f64>,

    #[arg(long, default_value_t = 5)]
    connect_iters: usize,

    #[arg(long, default_value_t = 0.0)]
    simplify: f64,

    /// Fill holes with area <= this
    #[arg(long, default_value_t = 0.0)]
    fill_holes_max_area: f64,

    /// Cut channels from remaining holes to the exterior
    #[arg(long, default_value_t = false)]
    cut_channels: bool,

    /// Half-width of channels (defaults to buffer / 5)
    #[arg(long)]
    channel_width: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    channel_extend: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AoiConfig::new(args.buffer)
        .with_gap_close(args.gap_close)
        .with_connect_gap(args.connect_gaps)
        .with_connect_iterations(args.connect_iters)
        .with_simplify(args.simplify)
        .with_hole_fill(args.fill_holes_max_area);
    config.connector_width = args.connector_width;
    if args.cut_channels {
        config = config.with_channel_cutting(args.channel_width, args.channel_extend);
    }

    println!("Reading input from {:?}", args.input);
    let reader = BufReader::new(File::open(&args.input)?);
    let geojson: GeoJson = serde_json::from_reader(reader)?;

    let mut builder = AoiBuilder::new(config);
    let mut count = 0;
    let geometries: Vec<Geometry> = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features.into_iter().filter_map(|f| f.geometry).collect(),
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::Geometry(geom) => vec![geom],
    };
    for geom in geometries {
        let geo_geom: geo_types::Geometry<f64> = geom.try_into()?;
        builder.add_geometry(geo_geom)?;
        count += 1;
    }
    println!("Loaded {} features.", count);

    let aoi = builder.build()?;
    println!(
        "AOI: {} vertices, {} corridor(s), {} hole(s) filled, {} cut",
        aoi.polygon.exterior().0.len(),
        aoi.report.connectivity.corridors.len(),
        aoi.report.holes_filled,
        aoi.report.holes_cut
    );
    for discard in &aoi.report.discarded {
        println!(
            "Warning: {} discarded {} piece(s), area {:.3}",
            discard.stage, discard.pieces, discard.area
        );
    }

    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), "AOI".into());
    let output_fc = FeatureCollection {
        bbox: None,
        features: vec![Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(&aoi.polygon))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }],
        foreign_members: None,
    };

    let writer = BufWriter::new(File::create(&args.output)?);
    serde_json::to_writer_pretty(writer, &GeoJson::FeatureCollection(output_fc))?;
    println!("AOI written to {:?}", args.output);

    Ok(())
}
