use std::fs;
use std::io;
use std::process;

use clap::{Parser, Subcommand};
use map_elements::element::PolylineElement;
use map_elements::geometry::LineCoords;
use map_elements::gis::FeatureEnvelope;
use map_elements::map::MapSurface;
use map_elements::styles::PathStyle;

/// Host GeoJSON line features on a headless map surface.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a line feature hosted on a map surface.
    Show {
        /// Path to a GeoJSON feature file.
        input: String,
    },
    /// Apply style overrides to a line feature, printing every notification
    /// as it fires, then export the feature.
    Restyle {
        /// Path to a GeoJSON feature file.
        input: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        opacity: Option<f64>,
        #[arg(long)]
        dash_array: Option<String>,
        /// Write the restyled feature here instead of stdout.
        #[arg(long)]
        output: Option<String>,
    },
}

fn load_element(map: &std::rc::Rc<MapSurface>, input: &str) -> io::Result<PolylineElement> {
    let envelope = FeatureEnvelope::from_geojson_str(&fs::read_to_string(input)?)?;
    let mut element: PolylineElement = PolylineElement::new(map);
    element.set_feature(envelope)?;
    log::info!("loaded {input}");
    Ok(element)
}

fn show(input: &str) -> io::Result<()> {
    let map = MapSurface::new();
    let element = load_element(&map, input)?;

    let coords = element.latlngs();
    let kind = match &coords {
        LineCoords::Single(_) => "LineString",
        LineCoords::Multi(_) => "MultiLineString",
    };
    let properties = serde_json::to_string(element.properties())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    println!("geometry: {kind} with {} points", coords.point_count());
    println!(
        "style: color={} weight={} opacity={}",
        element.color(),
        element.weight(),
        element.opacity()
    );
    println!("displayed: {}", element.display());
    println!("properties: {properties}");
    Ok(())
}

fn restyle(input: &str, style: &PathStyle, output: Option<&str>) -> io::Result<()> {
    let map = MapSurface::new();
    let mut element: PolylineElement = PolylineElement::new(&map);

    element
        .changes()
        .latlngs
        .subscribe(|coords| println!("latlngs -> {} points", coords.point_count()));
    element
        .changes()
        .feature
        .subscribe(|_| println!("feature -> updated"));
    element
        .changes()
        .color
        .subscribe(|c| println!("color -> {c}"));
    element
        .changes()
        .weight
        .subscribe(|w| println!("weight -> {w}"));
    element
        .changes()
        .opacity
        .subscribe(|o| println!("opacity -> {o}"));
    element
        .changes()
        .dash_array
        .subscribe(|d| println!("dash-array -> {d}"));
    element.changes().style.subscribe(|options| {
        println!(
            "style -> merged color={} weight={}",
            options.color, options.weight
        )
    });

    let envelope = FeatureEnvelope::from_geojson_str(&fs::read_to_string(input)?)?;
    element.set_feature(envelope)?;
    element.set_style(style);

    let text = element.feature().to_geojson_string()?;
    match output {
        Some(path) => {
            fs::write(path, text)?;
            log::info!("wrote {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run() -> io::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Show { input } => show(&input),
        Command::Restyle {
            input,
            color,
            weight,
            opacity,
            dash_array,
            output,
        } => {
            let style = PathStyle {
                color,
                weight,
                opacity,
                dash_array,
                ..PathStyle::default()
            };
            restyle(&input, &style, output.as_deref())
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
