mod cloud;
mod io;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cloud_layouter::Config;
use log::info;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

use crate::cloud::Cloud;

#[derive(Parser)]
#[command(author, version, about = "Lay out rectangles as a circular cloud", long_about = None)]
struct Args {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// CSV file with `Width,Height` rows
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output path (stdout when omitted)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output format: csv | json
    #[arg(short = 'f', long = "format", default_value = "csv")]
    format: String,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    if !matches!(args.format.as_str(), "csv" | "json") {
        bail!("Unknown format: {}. Available: csv, json", args.format);
    }

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    info!(
        "spacing {}, offset factor {}, center ({}, {})",
        config.layouter.neighbour_spacing,
        config.layouter.search_offset_factor,
        config.cloud.center_x,
        config.cloud.center_y
    );

    let input = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let sizes = io::read_sizes(BufReader::new(input))?;
    info!("Loaded {} sizes from {}", sizes.len(), args.input.display());

    let mut cloud = Cloud::new(&config)?;
    for size in sizes {
        cloud.put_next_rectangle(size)?;
    }

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    match args.format.as_str() {
        "json" => io::write_json(writer, cloud.placements())?,
        _ => io::write_csv(writer, cloud.placements())?,
    }

    if let Some(path) = &args.output {
        info!("Wrote {} placements to {}", cloud.placements().len(), path.display());
    }
    Ok(())
}
