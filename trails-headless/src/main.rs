//! Headless N-body trail renderer
//!
//! Reads a trajectory dataset, renders it through `nbody-trails-core` and
//! writes the image. Progress messages go to stdout, logs to stderr
//! (`RUST_LOG` controls the level, default `info`).

use clap::Parser;
use nbody_trails_core::{
    load_dataset, render_animation, render_to_file, RenderConfig, RenderError, Rgb,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Dataset read when `--input` is omitted, in a format this build can load
#[cfg(feature = "hdf5")]
const DEFAULT_INPUT: &str = "data/results.hdf5";
#[cfg(not(feature = "hdf5"))]
const DEFAULT_INPUT: &str = "data/results.json";

/// Render N-body trajectories as faded 3D trails
#[derive(Parser, Debug)]
#[command(name = "nbody-trails")]
#[command(about = "Render a 3D trail snapshot of an N-body simulation", long_about = None)]
struct Args {
    /// Input dataset (.hdf5/.h5 with the `hdf5` feature, or .json)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output image (.png or .jpg)
    #[arg(short, long, default_value = "data/image.png")]
    output: PathBuf,

    /// Render one image per timestep instead of a single snapshot
    #[arg(short, long)]
    animate: bool,

    /// JSON render configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Samples kept per trail
    #[arg(long)]
    trail_length: Option<usize>,

    /// Output resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// Camera elevation in degrees
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f32>,

    /// Camera azimuth in degrees
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f32>,

    /// Marker area (pt²) of the lightest element
    #[arg(long)]
    min_point_size: Option<f32>,

    /// Marker area (pt²) of the heaviest element
    #[arg(long)]
    max_point_size: Option<f32>,

    /// Trail width (pt) of the lightest element
    #[arg(long)]
    min_trail_width: Option<f32>,

    /// Trail width (pt) of the heaviest element
    #[arg(long)]
    max_trail_width: Option<f32>,

    /// Trail color as RRGGBB hex
    #[arg(long)]
    trail_color: Option<Rgb>,
}

impl Args {
    /// Configuration file (or defaults) with command-line overrides applied
    fn render_config(&self) -> Result<RenderConfig, RenderError> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };

        if let Some(trail_length) = self.trail_length {
            config.trail_length = trail_length;
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(elevation) = self.elevation {
            config.elevation = elevation;
        }
        if let Some(azimuth) = self.azimuth {
            config.azimuth = azimuth;
        }
        if let Some(size) = self.min_point_size {
            config.min_point_size = size;
        }
        if let Some(size) = self.max_point_size {
            config.max_point_size = size;
        }
        if let Some(width) = self.min_trail_width {
            config.min_trail_width = width;
        }
        if let Some(width) = self.max_trail_width {
            config.max_trail_width = width;
        }
        if let Some(color) = self.trail_color {
            config.trail_color = color;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), RenderError> {
    let config = args.render_config()?;

    let dataset = load_dataset(&args.input)?;
    println!("Done reading in {}", args.input.display());

    if args.animate {
        let frames = render_animation(&dataset, &config, &args.output)?;
        println!(
            "Done plotting {} frames next to {}",
            frames.len(),
            args.output.display()
        );
    } else {
        let scene = render_to_file(&dataset, &config, &args.output)?;
        info!(
            "Drew {} segments for {} elements",
            scene.segment_count(),
            scene.elements.len()
        );
        println!("Done plotting to {}", args.output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
