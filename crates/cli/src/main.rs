//! # CityTimeline CLI
//!
//! Headless front end for the water-network pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Feature counts, line/area stats and bounds per file
//! citytimeline inspect water_lines_2230_simplified.geojson water_areas_2230_simplified.geojson
//!
//! # Run the preview pipeline from a config and dump the samples
//! citytimeline run --config mods/irvine/preview.toml --output samples.json
//!
//! # Config path from the environment
//! CITYTIMELINE_CONFIG=preview.toml citytimeline run
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use citytimeline_geo::{
    run_pipeline, BoundingBox, FeatureSource, GeoError, GroupStats, PreviewBuild, PreviewConfig,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "citytimeline")]
#[command(about = "Inspect water-network GeoJSON and build preview samples")]
#[command(version)]
struct Args {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print feature counts, stats and bounds for GeoJSON files
    Inspect {
        /// FeatureCollection files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Run the preview pipeline described by a config file
    Run {
        /// Path to preview.toml
        #[arg(short, long, env = "CITYTIMELINE_CONFIG", default_value = "preview.toml")]
        config: PathBuf,

        /// Write the sampled polylines as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Command::Inspect { files } => {
            for file in &files {
                inspect(file).with_context(|| format!("inspecting {}", file.display()))?;
            }
            Ok(())
        }
        Command::Run { config, output } => run(&config, output.as_deref()),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn inspect(path: &Path) -> Result<()> {
    let source = FeatureSource::from_path(path)?;
    let lines = source.line_geometries()?;
    let rings = source.polygon_outer_rings()?;

    println!("{}", path.display());
    println!("  features:    {}", source.feature_count());
    print_stats("line parts:", GroupStats::of(&lines));
    print_stats("outer rings:", GroupStats::of(&rings));

    match citytimeline_geo::compute_bounding_box(&[&lines, &rings]) {
        Ok(bounds) => print_bounds(&bounds),
        Err(GeoError::EmptyInput) => println!("  bounds:      (no coordinates)"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn run(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let config = PreviewConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    let build = run_pipeline(&config.pipeline_inputs(config_dir))?;

    print_summary(&build);

    if let Some(output) = output {
        let json = serde_json::to_string_pretty(&build)?;
        std::fs::write(output, json).with_context(|| format!("writing {}", output.display()))?;
        tracing::info!("Wrote {} polylines to {}", build.polyline_count(), output.display());
    }
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn print_stats(label: &str, stats: GroupStats) {
    println!("  {:<12} {} ({} pts)", label, stats.parts, stats.points);
}

fn print_bounds(bounds: &BoundingBox) {
    println!(
        "  bounds:      min=({:.2}, {:.2}) max=({:.2}, {:.2}) size=({:.2} x {:.2})",
        bounds.min.x,
        bounds.min.y,
        bounds.max.x,
        bounds.max.y,
        bounds.width(),
        bounds.height()
    );
}

fn print_summary(build: &PreviewBuild) {
    println!("features:    lines {}, areas {}", build.line_features, build.area_features);
    print_stats("line parts:", build.line_stats);
    print_stats("area rings:", build.area_stats);
    print_bounds(&build.bounds);
    println!("scale:       {}", build.transform.scale());
    println!(
        "samples:     {} lines, {} areas ({} pts)",
        build.samples.len(),
        build.area_samples.len(),
        GroupStats::of(&build.samples).points + GroupStats::of(&build.area_samples).points
    );
}
