//! Command-line front end for room scans.
//!
//! # Commands
//!
//! - `scan-cli fuse <fragments.json>` - fuse fragments and export OBJ/JSON
//! - `scan-cli calibrate --reference <obj> --corner x,y ...` - manual scale
//!   calibration
//! - `scan-cli instructions` - how to place a reference object

mod args;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cf_capture::CoreConfig;
use clap::{Parser, Subcommand};
use mesh::prelude::*;
use sensor_calib::{
    ImagePoint, ImageSize, ReferenceObject, ScaleCalibrator, instructions,
    recommended_reference_objects,
};
use tracing::info;

/// Fragment fusion and scale calibration for room scans
#[derive(Parser)]
#[command(name = "scan-cli")]
#[command(about = "Fuse scan fragments and calibrate scale", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuse mesh fragments read from a JSON array
    Fuse {
        /// Fragments file: `[{"vertices": [[x,y,z], ...], "faces": [[a,b,c], ...], ...}]`
        #[arg(name = "FRAGMENTS")]
        fragments: PathBuf,

        /// Capture config (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the fused mesh as OBJ
        #[arg(long)]
        obj: Option<PathBuf>,

        /// Write the fused mesh as a JSON payload
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Calibrate scale from four manually placed corners
    Calibrate {
        /// credit-card, us-letter, or WxH in millimetres
        #[arg(long, value_parser = args::parse_reference, default_value = "credit-card")]
        reference: ReferenceObject,

        /// Normalized corner x,y; give four, in TL, TR, BR, BL order
        #[arg(long = "corner", value_parser = args::parse_corner, allow_hyphen_values = true)]
        corners: Vec<ImagePoint>,

        /// Image size WxH in pixels
        #[arg(long, value_parser = args::parse_image_size, default_value = "1x1")]
        image: ImageSize,

        /// Capture config (JSON) for validation thresholds
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how to place a reference object
    Instructions {
        /// credit-card, us-letter, or WxH in millimetres
        #[arg(long, value_parser = args::parse_reference)]
        reference: Option<ReferenceObject>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fuse {
            fragments,
            config,
            obj,
            json,
        } => run_fuse(&fragments, config.as_deref(), obj.as_deref(), json.as_deref()),
        Commands::Calibrate {
            reference,
            corners,
            image,
            config,
        } => run_calibrate(reference, &corners, image, config.as_deref()),
        Commands::Instructions { reference } => {
            run_instructions(reference);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CoreConfig> {
    match path {
        Some(path) => CoreConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CoreConfig::default()),
    }
}

fn run_fuse(
    fragments_path: &Path,
    config_path: Option<&Path>,
    obj_path: Option<&Path>,
    json_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;

    let content = std::fs::read_to_string(fragments_path)
        .with_context(|| format!("Failed to read {}", fragments_path.display()))?;
    let fragments: Vec<MeshFragment> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fragments in {}", fragments_path.display()))?;
    info!(fragments = fragments.len(), "Loaded fragments");

    let Some(result) = fuse_fragments_detailed(&fragments, &config.fuse) else {
        bail!("No geometry to fuse in {}", fragments_path.display());
    };
    println!("{result}");
    if let Some(bounds) = result.mesh.bounds_opt() {
        let size = bounds.size();
        println!(
            "Room bounds: {:.3} x {:.3} x {:.3}",
            size.x, size.y, size.z
        );
    }

    if let Some(path) = obj_path {
        save_obj(&result.mesh, path).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote OBJ");
    }
    if let Some(path) = json_path {
        save_json(&result.mesh, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote JSON payload");
    }
    Ok(())
}

fn run_calibrate(
    reference: ReferenceObject,
    corners: &[ImagePoint],
    image: ImageSize,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut calibrator = ScaleCalibrator::new(config.calibration);

    let Some(result) = calibrator.calibrate_manually(corners, image, reference) else {
        bail!("Manual calibration needs exactly four corners, got {}", corners.len());
    };
    println!("{result}");

    if calibrator.validate(&result) {
        println!("Result is plausible");
        Ok(())
    } else {
        let [min, max] = calibrator.params().scale_band;
        bail!(
            "Scale {:.3e} m/unit is outside [{min:e}, {max:e}]",
            result.scale_factor
        )
    }
}

fn run_instructions(reference: Option<ReferenceObject>) {
    match reference {
        Some(reference) => println!("{}", instructions(&reference)),
        None => {
            println!("Recommended reference objects:");
            for reference in recommended_reference_objects() {
                println!("  {reference}");
                println!("    {}", instructions(&reference));
            }
        }
    }
}
