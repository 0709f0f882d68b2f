//! `landscape` binary: generates one landscape into an in-memory scene and
//! logs a summary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p landscape-app -- --seed 42 --clusters 4`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use landscape_app::{LandscapeParams, generate};
use landscape_config::{CliArgs, LandscapeConfig};
use landscape_scene::{PrimitiveKind, RecordingBackend};
use landscape_terrain::BiomeTable;
use rand::Rng;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("landscape")
    });

    let mut config = LandscapeConfig::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        LandscapeConfig::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    landscape_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::rng().random::<u64>();
            info!(seed, "no seed configured; pass --seed {seed} to replay this run");
            seed
        }
    };

    let params = LandscapeParams::from(&config);
    let table = BiomeTable::standard();
    let mut backend = RecordingBackend::new();

    match generate(&params, &table, &mut backend, seed) {
        Ok(report) => {
            info!(
                seed = report.seed,
                vertices = report.vertex_count,
                faces = report.face_count,
                regions = ?report.cluster_sizes,
                iterations = report.iterations,
                min_elevation = report.elevation_range.0,
                max_elevation = report.elevation_range.1,
                "terrain generated"
            );
            info!(
                trees = report.trees.len(),
                rocks = report.rocks.len(),
                cylinders = backend.primitive_count(PrimitiveKind::Cylinder),
                cones = backend.primitive_count(PrimitiveKind::Cone),
                icospheres = backend.primitive_count(PrimitiveKind::IcoSphere),
                water_level = report.dressing.water_level,
                materials = backend.materials().len(),
                "scene dressed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = %e.stage, error = %e, "landscape generation failed");
            ExitCode::FAILURE
        }
    }
}
