//! Command-line argument parsing for the landscape generator.

use std::path::PathBuf;

use clap::Parser;

use crate::LandscapeConfig;

/// Landscape generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "landscape", about = "Clustered biome landscape generator")]
pub struct CliArgs {
    /// Side length of the terrain grid.
    #[arg(long)]
    pub size: Option<f64>,

    /// Grid cells per side.
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// Number of k-means regions.
    #[arg(long)]
    pub clusters: Option<usize>,

    /// Trees to place.
    #[arg(long)]
    pub trees: Option<usize>,

    /// Rocks to place.
    #[arg(long)]
    pub rocks: Option<usize>,

    /// Height noise frequency.
    #[arg(long)]
    pub noise_scale: Option<f64>,

    /// Run seed for a reproducible landscape.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl LandscapeConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.size {
            self.terrain.size = size;
        }
        if let Some(subdivisions) = args.subdivisions {
            self.terrain.subdivisions = subdivisions;
        }
        if let Some(k) = args.clusters {
            self.regions.n_clusters = k;
        }
        if let Some(trees) = args.trees {
            self.props.tree_count = trees;
        }
        if let Some(rocks) = args.rocks {
            self.props.rock_count = rocks;
        }
        if let Some(scale) = args.noise_scale {
            self.terrain.noise_scale = scale;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = LandscapeConfig::default();
        let args = CliArgs {
            subdivisions: Some(20),
            clusters: Some(4),
            seed: Some(99),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.subdivisions, 20);
        assert_eq!(config.regions.n_clusters, 4);
        assert_eq!(config.seed, Some(99));
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.size, 30.0);
        assert_eq!(config.props.tree_count, 50);
    }

    #[test]
    fn test_cli_no_override() {
        let original = LandscapeConfig::default();
        let mut config = LandscapeConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "landscape",
            "--size",
            "12.5",
            "--trees",
            "10",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.size, Some(12.5));
        assert_eq!(args.trees, Some(10));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.rocks, None);
    }
}
