//! Configuration for the landscape generator.
//!
//! Settings persist to disk as a RON file with every section defaulted, so
//! older or partial files keep loading. CLI flags parsed with clap override
//! whatever the file says.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{DebugConfig, LandscapeConfig, PropConfig, RegionConfig, TerrainConfig};
pub use error::ConfigError;
