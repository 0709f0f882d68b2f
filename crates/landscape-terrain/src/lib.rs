//! Clustered terrain synthesis: k-means region partitioning, biome height
//! profiles, majority-vote surface classification, and prop scattering.

mod cluster;
mod error;
mod height;
mod props;
mod seed;
mod surface;

pub mod biome;

pub use biome::{Biome, BiomeDef, BiomeTable, BiomeTableError, HeightProfile, RegionLabel};
pub use cluster::{Clustering, KMeans};
pub use error::{ConfigurationError, PropPass, TerrainError};
pub use height::{HeightSynthesizer, NOISE_AMPLITUDE, trig_noise};
pub use props::{
    PropMaterials, PropScatterer, RockShape, ScatterParams, TreeHandles, TreeShape,
    eligible_vertices, sample_placements,
};
pub use seed::{RngStream, stream_rng};
pub use surface::{classify_faces, majority_label};
