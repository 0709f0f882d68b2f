//! Terrain generation error types.

use std::fmt;

use landscape_mesh::MeshError;
use landscape_scene::BackendError;

use crate::biome::RegionLabel;

/// Which prop placement pass an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropPass {
    /// Trees on grassland and forest.
    Trees,
    /// Rocks on mountains.
    Rocks,
}

impl fmt::Display for PropPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropPass::Trees => write!(f, "tree"),
            PropPass::Rocks => write!(f, "rock"),
        }
    }
}

/// Parameter combinations that can never produce a valid landscape.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    /// Clustering needs at least one cluster.
    #[error("cluster count must be at least 1")]
    ZeroClusters,

    /// More clusters requested than there are distinct points to seed them.
    #[error("cannot form {k} clusters from {distinct} distinct points")]
    TooFewDistinctPoints {
        /// Requested cluster count.
        k: usize,
        /// Distinct input points.
        distinct: usize,
    },

    /// Region labels are stored as `u16`.
    #[error("cluster count {0} exceeds the label range")]
    TooManyClusters(usize),

    /// Some cluster labels would have no biome to map to.
    #[error("{k} clusters requested but the biome table has only {biomes} entries")]
    ClustersExceedBiomes {
        /// Requested cluster count.
        k: usize,
        /// Biome table size.
        biomes: usize,
    },

    /// A count parameter was zero.
    #[error("`{0}` must be greater than zero")]
    ZeroCount(&'static str),

    /// A scalar parameter was not finite and positive.
    #[error("`{name}` must be finite and positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Per-vertex inputs disagree in length.
    #[error("{labels} labels for {vertices} vertices")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of vertices.
        vertices: usize,
    },
}

/// Errors produced by the terrain synthesis stages.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TerrainError {
    /// Invalid parameters.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A prop pass found no vertex it is allowed to use.
    #[error("{pass} pass has no eligible vertices")]
    EmptySelection {
        /// The pass that had nothing to sample.
        pass: PropPass,
    },

    /// A cluster ended up with no members.
    #[error("cluster {label} is empty after {iterations} iterations")]
    DegenerateCluster {
        /// The empty cluster.
        label: RegionLabel,
        /// Iterations run before giving up.
        iterations: usize,
    },

    /// A vertex carries a label the biome table does not cover.
    #[error("region label {0} has no biome definition")]
    UnmappedLabel(RegionLabel),

    /// A face references a vertex without a label.
    #[error("face {face} references vertex {vertex}, but only {len} vertices are labelled")]
    VertexOutOfRange {
        /// Face index.
        face: usize,
        /// Referenced vertex.
        vertex: u32,
        /// Number of labelled vertices.
        len: usize,
    },

    /// A face has no vertices.
    #[error("face {0} has no vertices")]
    EmptyFace(usize),

    /// Grid construction failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The scene backend refused an operation.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TerrainError {
    /// Returns `true` for errors caused by invalid parameters rather than by
    /// the backend or by an unlucky random draw.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TerrainError::Configuration(_) | TerrainError::Mesh(_))
    }
}
