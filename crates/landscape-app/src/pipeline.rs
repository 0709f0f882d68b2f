//! The generation pipeline: grid, regions, heights, materials, faces, props,
//! and dressing, run once and in order.

use landscape_config::LandscapeConfig;
use landscape_materials::MaterialId;
use landscape_mesh::GridMesh;
use landscape_scene::{MeshHandle, ObjectHandle, SceneBackend};
use landscape_terrain::{
    BiomeTable, ConfigurationError, HeightSynthesizer, KMeans, PropScatterer, RegionLabel,
    RngStream, ScatterParams, TerrainError, TreeHandles, classify_faces, stream_rng,
};

use crate::dressing::{self, Dressing};
use crate::error::{GenerationError, InStage, Stage};

/// Name of the terrain mesh in the scene.
pub const TERRAIN_MESH_NAME: &str = "Terrain";

/// Everything the pipeline needs besides the biome table, backend, and seed.
#[derive(Clone, Debug, PartialEq)]
pub struct LandscapeParams {
    /// Side length of the square grid.
    pub size: f64,
    /// Grid cells per side.
    pub subdivisions: u32,
    /// Height noise frequency.
    pub noise_scale: f64,
    /// Region clustering parameters.
    pub clustering: KMeans,
    /// Prop placement parameters.
    pub scatter: ScatterParams,
}

impl Default for LandscapeParams {
    fn default() -> Self {
        Self::from(&LandscapeConfig::default())
    }
}

impl From<&LandscapeConfig> for LandscapeParams {
    fn from(config: &LandscapeConfig) -> Self {
        Self {
            size: config.terrain.size,
            subdivisions: config.terrain.subdivisions,
            noise_scale: config.terrain.noise_scale,
            clustering: KMeans {
                k: config.regions.n_clusters,
                max_iterations: config.regions.max_iterations,
                tolerance: config.regions.tolerance,
            },
            scatter: ScatterParams {
                tree_count: config.props.tree_count,
                rock_count: config.props.rock_count,
                ..Default::default()
            },
        }
    }
}

/// What a successful run built.
#[derive(Clone, Debug, PartialEq)]
pub struct LandscapeReport {
    /// Seed the run was generated from.
    pub seed: u64,
    /// The terrain mesh.
    pub terrain: MeshHandle,
    /// Terrain vertex count.
    pub vertex_count: usize,
    /// Terrain face count.
    pub face_count: usize,
    /// Region label of every vertex, in vertex order.
    pub vertex_labels: Vec<RegionLabel>,
    /// Vertices per region label.
    pub cluster_sizes: Vec<usize>,
    /// Lloyd iterations the clustering took.
    pub iterations: usize,
    /// Whether clustering converged before the iteration cap.
    pub converged: bool,
    /// Lowest and highest vertex elevation.
    pub elevation_range: (f64, f64),
    /// Biome materials, indexed by region label.
    pub biome_materials: Vec<MaterialId>,
    /// Majority label of every face, in face order.
    pub face_labels: Vec<RegionLabel>,
    /// Placed trees.
    pub trees: Vec<TreeHandles>,
    /// Placed rocks.
    pub rocks: Vec<ObjectHandle>,
    /// Water, camera, and sun.
    pub dressing: Dressing,
}

impl LandscapeReport {
    /// Primitives created for props: four per tree, one per rock.
    pub fn prop_primitive_count(&self) -> usize {
        self.trees
            .iter()
            .map(TreeHandles::primitive_count)
            .sum::<usize>()
            + self.rocks.len()
    }
}

impl LandscapeParams {
    /// Checks every parameter against `table` before any stage runs.
    ///
    /// Each error is tagged with the stage that would have tripped over it.
    ///
    /// # Errors
    ///
    /// A configuration [`GenerationError`] for the first bad parameter.
    pub fn validate(&self, table: &BiomeTable) -> Result<(), GenerationError> {
        GridMesh::check(self.size, self.subdivisions).in_stage(Stage::Grid)?;

        let k = self.clustering.k;
        if k == 0 {
            return Err(ConfigurationError::ZeroClusters).in_stage(Stage::Classify);
        }
        if k > table.len() {
            return Err(ConfigurationError::ClustersExceedBiomes {
                k,
                biomes: table.len(),
            })
            .in_stage(Stage::Classify);
        }
        if self.clustering.max_iterations == 0 {
            return Err(ConfigurationError::ZeroCount("max_iterations")).in_stage(Stage::Classify);
        }

        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(ConfigurationError::NonPositive {
                name: "noise_scale",
                value: self.noise_scale,
            })
            .in_stage(Stage::Heights);
        }

        if self.scatter.tree_count == 0 {
            return Err(ConfigurationError::ZeroCount("tree_count")).in_stage(Stage::Trees);
        }
        if self.scatter.rock_count == 0 {
            return Err(ConfigurationError::ZeroCount("rock_count")).in_stage(Stage::Rocks);
        }
        Ok(())
    }
}

/// Generates a complete landscape into `backend`.
///
/// Randomness comes only from `seed`: each random stage gets its own stream,
/// so the same seed and parameters reproduce the same scene.
///
/// The whole landscape is computed first and only then written to the
/// backend, so parameter errors, degenerate clusters, and empty prop passes
/// leave the backend untouched.
///
/// # Errors
///
/// Stops at the first failing stage and reports it. A backend failure during
/// the write-out aborts at the call that failed.
pub fn generate<B: SceneBackend>(
    params: &LandscapeParams,
    table: &BiomeTable,
    backend: &mut B,
    seed: u64,
) -> Result<LandscapeReport, GenerationError> {
    let _run = tracing::info_span!("generate", seed).entered();
    params.validate(table)?;

    // Grid
    let mut mesh = {
        let _span = tracing::info_span!("grid", subdivisions = params.subdivisions).entered();
        let mesh = GridMesh::new(params.size, params.subdivisions).in_stage(Stage::Grid)?;
        tracing::info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "grid built"
        );
        mesh
    };
    let flat = mesh.vertices.clone();

    // Classify
    let clustering = {
        let _span = tracing::info_span!("classify", k = params.clustering.k).entered();
        let mut rng = stream_rng(seed, RngStream::Clustering);
        let clustering = params
            .clustering
            .fit(&mesh.positions_xy(), &mut rng)
            .in_stage(Stage::Classify)?;
        tracing::info!(
            iterations = clustering.iterations,
            converged = clustering.converged,
            sizes = ?clustering.cluster_sizes(),
            "regions classified"
        );
        clustering
    };
    let labels = &clustering.labels;

    // Heights
    let heights = {
        let _span = tracing::info_span!("heights", scale = params.noise_scale).entered();
        let synth = HeightSynthesizer::new(table, params.noise_scale);
        let mut rng = stream_rng(seed, RngStream::Heights);
        synth
            .apply(&mut mesh, labels, &mut rng)
            .in_stage(Stage::Heights)?
    };

    // Surface
    let face_labels = {
        let _span = tracing::info_span!("surface", faces = mesh.face_count()).entered();
        let face_labels = classify_faces(&mesh.faces, labels).in_stage(Stage::Surface)?;
        if let Some(label) = face_labels.iter().find(|l| l.index() >= table.len()) {
            return Err(TerrainError::UnmappedLabel(*label)).in_stage(Stage::Surface);
        }
        face_labels
    };

    // Props
    let scatterer = PropScatterer::new(table, params.scatter.clone());
    let positions = &mesh.vertices;
    let tree_sites = {
        let _span = tracing::info_span!("trees", count = params.scatter.tree_count).entered();
        let mut rng = stream_rng(seed, RngStream::Trees);
        scatterer
            .plan_trees(positions, labels, &mut rng)
            .in_stage(Stage::Trees)?
    };
    let rock_sites = {
        let _span = tracing::info_span!("rocks", count = params.scatter.rock_count).entered();
        let mut rng = stream_rng(seed, RngStream::Rocks);
        scatterer
            .plan_rocks(positions, labels, &mut rng)
            .in_stage(Stage::Rocks)?
    };

    let water_level = dressing::water_level(&heights, labels, table);

    // Everything below writes to the backend.
    let terrain = backend
        .create_mesh(TERRAIN_MESH_NAME, &flat, &mesh.faces)
        .in_stage(Stage::Grid)?;
    for (vertex, &z) in heights.iter().enumerate() {
        backend
            .set_vertex_z(terrain, vertex, z)
            .in_stage(Stage::Heights)?;
    }

    let biome_materials =
        dressing::register_biome_materials(backend, table).in_stage(Stage::Materials)?;
    let prop_materials = scatterer
        .register_materials(backend)
        .in_stage(Stage::Materials)?;
    tracing::debug!(biomes = biome_materials.len(), "materials registered");

    for (face, label) in face_labels.iter().enumerate() {
        let material = biome_materials
            .get(label.index())
            .copied()
            .ok_or(TerrainError::UnmappedLabel(*label))
            .in_stage(Stage::Surface)?;
        backend
            .set_face_material(terrain, face, material)
            .in_stage(Stage::Surface)?;
    }

    let trees = scatterer
        .place_trees(backend, &prop_materials, &tree_sites)
        .in_stage(Stage::Trees)?;
    let rocks = scatterer
        .place_rocks(backend, &prop_materials, &rock_sites)
        .in_stage(Stage::Rocks)?;

    let dressing =
        dressing::dress_scene(backend, params.size, water_level).in_stage(Stage::Dressing)?;

    let elevation_range = heights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        });

    Ok(LandscapeReport {
        seed,
        terrain,
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        cluster_sizes: clustering.cluster_sizes(),
        iterations: clustering.iterations,
        converged: clustering.converged,
        vertex_labels: clustering.labels,
        elevation_range,
        biome_materials,
        face_labels,
        trees,
        rocks,
        dressing,
    })
}
