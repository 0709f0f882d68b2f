//! Prop placement: biome-filtered random sampling of vertices and
//! instantiation of tree and rock primitives through the scene backend.

use glam::DVec3;
use landscape_materials::{MaterialId, palette};
use landscape_scene::{BackendError, ObjectHandle, Primitive, SceneBackend, Transform};
use rand::Rng;

use crate::biome::{Biome, BiomeTable, RegionLabel};
use crate::error::{ConfigurationError, PropPass, TerrainError};

/// Geometry of a tree: a trunk cylinder under stacked, shrinking cones.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeShape {
    /// Trunk cylinder radius.
    pub trunk_radius: f64,
    /// Trunk cylinder height. The trunk is centred on the placement point.
    pub trunk_depth: f64,
    /// Number of foliage cones.
    pub layers: u32,
    /// Base radius of the lowest cone.
    pub base_radius: f64,
    /// Radius lost per layer going up.
    pub radius_step: f64,
    /// Height of every cone.
    pub layer_depth: f64,
    /// Height of the lowest cone's centre above the placement point.
    pub first_layer_offset: f64,
    /// Vertical distance between successive cone centres.
    pub layer_spacing: f64,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            trunk_radius: 0.07,
            trunk_depth: 0.6,
            layers: 3,
            base_radius: 0.25,
            radius_step: 0.07,
            layer_depth: 0.5,
            first_layer_offset: 0.5,
            layer_spacing: 0.3,
        }
    }
}

impl TreeShape {
    /// Trunk primitive.
    pub fn trunk(&self) -> Primitive {
        Primitive::Cylinder {
            radius: self.trunk_radius,
            depth: self.trunk_depth,
        }
    }

    /// Cone primitive for `layer` and its height above the placement point.
    pub fn layer(&self, layer: u32) -> (Primitive, f64) {
        let cone = Primitive::Cone {
            radius: self.base_radius - self.radius_step * layer as f64,
            depth: self.layer_depth,
        };
        let offset = self.first_layer_offset + self.layer_spacing * layer as f64;
        (cone, offset)
    }
}

/// Geometry of a rock: a low-subdivision icosphere.
#[derive(Clone, Debug, PartialEq)]
pub struct RockShape {
    /// Icosphere refinement level.
    pub subdivisions: u32,
    /// Radius.
    pub radius: f64,
}

impl Default for RockShape {
    fn default() -> Self {
        Self {
            subdivisions: 2,
            radius: 0.15,
        }
    }
}

impl RockShape {
    /// Rock primitive.
    pub fn primitive(&self) -> Primitive {
        Primitive::IcoSphere {
            subdivisions: self.subdivisions,
            radius: self.radius,
        }
    }
}

/// Counts, jitter, and shapes for both placement passes.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterParams {
    /// Trees to place (sampled with replacement).
    pub tree_count: usize,
    /// Rocks to place (sampled with replacement).
    pub rock_count: usize,
    /// Half-width of the XY jitter applied to tree positions.
    pub tree_jitter: f64,
    /// Half-width of the XY jitter applied to rock positions.
    pub rock_jitter: f64,
    /// Tree geometry.
    pub tree: TreeShape,
    /// Rock geometry.
    pub rock: RockShape,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            tree_count: 50,
            rock_count: 20,
            tree_jitter: 0.1,
            rock_jitter: 0.3,
            tree: TreeShape::default(),
            rock: RockShape::default(),
        }
    }
}

/// Materials shared by every prop of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct PropMaterials {
    trunk: MaterialId,
    leaves: Vec<MaterialId>,
    rock: MaterialId,
}

impl PropMaterials {
    /// Trunk material.
    pub fn trunk(&self) -> MaterialId {
        self.trunk
    }

    /// Foliage material for `layer`.
    pub fn leaf(&self, layer: u32) -> Option<MaterialId> {
        self.leaves.get(layer as usize).copied()
    }

    /// Rock material.
    pub fn rock(&self) -> MaterialId {
        self.rock
    }
}

/// Handles of the primitives making up one tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeHandles {
    /// Trunk cylinder.
    pub trunk: ObjectHandle,
    /// Foliage cones, bottom to top.
    pub layers: Vec<ObjectHandle>,
}

impl TreeHandles {
    /// Number of primitives in this tree.
    pub fn primitive_count(&self) -> usize {
        1 + self.layers.len()
    }
}

/// Vertex indices whose label maps to a biome accepted by `accept`.
///
/// Labels without a biome entry are never eligible.
pub fn eligible_vertices(
    labels: &[RegionLabel],
    table: &BiomeTable,
    accept: impl Fn(Biome) -> bool,
) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, label)| table.get(**label).is_some_and(|def| accept(def.biome)))
        .map(|(i, _)| i)
        .collect()
}

/// Draws `count` placement points, uniformly and with replacement, from the
/// `eligible` vertices of `positions`. Each point is the vertex position
/// moved by `U[-jitter, jitter]` in X and Y; Z is unchanged.
///
/// # Errors
///
/// Returns [`ConfigurationError::ZeroCount`] if `count == 0` and
/// [`TerrainError::EmptySelection`] if `eligible` is empty.
pub fn sample_placements<R: Rng>(
    rng: &mut R,
    pass: PropPass,
    eligible: &[usize],
    positions: &[DVec3],
    count: usize,
    jitter: f64,
) -> Result<Vec<DVec3>, TerrainError> {
    if count == 0 {
        let name = match pass {
            PropPass::Trees => "tree_count",
            PropPass::Rocks => "rock_count",
        };
        return Err(ConfigurationError::ZeroCount(name).into());
    }
    if eligible.is_empty() {
        return Err(TerrainError::EmptySelection { pass });
    }

    let mut placements = Vec::with_capacity(count);
    for _ in 0..count {
        let index = eligible[rng.random_range(0..eligible.len())];
        let source = positions
            .get(index)
            .copied()
            .ok_or(ConfigurationError::LabelCountMismatch {
                labels: index + 1,
                vertices: positions.len(),
            })?;
        let (dx, dy) = if jitter > 0.0 {
            (
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            )
        } else {
            (0.0, 0.0)
        };
        placements.push(DVec3::new(source.x + dx, source.y + dy, source.z));
    }
    Ok(placements)
}

/// Scatters trees and rocks according to a [`BiomeTable`].
pub struct PropScatterer<'a> {
    table: &'a BiomeTable,
    params: ScatterParams,
}

impl<'a> PropScatterer<'a> {
    /// Creates a scatterer.
    pub fn new(table: &'a BiomeTable, params: ScatterParams) -> Self {
        Self { table, params }
    }

    /// Placement parameters.
    pub fn params(&self) -> &ScatterParams {
        &self.params
    }

    /// Registers trunk, one foliage shade per tree layer, and rock materials.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`].
    pub fn register_materials<B: SceneBackend>(
        &self,
        backend: &mut B,
    ) -> Result<PropMaterials, TerrainError> {
        let trunk = backend.register_material(&palette::trunk())?;
        let leaves = (0..self.params.tree.layers)
            .map(|layer| backend.register_material(&palette::leaves(layer)))
            .collect::<Result<Vec<_>, _>>()?;
        let rock = backend.register_material(&palette::rock())?;
        Ok(PropMaterials {
            trunk,
            leaves,
            rock,
        })
    }

    /// Draws `tree_count` placement points on grassland and forest vertices.
    ///
    /// Touches no backend, so a failed draw leaves the scene untouched.
    ///
    /// # Errors
    ///
    /// [`TerrainError::EmptySelection`] if no vertex is eligible, or a
    /// configuration error for a zero count or mismatched inputs.
    pub fn plan_trees<R: Rng>(
        &self,
        positions: &[DVec3],
        labels: &[RegionLabel],
        rng: &mut R,
    ) -> Result<Vec<DVec3>, TerrainError> {
        check_lengths(positions, labels)?;
        let eligible = eligible_vertices(labels, self.table, Biome::hosts_trees);
        let placements = sample_placements(
            rng,
            PropPass::Trees,
            &eligible,
            positions,
            self.params.tree_count,
            self.params.tree_jitter,
        )?;
        tracing::debug!(eligible = eligible.len(), "tree sites drawn");
        Ok(placements)
    }

    /// Draws `rock_count` placement points on mountain vertices.
    ///
    /// # Errors
    ///
    /// Same as [`PropScatterer::plan_trees`].
    pub fn plan_rocks<R: Rng>(
        &self,
        positions: &[DVec3],
        labels: &[RegionLabel],
        rng: &mut R,
    ) -> Result<Vec<DVec3>, TerrainError> {
        check_lengths(positions, labels)?;
        let eligible = eligible_vertices(labels, self.table, Biome::hosts_rocks);
        let placements = sample_placements(
            rng,
            PropPass::Rocks,
            &eligible,
            positions,
            self.params.rock_count,
            self.params.rock_jitter,
        )?;
        tracing::debug!(eligible = eligible.len(), "rock sites drawn");
        Ok(placements)
    }

    /// Instantiates a tree at every point of `placements`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BackendError`].
    pub fn place_trees<B: SceneBackend>(
        &self,
        backend: &mut B,
        materials: &PropMaterials,
        placements: &[DVec3],
    ) -> Result<Vec<TreeHandles>, BackendError> {
        let trees = placements
            .iter()
            .map(|&location| self.build_tree(backend, materials, location))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(trees = trees.len(), "trees scattered");
        Ok(trees)
    }

    /// Instantiates a rock at every point of `placements`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BackendError`].
    pub fn place_rocks<B: SceneBackend>(
        &self,
        backend: &mut B,
        materials: &PropMaterials,
        placements: &[DVec3],
    ) -> Result<Vec<ObjectHandle>, BackendError> {
        let rocks = placements
            .iter()
            .map(|&location| self.build_rock(backend, materials, location))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(rocks = rocks.len(), "rocks scattered");
        Ok(rocks)
    }

    /// Draws and places trees in one go. See [`PropScatterer::plan_trees`].
    ///
    /// # Errors
    ///
    /// Any planning error, before anything is created, or a backend failure.
    pub fn scatter_trees<B: SceneBackend, R: Rng>(
        &self,
        backend: &mut B,
        materials: &PropMaterials,
        positions: &[DVec3],
        labels: &[RegionLabel],
        rng: &mut R,
    ) -> Result<Vec<TreeHandles>, TerrainError> {
        let placements = self.plan_trees(positions, labels, rng)?;
        Ok(self.place_trees(backend, materials, &placements)?)
    }

    /// Draws and places rocks in one go. See [`PropScatterer::plan_rocks`].
    ///
    /// # Errors
    ///
    /// Any planning error, before anything is created, or a backend failure.
    pub fn scatter_rocks<B: SceneBackend, R: Rng>(
        &self,
        backend: &mut B,
        materials: &PropMaterials,
        positions: &[DVec3],
        labels: &[RegionLabel],
        rng: &mut R,
    ) -> Result<Vec<ObjectHandle>, TerrainError> {
        let placements = self.plan_rocks(positions, labels, rng)?;
        Ok(self.place_rocks(backend, materials, &placements)?)
    }

    /// Instantiates one tree at `location`.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`].
    pub fn build_tree<B: SceneBackend>(
        &self,
        backend: &mut B,
        materials: &PropMaterials,
        location: DVec3,
    ) -> Result<TreeHandles, BackendError> {
        let shape = &self.params.tree;

        let trunk =
            backend.instantiate_primitive(&shape.trunk(), Transform::from_translation(location))?;
        backend.assign_material(trunk, materials.trunk())?;

        let mut layers = Vec::with_capacity(shape.layers as usize);
        for layer in 0..shape.layers {
            let (cone, offset) = shape.layer(layer);
            let at = location + DVec3::Z * offset;
            let handle = backend.instantiate_primitive(&cone, Transform::from_translation(at))?;
            if let Some(leaf) = materials.leaf(layer) {
                backend.assign_material(handle, leaf)?;
            }
            layers.push(handle);
        }

        Ok(TreeHandles { trunk, layers })
    }

    /// Instantiates one rock at `location`.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`].
    pub fn build_rock<B: SceneBackend>(
        &self,
        backend: &mut B,
        materials: &PropMaterials,
        location: DVec3,
    ) -> Result<ObjectHandle, BackendError> {
        let rock = backend.instantiate_primitive(
            &self.params.rock.primitive(),
            Transform::from_translation(location),
        )?;
        backend.assign_material(rock, materials.rock())?;
        Ok(rock)
    }
}

fn check_lengths(positions: &[DVec3], labels: &[RegionLabel]) -> Result<(), ConfigurationError> {
    if positions.len() != labels.len() {
        return Err(ConfigurationError::LabelCountMismatch {
            labels: labels.len(),
            vertices: positions.len(),
        });
    }
    Ok(())
}
