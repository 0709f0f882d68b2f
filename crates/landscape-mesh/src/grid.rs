//! Planar grid mesh: `(subdivisions + 1)²` vertices spread evenly over a square,
//! connected by `subdivisions²` quads.

use glam::{DVec2, DVec3};
use thiserror::Error;

/// A quad face: four vertex indices, counter-clockwise when seen from +Z.
pub type Quad = [u32; 4];

/// Largest accepted subdivision count. Keeps every vertex index well inside `u32`.
pub const MAX_SUBDIVISIONS: u32 = 4096;

/// Errors returned while building a grid.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// A grid needs at least one subdivision per axis.
    #[error("grid needs at least one subdivision per axis")]
    NoSubdivisions,

    /// Too many cells for `u32` face indices and a sane vertex buffer.
    #[error("grid of {requested} subdivisions exceeds the limit of {max}")]
    TooManySubdivisions {
        /// Requested subdivisions per axis.
        requested: u32,
        /// [`MAX_SUBDIVISIONS`].
        max: u32,
    },

    /// The world-space extent must be finite and strictly positive.
    #[error("grid size must be finite and positive, got {0}")]
    InvalidSize(f64),

    /// A vertex index fell outside the vertex buffer.
    #[error("vertex index {index} out of range (mesh has {len} vertices)")]
    VertexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of vertices in the mesh.
        len: usize,
    },
}

/// A flat, evenly subdivided square mesh centred on the origin.
///
/// Vertices are stored row-major: `y` is the outer loop, `x` the inner one, so
/// vertex `(col, row)` lives at index `row * (subdivisions + 1) + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMesh {
    /// Vertex positions. `z` starts at 0 and is later replaced by terrain height.
    pub vertices: Vec<DVec3>,
    /// Quad connectivity.
    pub faces: Vec<Quad>,
    size: f64,
    subdivisions: u32,
}

impl GridMesh {
    /// Builds a grid spanning `[-size/2, size/2]²` with `subdivisions` cells per axis.
    ///
    /// # Errors
    ///
    /// See [`GridMesh::check`].
    pub fn new(size: f64, subdivisions: u32) -> Result<Self, MeshError> {
        Self::check(size, subdivisions)?;

        let per_axis = subdivisions as usize + 1;
        let half = size * 0.5;
        let step = size / subdivisions as f64;

        // Edge vertices are pinned so the grid spans exactly ±size/2.
        let coord = |i: usize| {
            if i == per_axis - 1 {
                half
            } else {
                -half + i as f64 * step
            }
        };

        let mut vertices = Vec::with_capacity(per_axis * per_axis);
        for row in 0..per_axis {
            let y = coord(row);
            for col in 0..per_axis {
                vertices.push(DVec3::new(coord(col), y, 0.0));
            }
        }

        let n = per_axis as u32;
        let mut faces = Vec::with_capacity(subdivisions as usize * subdivisions as usize);
        for row in 0..subdivisions {
            for col in 0..subdivisions {
                let base = row * n + col;
                faces.push([base, base + 1, base + n + 1, base + n]);
            }
        }

        Ok(Self {
            vertices,
            faces,
            size,
            subdivisions,
        })
    }

    /// Validates grid parameters without allocating.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NoSubdivisions`] if `subdivisions == 0`,
    /// [`MeshError::TooManySubdivisions`] above [`MAX_SUBDIVISIONS`], and
    /// [`MeshError::InvalidSize`] if `size` is not a positive finite number.
    pub fn check(size: f64, subdivisions: u32) -> Result<(), MeshError> {
        if subdivisions == 0 {
            return Err(MeshError::NoSubdivisions);
        }
        if subdivisions > MAX_SUBDIVISIONS {
            return Err(MeshError::TooManySubdivisions {
                requested: subdivisions,
                max: MAX_SUBDIVISIONS,
            });
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(MeshError::InvalidSize(size));
        }
        Ok(())
    }

    /// World-space extent along each axis.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Cells per axis.
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of quad faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Projects every vertex onto the XY plane, in vertex order.
    pub fn positions_xy(&self) -> Vec<DVec2> {
        self.vertices.iter().map(|v| v.truncate()).collect()
    }

    /// Overwrites the `z` coordinate of one vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexOutOfRange`] if `index` is not a vertex of this mesh.
    pub fn set_height(&mut self, index: usize, z: f64) -> Result<(), MeshError> {
        let len = self.vertices.len();
        let vertex = self
            .vertices
            .get_mut(index)
            .ok_or(MeshError::VertexOutOfRange { index, len })?;
        vertex.z = z;
        Ok(())
    }

    /// Axis-aligned XY bounds as `(min, max)`.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        self.vertices.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), v| (min.min(v.truncate()), max.max(v.truncate())),
        )
    }
}
