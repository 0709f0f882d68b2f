//! The [`SceneBackend`] trait and its handle and error types.

use glam::DVec3;
use landscape_materials::{MaterialDef, MaterialError, MaterialId};
use landscape_mesh::Quad;
use thiserror::Error;

use crate::primitive::{Primitive, PrimitiveKind, SunLight, Transform};

/// Handle to a mesh object created through [`SceneBackend::create_mesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Handle to any other scene object (primitive, camera, light).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

/// Failures reported by a scene backend. The generator propagates these
/// unchanged and never retries.
#[derive(Debug, Error, PartialEq)]
pub enum BackendError {
    /// The backend refused to perform an operation.
    #[error("backend refused {operation}: {reason}")]
    Rejected {
        /// Name of the refused operation.
        operation: &'static str,
        /// Backend-supplied explanation.
        reason: String,
    },

    /// A material definition failed validation.
    #[error("invalid material: {0}")]
    InvalidMaterial(#[from] MaterialError),

    /// A primitive had a non-positive or non-finite size parameter.
    #[error("invalid {0:?} parameters")]
    InvalidPrimitive(PrimitiveKind),

    /// A face referenced a vertex that does not exist.
    #[error("mesh `{name}` face {face} references missing vertex {vertex}")]
    InvalidFace {
        /// Mesh name.
        name: String,
        /// Face index.
        face: usize,
        /// Referenced vertex index.
        vertex: u32,
    },

    /// The mesh handle is not known to this backend.
    #[error("unknown mesh handle {0:?}")]
    UnknownMesh(MeshHandle),

    /// The object handle is not known to this backend.
    #[error("unknown object handle {0:?}")]
    UnknownObject(ObjectHandle),

    /// The material id is not known to this backend.
    #[error("unknown material {0:?}")]
    UnknownMaterial(MaterialId),

    /// A vertex index was out of range for the mesh.
    #[error("vertex {index} out of range for mesh {mesh:?}")]
    VertexOutOfRange {
        /// Target mesh.
        mesh: MeshHandle,
        /// Offending vertex index.
        index: usize,
    },

    /// A face index was out of range for the mesh.
    #[error("face {index} out of range for mesh {mesh:?}")]
    FaceOutOfRange {
        /// Target mesh.
        mesh: MeshHandle,
        /// Offending face index.
        index: usize,
    },
}

/// Operations a 3D host must provide for landscape generation.
///
/// Each call is expected to be idempotent per invocation: it either fully
/// succeeds and returns a handle, or fails without side effects.
pub trait SceneBackend {
    /// Creates a polygon mesh object from vertex positions and quad faces.
    fn create_mesh(
        &mut self,
        name: &str,
        vertices: &[DVec3],
        faces: &[Quad],
    ) -> Result<MeshHandle, BackendError>;

    /// Sets the `z` coordinate of one vertex of a mesh.
    fn set_vertex_z(&mut self, mesh: MeshHandle, vertex: usize, z: f64)
    -> Result<(), BackendError>;

    /// Registers a material and returns its id.
    fn register_material(&mut self, material: &MaterialDef) -> Result<MaterialId, BackendError>;

    /// Assigns a registered material to one face of a mesh.
    fn set_face_material(
        &mut self,
        mesh: MeshHandle,
        face: usize,
        material: MaterialId,
    ) -> Result<(), BackendError>;

    /// Instantiates a primitive shape at `transform`.
    fn instantiate_primitive(
        &mut self,
        primitive: &Primitive,
        transform: Transform,
    ) -> Result<ObjectHandle, BackendError>;

    /// Appends a material slot to an object.
    fn assign_material(
        &mut self,
        object: ObjectHandle,
        material: MaterialId,
    ) -> Result<(), BackendError>;

    /// Adds a camera and makes it the active scene camera.
    fn add_camera(&mut self, transform: Transform) -> Result<ObjectHandle, BackendError>;

    /// Adds a sun light.
    fn add_light(
        &mut self,
        light: &SunLight,
        transform: Transform,
    ) -> Result<ObjectHandle, BackendError>;
}
