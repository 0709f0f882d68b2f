//! Mesh data structures: the evenly subdivided planar grid the landscape is built on.

pub mod grid;

pub use grid::{GridMesh, MAX_SUBDIVISIONS, MeshError, Quad};
