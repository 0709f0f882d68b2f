//! Landscape generation pipeline.
//!
//! Runs the terrain stages in order against a [`SceneBackend`], dresses the
//! scene with water, camera, and sun, and reports what was built. Every
//! failure is tagged with the [`Stage`] it happened in.
//!
//! [`SceneBackend`]: landscape_scene::SceneBackend

pub mod dressing;
mod error;
mod pipeline;

pub use dressing::{Dressing, dress_scene, register_biome_materials, water_level};
pub use error::{GenerationError, InStage, Stage};
pub use pipeline::{LandscapeParams, LandscapeReport, generate};
