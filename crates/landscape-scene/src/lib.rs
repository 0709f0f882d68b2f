//! Scene backend seam: the operations the landscape generator needs from a 3D
//! authoring host, plus an in-memory backend that records every call.
//!
//! Every creation call returns an explicit handle. Nothing in the generator
//! depends on a host's notion of a "currently selected" object.

mod backend;
mod primitive;
mod recording;

pub use backend::{BackendError, MeshHandle, ObjectHandle, SceneBackend};
pub use primitive::{Primitive, PrimitiveKind, SunLight, Transform};
pub use recording::{RecordedMesh, RecordingBackend, SceneObject, SceneObjectKind};
