//! In-memory [`SceneBackend`] that keeps every mesh, material, and object it
//! is asked to create.

use glam::DVec3;
use hashbrown::HashSet;
use landscape_materials::{MaterialDef, MaterialId};
use landscape_mesh::Quad;

use crate::backend::{BackendError, MeshHandle, ObjectHandle, SceneBackend};
use crate::primitive::{Primitive, PrimitiveKind, SunLight, Transform};

/// A mesh as stored by the [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedMesh {
    /// Object name.
    pub name: String,
    /// Vertex positions, including any height edits.
    pub vertices: Vec<DVec3>,
    /// Quad connectivity.
    pub faces: Vec<Quad>,
    /// Material per face; `None` until assigned.
    pub face_materials: Vec<Option<MaterialId>>,
}

/// What a [`SceneObject`] is.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneObjectKind {
    /// A parametric primitive.
    Primitive(Primitive),
    /// A camera.
    Camera,
    /// A sun light.
    Light(SunLight),
}

/// A non-mesh object as stored by the [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Object kind and parameters.
    pub kind: SceneObjectKind,
    /// World placement.
    pub transform: Transform,
    /// Material slots, in assignment order.
    pub materials: Vec<MaterialId>,
}

/// A [`SceneBackend`] that records calls in memory.
///
/// Used by the `landscape` binary to produce a summary, and by tests to
/// inspect exactly what the generator asked for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingBackend {
    meshes: Vec<RecordedMesh>,
    materials: Vec<MaterialDef>,
    objects: Vec<SceneObject>,
    active_camera: Option<ObjectHandle>,
    refused: Vec<PrimitiveKind>,
}

impl RecordingBackend {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later request to instantiate `kind` fail with
    /// [`BackendError::Rejected`].
    pub fn refuse(mut self, kind: PrimitiveKind) -> Self {
        self.refused.push(kind);
        self
    }

    /// All meshes, in creation order.
    pub fn meshes(&self) -> &[RecordedMesh] {
        &self.meshes
    }

    /// Looks up a mesh by handle.
    pub fn mesh(&self, handle: MeshHandle) -> Option<&RecordedMesh> {
        self.meshes.get(handle.0 as usize)
    }

    /// All registered materials; index `i` has id `MaterialId(i)`.
    pub fn materials(&self) -> &[MaterialDef] {
        &self.materials
    }

    /// Looks up a material by id.
    pub fn material(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id.0 as usize)
    }

    /// All non-mesh objects, in creation order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Looks up an object by handle.
    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0 as usize)
    }

    /// The camera most recently added.
    pub fn active_camera(&self) -> Option<ObjectHandle> {
        self.active_camera
    }

    /// Number of primitives of the given kind.
    pub fn primitive_count(&self, kind: PrimitiveKind) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(&o.kind, SceneObjectKind::Primitive(p) if p.kind() == kind))
            .count()
    }

    /// Number of distinct materials referenced by any object.
    pub fn distinct_object_materials(&self) -> usize {
        self.objects
            .iter()
            .flat_map(|o| o.materials.iter().copied())
            .collect::<HashSet<_>>()
            .len()
    }

    fn push_object(&mut self, kind: SceneObjectKind, transform: Transform) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len() as u32);
        self.objects.push(SceneObject {
            kind,
            transform,
            materials: Vec::new(),
        });
        handle
    }

    fn mesh_mut(&mut self, handle: MeshHandle) -> Result<&mut RecordedMesh, BackendError> {
        self.meshes
            .get_mut(handle.0 as usize)
            .ok_or(BackendError::UnknownMesh(handle))
    }
}

impl SceneBackend for RecordingBackend {
    fn create_mesh(
        &mut self,
        name: &str,
        vertices: &[DVec3],
        faces: &[Quad],
    ) -> Result<MeshHandle, BackendError> {
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&vertex) = face.iter().find(|&&v| v as usize >= vertices.len()) {
                return Err(BackendError::InvalidFace {
                    name: name.to_string(),
                    face: face_index,
                    vertex,
                });
            }
        }

        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(RecordedMesh {
            name: name.to_string(),
            vertices: vertices.to_vec(),
            faces: faces.to_vec(),
            face_materials: vec![None; faces.len()],
        });
        tracing::trace!(?handle, name, vertices = vertices.len(), "mesh created");
        Ok(handle)
    }

    fn set_vertex_z(
        &mut self,
        mesh: MeshHandle,
        vertex: usize,
        z: f64,
    ) -> Result<(), BackendError> {
        let target = self.mesh_mut(mesh)?;
        let position = target
            .vertices
            .get_mut(vertex)
            .ok_or(BackendError::VertexOutOfRange {
                mesh,
                index: vertex,
            })?;
        position.z = z;
        Ok(())
    }

    fn register_material(&mut self, material: &MaterialDef) -> Result<MaterialId, BackendError> {
        let material = material.clone().validated()?;
        let id = MaterialId(self.materials.len() as u32);
        tracing::trace!(?id, name = %material.name, "material registered");
        self.materials.push(material);
        Ok(id)
    }

    fn set_face_material(
        &mut self,
        mesh: MeshHandle,
        face: usize,
        material: MaterialId,
    ) -> Result<(), BackendError> {
        if self.material(material).is_none() {
            return Err(BackendError::UnknownMaterial(material));
        }
        let target = self.mesh_mut(mesh)?;
        let slot = target
            .face_materials
            .get_mut(face)
            .ok_or(BackendError::FaceOutOfRange { mesh, index: face })?;
        *slot = Some(material);
        Ok(())
    }

    fn instantiate_primitive(
        &mut self,
        primitive: &Primitive,
        transform: Transform,
    ) -> Result<ObjectHandle, BackendError> {
        let kind = primitive.kind();
        if self.refused.contains(&kind) {
            return Err(BackendError::Rejected {
                operation: "instantiate_primitive",
                reason: format!("{kind:?} primitives are disabled"),
            });
        }
        if !primitive.is_valid() {
            return Err(BackendError::InvalidPrimitive(kind));
        }
        Ok(self.push_object(SceneObjectKind::Primitive(*primitive), transform))
    }

    fn assign_material(
        &mut self,
        object: ObjectHandle,
        material: MaterialId,
    ) -> Result<(), BackendError> {
        if self.material(material).is_none() {
            return Err(BackendError::UnknownMaterial(material));
        }
        let target = self
            .objects
            .get_mut(object.0 as usize)
            .ok_or(BackendError::UnknownObject(object))?;
        target.materials.push(material);
        Ok(())
    }

    fn add_camera(&mut self, transform: Transform) -> Result<ObjectHandle, BackendError> {
        let handle = self.push_object(SceneObjectKind::Camera, transform);
        self.active_camera = Some(handle);
        Ok(handle)
    }

    fn add_light(
        &mut self,
        light: &SunLight,
        transform: Transform,
    ) -> Result<ObjectHandle, BackendError> {
        Ok(self.push_object(SceneObjectKind::Light(*light), transform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> (Vec<DVec3>, Vec<Quad>) {
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        (vertices, vec![[0, 1, 2, 3]])
    }

    #[test]
    fn test_handles_are_sequential() {
        let mut backend = RecordingBackend::new();
        let a = backend
            .instantiate_primitive(&Primitive::Plane { size: 1.0 }, Transform::IDENTITY)
            .unwrap();
        let b = backend.add_camera(Transform::IDENTITY).unwrap();
        assert_eq!(a, ObjectHandle(0));
        assert_eq!(b, ObjectHandle(1));
        assert_eq!(backend.active_camera(), Some(b));
    }

    #[test]
    fn test_mesh_vertex_and_face_edits() {
        let mut backend = RecordingBackend::new();
        let (vertices, faces) = unit_quad();
        let mesh = backend.create_mesh("terrain", &vertices, &faces).unwrap();
        let mat = backend
            .register_material(&MaterialDef::opaque("grass", [0.2, 0.6, 0.2, 1.0]))
            .unwrap();

        backend.set_vertex_z(mesh, 2, 0.75).unwrap();
        backend.set_face_material(mesh, 0, mat).unwrap();

        let recorded = backend.mesh(mesh).unwrap();
        assert_eq!(recorded.vertices[2].z, 0.75);
        assert_eq!(recorded.face_materials, vec![Some(mat)]);
    }

    #[test]
    fn test_face_with_missing_vertex_rejected() {
        let mut backend = RecordingBackend::new();
        let (vertices, _) = unit_quad();
        let err = backend
            .create_mesh("broken", &vertices, &[[0, 1, 2, 7]])
            .unwrap_err();
        assert_eq!(
            err,
            BackendError::InvalidFace {
                name: "broken".into(),
                face: 0,
                vertex: 7
            }
        );
    }

    #[test]
    fn test_out_of_range_edits_rejected() {
        let mut backend = RecordingBackend::new();
        let (vertices, faces) = unit_quad();
        let mesh = backend.create_mesh("terrain", &vertices, &faces).unwrap();
        assert!(matches!(
            backend.set_vertex_z(mesh, 4, 1.0),
            Err(BackendError::VertexOutOfRange { index: 4, .. })
        ));
        assert_eq!(
            backend.set_face_material(mesh, 0, MaterialId(3)),
            Err(BackendError::UnknownMaterial(MaterialId(3)))
        );
        assert_eq!(
            backend.set_vertex_z(MeshHandle(5), 0, 1.0),
            Err(BackendError::UnknownMesh(MeshHandle(5)))
        );
    }

    #[test]
    fn test_invalid_material_rejected() {
        let mut backend = RecordingBackend::new();
        let result = backend.register_material(&MaterialDef::opaque("", [0.0; 4]));
        assert!(matches!(result, Err(BackendError::InvalidMaterial(_))));
        assert!(backend.materials().is_empty());
    }

    #[test]
    fn test_refused_kind_fails_without_side_effects() {
        let mut backend = RecordingBackend::new().refuse(PrimitiveKind::Cone);
        let result = backend.instantiate_primitive(
            &Primitive::Cone {
                radius: 0.25,
                depth: 0.5,
            },
            Transform::IDENTITY,
        );
        assert!(matches!(result, Err(BackendError::Rejected { .. })));
        assert!(backend.objects().is_empty());
    }

    #[test]
    fn test_primitive_count_by_kind() {
        let mut backend = RecordingBackend::new();
        let cone = Primitive::Cone {
            radius: 0.2,
            depth: 0.5,
        };
        for _ in 0..3 {
            backend
                .instantiate_primitive(&cone, Transform::IDENTITY)
                .unwrap();
        }
        backend
            .add_light(&SunLight::default(), Transform::IDENTITY)
            .unwrap();
        assert_eq!(backend.primitive_count(PrimitiveKind::Cone), 3);
        assert_eq!(backend.primitive_count(PrimitiveKind::Cylinder), 0);
        assert_eq!(backend.objects().len(), 4);
    }

    #[test]
    fn test_assign_material_to_object() {
        let mut backend = RecordingBackend::new();
        let rock = backend
            .register_material(&MaterialDef::opaque("rock", [0.4, 0.4, 0.4, 1.0]))
            .unwrap();
        let obj = backend
            .instantiate_primitive(
                &Primitive::IcoSphere {
                    subdivisions: 2,
                    radius: 0.15,
                },
                Transform::from_translation(DVec3::new(1.0, 2.0, 3.0)),
            )
            .unwrap();
        backend.assign_material(obj, rock).unwrap();
        assert_eq!(backend.object(obj).unwrap().materials, vec![rock]);
        assert_eq!(backend.distinct_object_materials(), 1);
        assert_eq!(
            backend.assign_material(ObjectHandle(9), rock),
            Err(BackendError::UnknownObject(ObjectHandle(9)))
        );
    }
}
