//! Primitive shapes, transforms, and lights that can be instantiated in a scene.

use glam::{DQuat, DVec3, EulerRot};

/// The family a [`Primitive`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Capped cylinder.
    Cylinder,
    /// Cone with its apex pointing +Z.
    Cone,
    /// Subdivided icosahedron.
    IcoSphere,
    /// Flat square in the XY plane.
    Plane,
}

/// A parametric primitive shape, centred on its transform's translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Cylinder of the given radius and height along Z.
    Cylinder {
        /// Radius of both caps.
        radius: f64,
        /// Height along Z.
        depth: f64,
    },
    /// Cone with base radius `radius` and height `depth` along Z.
    Cone {
        /// Radius of the base.
        radius: f64,
        /// Height along Z.
        depth: f64,
    },
    /// Icosphere with `subdivisions` refinement passes.
    IcoSphere {
        /// Refinement level; 1 is a plain icosahedron.
        subdivisions: u32,
        /// Circumscribed radius.
        radius: f64,
    },
    /// Square plane with side length `size`.
    Plane {
        /// Side length.
        size: f64,
    },
}

impl Primitive {
    /// Returns the shape family.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Cylinder { .. } => PrimitiveKind::Cylinder,
            Primitive::Cone { .. } => PrimitiveKind::Cone,
            Primitive::IcoSphere { .. } => PrimitiveKind::IcoSphere,
            Primitive::Plane { .. } => PrimitiveKind::Plane,
        }
    }

    /// Returns `true` if every size parameter is finite and positive.
    pub fn is_valid(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        match *self {
            Primitive::Cylinder { radius, depth } | Primitive::Cone { radius, depth } => {
                positive(radius) && positive(depth)
            }
            Primitive::IcoSphere {
                subdivisions,
                radius,
            } => subdivisions > 0 && positive(radius),
            Primitive::Plane { size } => positive(size),
        }
    }
}

/// Placement of an object in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub translation: DVec3,
    /// Orientation as a unit quaternion.
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    /// A pure translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            rotation: DQuat::IDENTITY,
        }
    }

    /// A translation plus an XYZ Euler rotation given in degrees.
    pub fn from_translation_euler_deg(translation: DVec3, degrees: DVec3) -> Self {
        Self {
            translation,
            rotation: DQuat::from_euler(
                EulerRot::XYZ,
                degrees.x.to_radians(),
                degrees.y.to_radians(),
                degrees.z.to_radians(),
            ),
        }
    }
}

/// An infinitely distant sun light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunLight {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Irradiance multiplier.
    pub energy: f32,
}

impl Default for SunLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            energy: 1.0,
        }
    }
}
