//! Core material types: [`MaterialId`] and [`MaterialDef`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// MaterialId
// ---------------------------------------------------------------------------

/// Identifier handed out by a scene backend when a material is registered.
///
/// Ids are backend-assigned; the core never invents them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

// ---------------------------------------------------------------------------
// MaterialError
// ---------------------------------------------------------------------------

/// Errors returned during material validation.
#[derive(Debug, Error, PartialEq)]
pub enum MaterialError {
    /// The material name must not be empty.
    #[error("material name must not be empty")]
    EmptyName,

    /// A colour component was NaN or infinite.
    #[error("material `{name}` has a non-finite colour component")]
    NonFiniteColor {
        /// Name of the rejected material.
        name: String,
    },
}

// ---------------------------------------------------------------------------
// MaterialDef
// ---------------------------------------------------------------------------

/// A flat-colour surface material.
///
/// All fields are validated and clamped via [`MaterialDef::validated`].
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDef {
    /// Human-readable name (e.g., "grassland", "trunk").
    pub name: String,

    /// Diffuse colour in linear RGBA. Each component is clamped to `[0.0, 1.0]`.
    pub albedo: [f32; 4],

    /// Whether the surface is alpha-blended rather than opaque.
    /// Transparent materials cast no shadows.
    pub transparent: bool,
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            albedo: [0.8, 0.8, 0.8, 1.0],
            transparent: false,
        }
    }
}

impl MaterialDef {
    /// Creates an opaque material.
    pub fn opaque(name: impl Into<String>, albedo: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            albedo,
            transparent: false,
        }
    }

    /// Creates an alpha-blended material.
    pub fn blended(name: impl Into<String>, albedo: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            albedo,
            transparent: true,
        }
    }

    /// Validates the name and clamps the colour to its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::EmptyName`] if the name is empty and
    /// [`MaterialError::NonFiniteColor`] if any colour component is NaN or infinite.
    pub fn validated(mut self) -> Result<Self, MaterialError> {
        if self.name.is_empty() {
            return Err(MaterialError::EmptyName);
        }
        if self.albedo.iter().any(|c| !c.is_finite()) {
            return Err(MaterialError::NonFiniteColor { name: self.name });
        }

        for c in &mut self.albedo {
            *c = c.clamp(0.0, 1.0);
        }

        Ok(self)
    }

    /// Alpha component of the diffuse colour.
    pub fn alpha(&self) -> f32 {
        self.albedo[3]
    }
}
