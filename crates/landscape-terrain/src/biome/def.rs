//! Biome definition: describes the properties of a single biome type.

use landscape_materials::{MaterialDef, palette};
use rand::Rng;

/// Semantic terrain category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Gently rolling open ground.
    Grassland,
    /// High, rough terrain.
    Mountain,
    /// Flat, slightly sunken water basin.
    Lake,
    /// Mid-height, slightly irregular wooded ground.
    Forest,
}

impl Biome {
    /// Whether trees may be scattered on this biome.
    pub fn hosts_trees(self) -> bool {
        matches!(self, Biome::Grassland | Biome::Forest)
    }

    /// Whether rocks may be scattered on this biome.
    pub fn hosts_rocks(self) -> bool {
        matches!(self, Biome::Mountain)
    }
}

/// Elevation rule for a biome: `base + noise * noise_gain + U(-jitter, jitter)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightProfile {
    /// Elevation before noise and jitter.
    pub base: f64,
    /// Multiplier applied to the shared noise term.
    pub noise_gain: f64,
    /// Half-width of the per-vertex uniform jitter. Zero disables the draw.
    pub jitter: f64,
}

impl HeightProfile {
    /// Evaluates the profile for one vertex.
    ///
    /// Draws from `rng` only when `jitter > 0`.
    pub fn evaluate<R: Rng>(&self, noise: f64, rng: &mut R) -> f64 {
        let jitter = if self.jitter > 0.0 {
            rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        self.base + noise * self.noise_gain + jitter
    }

    /// Smallest elevation this profile can produce for a noise term in `[-amplitude, amplitude]`.
    pub fn min_elevation(&self, amplitude: f64) -> f64 {
        self.base - amplitude * self.noise_gain.abs() - self.jitter
    }

    /// Largest elevation this profile can produce for a noise term in `[-amplitude, amplitude]`.
    pub fn max_elevation(&self, amplitude: f64) -> f64 {
        self.base + amplitude * self.noise_gain.abs() + self.jitter
    }
}

/// Full descriptor for a biome type.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeDef {
    /// Human-readable biome name (e.g., "grassland").
    pub name: String,
    /// Semantic category, used by prop placement rules.
    pub biome: Biome,
    /// Surface material for faces of this biome.
    pub material: MaterialDef,
    /// Elevation rule.
    pub height: HeightProfile,
}

impl BiomeDef {
    /// Smooth, slightly undulating meadow at 0.2.
    pub fn grassland() -> Self {
        Self {
            name: "grassland".into(),
            biome: Biome::Grassland,
            material: palette::grassland(),
            height: HeightProfile {
                base: 0.2,
                noise_gain: 1.0,
                jitter: 0.0,
            },
        }
    }

    /// Tall, peaky terrain at 2.0 with doubled noise.
    pub fn mountain() -> Self {
        Self {
            name: "mountain".into(),
            biome: Biome::Mountain,
            material: palette::mountain(),
            height: HeightProfile {
                base: 2.0,
                noise_gain: 2.0,
                jitter: 0.3,
            },
        }
    }

    /// Nearly flat basin at -0.2.
    pub fn lake() -> Self {
        Self {
            name: "lake".into(),
            biome: Biome::Lake,
            material: palette::lake(),
            height: HeightProfile {
                base: -0.2,
                noise_gain: 0.05,
                jitter: 0.0,
            },
        }
    }

    /// Mid-height woodland at 0.7.
    pub fn forest() -> Self {
        Self {
            name: "forest".into(),
            biome: Biome::Forest,
            material: palette::forest(),
            height: HeightProfile {
                base: 0.7,
                noise_gain: 1.0,
                jitter: 0.1,
            },
        }
    }
}
