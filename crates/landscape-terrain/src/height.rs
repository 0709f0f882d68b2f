//! Height synthesis: per-vertex elevation from region label, a trigonometric
//! pseudo-noise term, and a biome-specific random jitter.
//!
//! The noise is deliberately `sin(x·s)·cos(y·s)`, not gradient noise. It is
//! computed through `libm` so results are bit-identical across platforms.

use landscape_mesh::GridMesh;
use rand::Rng;

use crate::biome::{BiomeTable, RegionLabel};
use crate::error::{ConfigurationError, TerrainError};

/// Scale applied to the raw trigonometric noise before biome gains.
pub const NOISE_AMPLITUDE: f64 = 0.3;

/// `sin(x·scale)·cos(y·scale)`, bounded in `[-1, 1]`.
#[inline]
pub fn trig_noise(x: f64, y: f64, scale: f64) -> f64 {
    libm::sin(x * scale) * libm::cos(y * scale)
}

/// Computes terrain elevation from region labels using a [`BiomeTable`].
pub struct HeightSynthesizer<'a> {
    table: &'a BiomeTable,
    noise_scale: f64,
}

impl<'a> HeightSynthesizer<'a> {
    /// Creates a synthesizer with the given noise frequency (0.3 by default).
    pub fn new(table: &'a BiomeTable, noise_scale: f64) -> Self {
        Self { table, noise_scale }
    }

    /// The shared noise term at `(x, y)`, bounded by [`NOISE_AMPLITUDE`].
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        trig_noise(x, y, self.noise_scale) * NOISE_AMPLITUDE
    }

    /// Elevation of a single vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::UnmappedLabel`] if the table has no entry for `label`.
    pub fn elevation<R: Rng>(
        &self,
        label: RegionLabel,
        x: f64,
        y: f64,
        rng: &mut R,
    ) -> Result<f64, TerrainError> {
        let def = self
            .table
            .get(label)
            .ok_or(TerrainError::UnmappedLabel(label))?;
        Ok(def.height.evaluate(self.noise(x, y), rng))
    }

    /// Writes an elevation into the `z` of every vertex and returns the heights.
    ///
    /// Only `z` is touched; `x` and `y` are read as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::LabelCountMismatch`] if `labels` does not
    /// have one entry per vertex, or [`TerrainError::UnmappedLabel`].
    pub fn apply<R: Rng>(
        &self,
        mesh: &mut GridMesh,
        labels: &[RegionLabel],
        rng: &mut R,
    ) -> Result<Vec<f64>, TerrainError> {
        if labels.len() != mesh.vertex_count() {
            return Err(ConfigurationError::LabelCountMismatch {
                labels: labels.len(),
                vertices: mesh.vertex_count(),
            }
            .into());
        }

        let mut heights = Vec::with_capacity(labels.len());
        for (vertex, &label) in mesh.vertices.iter_mut().zip(labels) {
            let z = self.elevation(label, vertex.x, vertex.y, rng)?;
            vertex.z = z;
            heights.push(z);
        }

        let (min, max) = heights
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        tracing::debug!(vertices = heights.len(), min, max, "heights applied");

        Ok(heights)
    }
}
