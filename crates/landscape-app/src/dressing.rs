//! Scene dressing: biome materials, water plane, camera, and sun.

use glam::DVec3;
use landscape_materials::{MaterialId, palette};
use landscape_scene::{BackendError, ObjectHandle, Primitive, SceneBackend, SunLight, Transform};
use landscape_terrain::{Biome, BiomeTable, RegionLabel};

/// Height of the water surface above the mean lake elevation.
pub const WATER_OFFSET: f64 = 0.05;

/// Water plane side length relative to the terrain size.
pub const WATER_SCALE: f64 = 0.9;

/// Lake base elevation used when the table has no lake biome.
const FALLBACK_LAKE_BASE: f64 = -0.2;

/// Objects added around the terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct Dressing {
    /// The water plane.
    pub water: ObjectHandle,
    /// Elevation of the water plane.
    pub water_level: f64,
    /// The scene camera.
    pub camera: ObjectHandle,
    /// The sun.
    pub sun: ObjectHandle,
}

/// Registers one material per biome, in table order.
///
/// The returned ids are indexed by [`RegionLabel::index`].
pub fn register_biome_materials<B: SceneBackend>(
    backend: &mut B,
    table: &BiomeTable,
) -> Result<Vec<MaterialId>, BackendError> {
    table
        .iter()
        .map(|(_, def)| backend.register_material(&def.material))
        .collect()
}

/// Mean elevation of lake vertices plus [`WATER_OFFSET`].
///
/// Without lake vertices the water sits [`WATER_OFFSET`] above the lake
/// profile's base elevation.
pub fn water_level(heights: &[f64], labels: &[RegionLabel], table: &BiomeTable) -> f64 {
    let lake = table.label_of(Biome::Lake);
    let (sum, count) = heights
        .iter()
        .zip(labels)
        .filter(|(_, label)| Some(**label) == lake)
        .fold((0.0, 0usize), |(sum, count), (h, _)| (sum + h, count + 1));

    if count > 0 {
        sum / count as f64 + WATER_OFFSET
    } else {
        let base = lake
            .and_then(|label| table.get(label))
            .map_or(FALLBACK_LAKE_BASE, |def| def.height.base);
        base + WATER_OFFSET
    }
}

/// Camera looking down at the terrain from the `(+x, -y)` corner.
pub fn camera_transform(size: f64) -> Transform {
    Transform::from_translation_euler_deg(
        DVec3::new(size, -size, 0.8 * size),
        DVec3::new(60.0, 0.0, 45.0),
    )
}

/// Sun position above the same corner as the camera.
pub fn sun_transform(size: f64) -> Transform {
    Transform::from_translation(DVec3::new(size, -size, size))
}

/// White sun light of energy 4.
pub fn sun_light() -> SunLight {
    SunLight {
        color: [1.0, 1.0, 1.0],
        energy: 4.0,
    }
}

/// Adds the water plane, camera, and sun for a terrain of side `size`.
pub fn dress_scene<B: SceneBackend>(
    backend: &mut B,
    size: f64,
    water_level: f64,
) -> Result<Dressing, BackendError> {
    let water_material = backend.register_material(&palette::water())?;
    let water = backend.instantiate_primitive(
        &Primitive::Plane {
            size: WATER_SCALE * size,
        },
        Transform::from_translation(DVec3::new(0.0, 0.0, water_level)),
    )?;
    backend.assign_material(water, water_material)?;

    let camera = backend.add_camera(camera_transform(size))?;
    let sun = backend.add_light(&sun_light(), sun_transform(size))?;

    tracing::debug!(water_level, "scene dressed");
    Ok(Dressing {
        water,
        water_level,
        camera,
        sun,
    })
}
