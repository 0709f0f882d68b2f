//! Fixed colours for biome surfaces, props, and the water plane.

use crate::MaterialDef;

/// Open grassland.
pub fn grassland() -> MaterialDef {
    MaterialDef::opaque("grassland", [0.2, 0.6, 0.2, 1.0])
}

/// Bare mountain rock and soil.
pub fn mountain() -> MaterialDef {
    MaterialDef::opaque("mountain", [0.5, 0.3, 0.1, 1.0])
}

/// Lake bed, semi-transparent.
pub fn lake() -> MaterialDef {
    MaterialDef::blended("lake", [0.1, 0.3, 0.6, 0.6])
}

/// Forest floor.
pub fn forest() -> MaterialDef {
    MaterialDef::opaque("forest", [0.1, 0.4, 0.1, 1.0])
}

/// Tree trunk bark.
pub fn trunk() -> MaterialDef {
    MaterialDef::opaque("trunk", [0.3, 0.2, 0.1, 1.0])
}

/// Foliage for cone layer `layer` of a tree; higher layers are brighter green.
pub fn leaves(layer: u32) -> MaterialDef {
    let green = 0.4 + 0.1 * layer as f32;
    MaterialDef::opaque(format!("leaves_{layer}"), [0.05, green, 0.05, 1.0])
}

/// Grey boulder.
pub fn rock() -> MaterialDef {
    MaterialDef::opaque("rock", [0.4, 0.4, 0.4, 1.0])
}

/// Open water surface.
pub fn water() -> MaterialDef {
    MaterialDef::blended("water", [0.05, 0.25, 0.7, 0.5])
}
