//! Biome system: the static table that gives each region label a meaning.
//!
//! Cluster labels carry no semantics of their own. Label `i` simply takes the
//! `i`-th entry of the [`BiomeTable`], so which part of the map becomes the
//! mountain changes from run to run.

mod def;
mod table;

pub use def::{Biome, BiomeDef, HeightProfile};
pub use table::{BiomeTable, BiomeTableError, RegionLabel};
