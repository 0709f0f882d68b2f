//! Material system: flat-colour material definitions, identifiers, and the fixed landscape palette.

mod material;
pub mod palette;

pub use material::{MaterialDef, MaterialError, MaterialId};
