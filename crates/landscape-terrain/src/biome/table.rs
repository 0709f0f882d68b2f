//! Biome table: maps [`RegionLabel`] to [`BiomeDef`] with name-based lookup.

use std::fmt;

use hashbrown::HashMap;

use super::{Biome, BiomeDef};

/// Region identifier produced by clustering, in `[0, n_clusters)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionLabel(pub u16);

impl RegionLabel {
    /// The label as a slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BiomeTableError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
}

/// Ordered biome definitions; entry `i` gives region label `i` its meaning.
///
/// The table is sized independently of the cluster count. Entries past
/// `n_clusters` are simply never selected.
#[derive(Clone, Debug)]
pub struct BiomeTable {
    biomes: Vec<BiomeDef>,
    name_to_label: HashMap<String, RegionLabel>,
}

impl BiomeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            biomes: Vec::new(),
            name_to_label: HashMap::new(),
        }
    }

    /// The landscape table: grassland 0, mountain 1, lake 2, forest 3.
    ///
    /// With the default three clusters, forest is defined but unreachable.
    pub fn standard() -> Self {
        let biomes = vec![
            BiomeDef::grassland(),
            BiomeDef::mountain(),
            BiomeDef::lake(),
            BiomeDef::forest(),
        ];
        let name_to_label = biomes
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), RegionLabel(i as u16)))
            .collect();
        Self {
            biomes,
            name_to_label,
        }
    }

    /// Appends a biome definition, returning the label it answers to.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeTableError::DuplicateName`] if a biome with the same name exists.
    pub fn register(&mut self, def: BiomeDef) -> Result<RegionLabel, BiomeTableError> {
        if self.name_to_label.contains_key(&def.name) {
            return Err(BiomeTableError::DuplicateName(def.name.clone()));
        }
        let label = RegionLabel(self.biomes.len() as u16);
        self.name_to_label.insert(def.name.clone(), label);
        self.biomes.push(def);
        Ok(label)
    }

    /// Returns the definition for a label, if the table is large enough.
    pub fn get(&self, label: RegionLabel) -> Option<&BiomeDef> {
        self.biomes.get(label.index())
    }

    /// Looks up a label by biome name.
    pub fn lookup_by_name(&self, name: &str) -> Option<RegionLabel> {
        self.name_to_label.get(name).copied()
    }

    /// First label whose biome is `biome`.
    pub fn label_of(&self, biome: Biome) -> Option<RegionLabel> {
        self.biomes
            .iter()
            .position(|d| d.biome == biome)
            .map(|i| RegionLabel(i as u16))
    }

    /// Iterates `(label, def)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionLabel, &BiomeDef)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, d)| (RegionLabel(i as u16), d))
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_order() {
        let table = BiomeTable::standard();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(RegionLabel(0)).unwrap().biome, Biome::Grassland);
        assert_eq!(table.get(RegionLabel(1)).unwrap().biome, Biome::Mountain);
        assert_eq!(table.get(RegionLabel(2)).unwrap().biome, Biome::Lake);
        assert_eq!(table.get(RegionLabel(3)).unwrap().biome, Biome::Forest);
        assert!(table.get(RegionLabel(4)).is_none());
    }

    #[test]
    fn test_lookup_by_name_and_biome() {
        let table = BiomeTable::standard();
        assert_eq!(table.lookup_by_name("lake"), Some(RegionLabel(2)));
        assert_eq!(table.lookup_by_name("desert"), None);
        assert_eq!(table.label_of(Biome::Forest), Some(RegionLabel(3)));
    }

    #[test]
    fn test_standard_names_index_every_entry() {
        let mut table = BiomeTable::standard();
        for (i, name) in ["grassland", "mountain", "lake", "forest"].iter().enumerate() {
            assert_eq!(table.lookup_by_name(name), Some(RegionLabel(i as u16)));
        }
        assert_eq!(
            table.register(BiomeDef::forest()),
            Err(BiomeTableError::DuplicateName("forest".into()))
        );
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut table = BiomeTable::new();
        table.register(BiomeDef::lake()).unwrap();
        assert_eq!(
            table.register(BiomeDef::lake()),
            Err(BiomeTableError::DuplicateName("lake".into()))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_custom_table_can_be_smaller() {
        let mut table = BiomeTable::new();
        let only = table.register(BiomeDef::mountain()).unwrap();
        assert_eq!(only, RegionLabel(0));
        assert_eq!(table.label_of(Biome::Grassland), None);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(RegionLabel(3).to_string(), "3");
    }
}
