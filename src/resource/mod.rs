pub mod field;

pub use field::ResourceField;

use std::fmt;

/// Stable identity of a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKindId(pub &'static str);

impl fmt::Display for ResourceKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A collectible kind. Immutable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceKind {
    pub id: ResourceKindId,
    pub name: &'static str,
    /// Offset from the terrain surface to the instance center.
    pub half_height: f32,
}

impl ResourceKind {
    pub const fn new(id: &'static str, name: &'static str, half_height: f32) -> Self {
        Self {
            id: ResourceKindId(id),
            name,
            half_height,
        }
    }
}

pub const PASTEL_FLOWER: ResourceKindId = ResourceKindId("pastelFlower");
pub const GLIMMERING_CRYSTAL: ResourceKindId = ResourceKindId("glimmeringCrystal");
pub const SOFT_WOOD: ResourceKindId = ResourceKindId("softWood");

/// The island's stock kinds. Half-heights are half the model heights
/// (0.6 sphere, 0.4 box, 0.5 cylinder).
pub const DEFAULT_KINDS: [ResourceKind; 3] = [
    ResourceKind::new(PASTEL_FLOWER.0, "Pastel Flower", 0.3),
    ResourceKind::new(GLIMMERING_CRYSTAL.0, "Glimmering Crystal", 0.2),
    ResourceKind::new(SOFT_WOOD.0, "Soft Wood", 0.25),
];

/// Read-only list of the kinds in play.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    kinds: Vec<ResourceKind>,
}

impl ResourceCatalog {
    pub fn new(kinds: Vec<ResourceKind>) -> Self {
        Self { kinds }
    }

    pub fn get(&self, id: ResourceKindId) -> Option<&ResourceKind> {
        self.kinds.iter().find(|k| k.id == id)
    }

    /// Display name, or `None` for ids the catalog never listed.
    pub fn name_of(&self, id: ResourceKindId) -> Option<&'static str> {
        self.get(id).map(|k| k.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceKind> {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_half_heights() {
        let catalog = ResourceCatalog::new(DEFAULT_KINDS.to_vec());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(PASTEL_FLOWER).map(|k| k.half_height), Some(0.3));
        assert_eq!(
            catalog.get(GLIMMERING_CRYSTAL).map(|k| k.half_height),
            Some(0.2)
        );
        assert_eq!(catalog.get(SOFT_WOOD).map(|k| k.half_height), Some(0.25));
    }

    #[test]
    fn unknown_id_has_no_name() {
        let catalog = ResourceCatalog::new(DEFAULT_KINDS.to_vec());
        assert_eq!(catalog.name_of(SOFT_WOOD), Some("Soft Wood"));
        assert_eq!(catalog.name_of(ResourceKindId("driftGlass")), None);
    }
}
