use glam::Vec3;

use crate::resource::ResourceKindId;

/// World position of a resource instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

/// Marks an entity as a collectible of the given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub kind: ResourceKindId,
}
