use glam::{Vec2, Vec3};

use crate::ecs::components::{Collectible, Position};
use crate::present::Presenter;
use crate::resource::{ResourceCatalog, ResourceKindId};
use crate::spatial::SpatialGrid;
use crate::terrain::HeightSampler;

/// What was removed by a successful collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collected {
    pub entity: hecs::Entity,
    pub kind: ResourceKindId,
    pub position: Vec3,
}

/// The live resource instances and their spatial index.
///
/// Instances live in a `hecs::World` arena; a handle is live exactly while
/// the world contains it. The grid is only touched through this type, so
/// every spawn is mirrored by an insert and every collection removes the
/// grid entry before the entity is despawned.
pub struct ResourceField {
    world: hecs::World,
    grid: SpatialGrid,
}

impl ResourceField {
    pub fn new(grid_origin: Vec2, cell_size: f32) -> Self {
        Self {
            world: hecs::World::new(),
            grid: SpatialGrid::new(grid_origin, cell_size),
        }
    }

    /// Place one instance and index it under its spawn cell.
    pub fn spawn(&mut self, kind: ResourceKindId, position: Vec3) -> hecs::Entity {
        let entity = self.world.spawn((Position(position), Collectible { kind }));
        self.grid.insert(position, entity);
        entity
    }

    /// Scatter `count_per_kind` instances of every catalog kind uniformly over
    /// `[-extent, extent]²`, resting on the terrain. Overlaps are allowed.
    pub fn populate(
        &mut self,
        catalog: &ResourceCatalog,
        count_per_kind: usize,
        extent: f32,
        terrain: &impl HeightSampler,
        rng: &mut fastrand::Rng,
        presenter: &mut dyn Presenter,
    ) {
        for kind in catalog.iter() {
            for _ in 0..count_per_kind {
                let x = rng.f32() * extent * 2.0 - extent;
                let z = rng.f32() * extent * 2.0 - extent;
                let y = terrain.height_at(x, z) + kind.half_height;
                let position = Vec3::new(x, y, z);
                let entity = self.spawn(kind.id, position);
                presenter.place_object(entity, kind.id, position);
            }
            log::debug!("Spawned {} x {}", count_per_kind, kind.name);
        }
    }

    /// Handles in the 3x3 cell block around `pos`.
    pub fn nearby(&self, pos: Vec3, out: &mut Vec<hecs::Entity>) {
        out.clear();
        self.grid.query_neighbors(pos, |entity| out.push(entity));
    }

    pub fn get(&self, entity: hecs::Entity) -> Option<(ResourceKindId, Vec3)> {
        let position = self.world.get::<&Position>(entity).ok()?.0;
        let kind = self.world.get::<&Collectible>(entity).ok()?.kind;
        Some((kind, position))
    }

    #[cfg(test)]
    pub fn is_live(&self, entity: hecs::Entity) -> bool {
        self.world.contains(entity)
    }

    /// Unindex then destroy. A stale handle is a no-op returning `None`.
    pub fn collect(&mut self, entity: hecs::Entity) -> Option<Collected> {
        let (kind, position) = self.get(entity)?;
        if !self.grid.remove(position, entity) {
            log::warn!("Resource {entity:?} was live but missing from its grid cell");
        }
        // Cannot fail: `get` just found the entity.
        let _ = self.world.despawn(entity);
        Some(Collected {
            entity,
            kind,
            position,
        })
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Copy out every live instance.
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<(hecs::Entity, ResourceKindId, Vec3)> {
        self.world
            .query::<(&Position, &Collectible)>()
            .iter()
            .map(|(entity, (pos, tag))| (entity, tag.kind, pos.0))
            .collect()
    }
}
