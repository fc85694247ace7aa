use std::collections::HashMap;

use glam::{Vec2, Vec3};

/// Integer grid coordinates of a cell on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i32,
    pub z: i32,
}

/// Uniform grid over the XZ plane for neighborhood lookups.
///
/// Buckets hold entity handles, not copies. The vertical axis is ignored, so
/// callers run their own precise distance test on the results. A bucket is
/// dropped as soon as it empties.
pub struct SpatialGrid {
    origin: Vec2,
    inv_cell_size: f32,
    buckets: HashMap<CellKey, Vec<hecs::Entity>>,
}

impl SpatialGrid {
    /// `origin` is the world XZ corner that maps to cell (0, 0).
    pub fn new(origin: Vec2, cell_size: f32) -> Self {
        Self {
            origin,
            inv_cell_size: 1.0 / cell_size,
            buckets: HashMap::new(),
        }
    }

    /// Floor-divides the offset from the origin, so a position on a cell
    /// boundary always lands in the cell on its positive side.
    pub fn cell_key(&self, pos: Vec3) -> CellKey {
        CellKey {
            x: ((pos.x - self.origin.x) * self.inv_cell_size).floor() as i32,
            z: ((pos.z - self.origin.y) * self.inv_cell_size).floor() as i32,
        }
    }

    /// Insert an entity at the given position.
    pub fn insert(&mut self, pos: Vec3, entity: hecs::Entity) {
        let key = self.cell_key(pos);
        self.buckets.entry(key).or_default().push(entity);
    }

    /// Remove `entity` from the bucket for `pos`. Returns false if it wasn't there.
    pub fn remove(&mut self, pos: Vec3, entity: hecs::Entity) -> bool {
        let key = self.cell_key(pos);
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(index) = bucket.iter().position(|&e| e == entity) else {
            return false;
        };
        bucket.swap_remove(index);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        true
    }

    /// Query all entities in the same cell and 8 surrounding cells.
    /// Calls `callback` for each entity found; absent cells contribute nothing.
    pub fn query_neighbors(&self, pos: Vec3, mut callback: impl FnMut(hecs::Entity)) {
        let center = self.cell_key(pos);
        for dz in -1i32..=1 {
            for dx in -1i32..=1 {
                let key = CellKey {
                    x: center.x.wrapping_add(dx),
                    z: center.z.wrapping_add(dz),
                };
                if let Some(bucket) = self.buckets.get(&key) {
                    for &entity in bucket {
                        callback(entity);
                    }
                }
            }
        }
    }

    /// Entities bucketed under `key`, empty if the cell holds none.
    #[cfg(test)]
    pub fn bucket(&self, key: CellKey) -> &[hecs::Entity] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total handles across all buckets.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
