use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[cfg(test)]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Overlap test. Boxes that merely touch count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// A box shape placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleDef {
    /// Full box dimensions.
    pub size: Vec3,
    /// Box center.
    pub position: Vec3,
}

impl ObstacleDef {
    pub fn new(size: Vec3, position: Vec3) -> Self {
        Self { size, position }
    }
}

/// Static obstacles, read-only once the world is built. Only the bounds
/// are kept; they are computed once from each definition.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    bounds: Vec<Aabb>,
}

impl ObstacleSet {
    pub fn build(defs: &[ObstacleDef]) -> Self {
        let bounds = defs
            .iter()
            .map(|def| Aabb::from_center(def.position, def.size * 0.5))
            .collect();
        Self { bounds }
    }

    /// True if `volume` touches any obstacle. Linear scan; the set is small.
    pub fn blocks(&self, volume: &Aabb) -> bool {
        self.bounds.iter().any(|b| b.intersects(volume))
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.bounds.iter()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }
}
