use std::collections::HashSet;

use glam::Vec3;

use crate::inventory::Inventory;
use crate::present::Presenter;
use crate::resource::ResourceField;

// ---------------------------------------------------------------------------
// Buffers: pre-allocated, reused each interact
// ---------------------------------------------------------------------------

pub struct CollectBuffers {
    candidates: Vec<hecs::Entity>,
    seen: HashSet<hecs::Entity>,
}

impl CollectBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            candidates: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }
}

/// Pick up every live resource strictly within `pickup_radius` (3D) of
/// `player_pos`. Candidates come from the grid's 3x3 neighborhood; each
/// handle is considered at most once per call. Returns how many were taken.
pub fn update(
    field: &mut ResourceField,
    inventory: &mut Inventory,
    player_pos: Vec3,
    pickup_radius: f32,
    bufs: &mut CollectBuffers,
    presenter: &mut dyn Presenter,
) -> usize {
    field.nearby(player_pos, &mut bufs.candidates);
    bufs.seen.clear();

    let radius_sq = pickup_radius * pickup_radius;
    let mut collected = 0;
    for &entity in &bufs.candidates {
        if !bufs.seen.insert(entity) {
            continue;
        }
        let Some((_, pos)) = field.get(entity) else {
            continue;
        };
        if pos.distance_squared(player_pos) >= radius_sq {
            continue;
        }
        let Some(taken) = field.collect(entity) else {
            continue;
        };
        presenter.remove_object(taken.entity);
        let count = inventory.credit(taken.kind);
        presenter.report_inventory(taken.kind, count);
        log::debug!(
            "Picked up {} at {:.2} ({} held)",
            taken.kind,
            taken.position,
            count
        );
        collected += 1;
    }
    collected
}
