use std::collections::BTreeMap;

use glam::Vec3;

use crate::inventory::describe_counts;
use crate::resource::{ResourceCatalog, ResourceKindId};

/// Receives world-object and inventory changes for display.
pub trait Presenter {
    /// A resource instance appeared at `position`.
    fn place_object(&mut self, handle: hecs::Entity, kind: ResourceKindId, position: Vec3);
    /// The instance behind `handle` is gone and should no longer be shown.
    fn remove_object(&mut self, handle: hecs::Entity);
    /// The held count of `kind` changed to `count`.
    fn report_inventory(&mut self, kind: ResourceKindId, count: u32);
}

/// Writes collection events and the running inventory to the log.
pub struct LogPresenter {
    catalog: ResourceCatalog,
    counts: BTreeMap<ResourceKindId, u32>,
    placed: usize,
}

impl LogPresenter {
    pub fn new(catalog: ResourceCatalog) -> Self {
        Self {
            catalog,
            counts: BTreeMap::new(),
            placed: 0,
        }
    }

    /// Instances announced via `place_object` so far.
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn log_inventory(&self) {
        log::info!("Player Inventory:");
        for line in describe_counts(&self.catalog, self.counts.iter().map(|(&k, &n)| (k, n))) {
            log::info!("{line}");
        }
    }
}

impl Presenter for LogPresenter {
    fn place_object(&mut self, handle: hecs::Entity, kind: ResourceKindId, position: Vec3) {
        self.placed += 1;
        log::trace!("Placed {kind} {handle:?} at {position:.2}");
    }

    fn remove_object(&mut self, handle: hecs::Entity) {
        log::trace!("Removed {handle:?}");
    }

    fn report_inventory(&mut self, kind: ResourceKindId, count: u32) {
        self.counts.insert(kind, count);
        let name = self.catalog.name_of(kind).unwrap_or(kind.0);
        log::info!("Collected: {name}! You now have {count} of {name}(s).");
        self.log_inventory();
    }
}

/// Keeps every event for inspection in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub placed: Vec<(hecs::Entity, ResourceKindId, Vec3)>,
    pub removed: Vec<hecs::Entity>,
    pub reports: Vec<(ResourceKindId, u32)>,
}

#[cfg(test)]
impl Presenter for RecordingPresenter {
    fn place_object(&mut self, handle: hecs::Entity, kind: ResourceKindId, position: Vec3) {
        self.placed.push((handle, kind, position));
    }

    fn remove_object(&mut self, handle: hecs::Entity) {
        self.removed.push(handle);
    }

    fn report_inventory(&mut self, kind: ResourceKindId, count: u32) {
        self.reports.push((kind, count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{DEFAULT_KINDS, SOFT_WOOD};

    #[test]
    fn log_presenter_tracks_counts() {
        let mut presenter = LogPresenter::new(ResourceCatalog::new(DEFAULT_KINDS.to_vec()));
        let mut world = hecs::World::new();
        let e = world.spawn(());
        presenter.place_object(e, SOFT_WOOD, Vec3::ZERO);
        presenter.report_inventory(SOFT_WOOD, 1);
        presenter.report_inventory(SOFT_WOOD, 2);
        presenter.remove_object(e);
        assert_eq!(presenter.placed(), 1);
        assert_eq!(presenter.counts.get(&SOFT_WOOD), Some(&2));
    }
}
