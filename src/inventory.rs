use std::collections::BTreeMap;

use crate::resource::{ResourceCatalog, ResourceKindId};

/// Held counts per resource kind. Kinds never collected are absent and read as 0.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    counts: BTreeMap<ResourceKindId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `kind`. Returns the new count.
    pub fn credit(&mut self, kind: ResourceKindId) -> u32 {
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    #[cfg(test)]
    pub fn count(&self, kind: ResourceKindId) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum over all kinds.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKindId, u32)> + '_ {
        self.counts.iter().map(|(&k, &n)| (k, n))
    }

    pub fn describe(&self, catalog: &ResourceCatalog) -> Vec<String> {
        describe_counts(catalog, self.iter())
    }
}

/// Human-readable inventory lines, one per held kind.
pub fn describe_counts(
    catalog: &ResourceCatalog,
    counts: impl Iterator<Item = (ResourceKindId, u32)>,
) -> Vec<String> {
    let lines: Vec<String> = counts
        .map(|(id, n)| match catalog.name_of(id) {
            Some(name) => format!("  {name}: {n}"),
            None => format!("  Unknown Resource ({id}): {n}"),
        })
        .collect();
    if lines.is_empty() {
        vec!["  Empty".to_string()]
    } else {
        lines
    }
}
