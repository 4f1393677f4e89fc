//! Inventory aggregation: fold item stacks into per-name totals.
//!
//! Rebuilt from scratch on every tick. There is no incremental update and no
//! identity carried between ticks; a stack that disappears simply stops
//! contributing.

use std::collections::BTreeMap;

use crate::host::GridHost;
use crate::item::{canonical_name, ItemRecord};

/// Canonical item name -> total quantity across all tracked inventories.
///
/// Ordered by name, so every traversal (including full-dump panels) is stable.
pub type ItemCounts = BTreeMap<String, f64>;

/// Add one stack to a running tally.
pub fn add_stack(counts: &mut ItemCounts, item: &ItemRecord) {
    *counts.entry(canonical_name(item)).or_insert(0.0) += item.amount;
}

/// Sum stacks by canonical name.
pub fn aggregate<'a, I>(stacks: I) -> ItemCounts
where
    I: IntoIterator<Item = &'a ItemRecord>,
{
    let mut counts = ItemCounts::new();
    for item in stacks {
        add_stack(&mut counts, item);
    }
    counts
}

/// Read every inventory's current stacks from the host and sum them.
///
/// Inventories are read, never modified. An empty inventory contributes
/// nothing.
pub fn aggregate_sources<H: GridHost>(host: &H, inventories: &[H::Inventory]) -> ItemCounts {
    let mut counts = ItemCounts::new();
    for &inventory in inventories {
        for item in host.stacks(inventory) {
            add_stack(&mut counts, &item);
        }
    }
    counts
}

/// Total quantity across every item name.
pub fn total_quantity(counts: &ItemCounts) -> f64 {
    counts.values().sum()
}
