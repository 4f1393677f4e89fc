//! Grid generation - populates a grid with containers, panels and assemblers

use invtrack_logic::constants::{keywords, tags};
use invtrack_logic::item::{is_ore_type, ItemRecord};
use rand::Rng;

use super::names::{container_name, random_item, COMPONENT_TYPE};
use crate::grid::Grid;

/// Configuration for grid generation
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub name: String,
    /// Containers carrying the storage tag
    pub tagged_containers: u32,
    /// Containers without any tag
    pub untagged_containers: u32,
    /// Upper bound on distinct stacks per container
    pub max_stacks_per_container: u32,
    /// Filtered panels, each listing a random handful of item names
    pub filtered_panels: u32,
    /// Panels in full-dump mode
    pub full_dump_panels: u32,
    /// Plain assemblers
    pub assemblers: u32,
    /// Whether one extra assembler carries the master tag
    pub tagged_master_assembler: bool,
    /// Programmable block custom data
    pub quota_text: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            name: "Mining Base".to_string(),
            tagged_containers: 6,
            untagged_containers: 3,
            max_stacks_per_container: 8,
            filtered_panels: 2,
            full_dump_panels: 1,
            assemblers: 2,
            tagged_master_assembler: true,
            quota_text: "Iron Ore 100000\nSteelPlate 2500\nGold 500".to_string(),
        }
    }
}

/// Random stack; ore and ingot amounts are fractional kg, components whole
fn random_stack(rng: &mut impl Rng) -> ItemRecord {
    let (subtype, type_id) = random_item(rng);
    let amount = if type_id == COMPONENT_TYPE {
        rng.gen_range(1..500) as f64
    } else {
        // Quarter-kg steps keep sums exact in f64
        rng.gen_range(1..40_000) as f64 * 0.25
    };
    ItemRecord::new(subtype, type_id, amount)
}

/// Generate a grid
pub fn generate_grid(config: &GridConfig, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(config.name.clone()).with_own_config(config.quota_text.clone());

    let total = (config.tagged_containers + config.untagged_containers) as usize;
    let mut seen_names: Vec<String> = Vec::new();

    for i in 0..total {
        let tagged = i < config.tagged_containers as usize;
        let base = container_name(i, rng);
        let name = if tagged {
            format!("{} {}", base, tags::STORAGE)
        } else {
            base
        };
        let entity = grid.add_container(name, 1);

        let stacks = rng.gen_range(0..=config.max_stacks_per_container);
        for _ in 0..stacks {
            let item = random_stack(rng);
            if tagged {
                seen_names.push(item.canonical_name());
            }
            grid.put_items(entity, 0, item);
        }
    }

    for i in 0..config.filtered_panels {
        let mut lines: Vec<String> = (0..rng.gen_range(1..6))
            .filter_map(|_| {
                if seen_names.is_empty() {
                    None
                } else {
                    Some(seen_names[rng.gen_range(0..seen_names.len())].clone())
                }
            })
            .collect();
        // One name that is never stocked
        lines.push("Unobtainium".to_string());
        grid.add_panel(
            format!("LCD Panel {} {}", i + 1, tags::PANEL),
            format!("Watch List {}", i + 1),
            lines.join("\n"),
        );
    }

    for i in 0..config.full_dump_panels {
        grid.add_panel(
            format!("Wide LCD {} {}", i + 1, tags::PANEL),
            format!("Full Inventory {}", i + 1),
            keywords::TRACK_ALL,
        );
    }

    for i in 0..config.assemblers {
        grid.add_assembler(format!("Assembler {}", i + 1));
    }
    if config.tagged_master_assembler {
        grid.add_assembler(format!("Assembler Master {}", tags::ASSEMBLER_MASTER));
    }

    log::debug!(
        "Generated grid {:?}: {} blocks, {} ore stacks tracked",
        config.name,
        grid.block_count(),
        seen_names.iter().filter(|n| n.ends_with(" Ore")).count()
    );

    grid
}

/// Refill every tagged container with fresh random stacks (simulates mining
/// and production between ticks)
pub fn churn_inventories(grid: &mut Grid, rng: &mut impl Rng) {
    use invtrack_logic::config::InventorySelection;
    use invtrack_logic::host::GridHost;

    let inventories = grid.inventories(&InventorySelection::Tagged(tags::STORAGE.to_string()));
    for inv in inventories {
        if rng.gen_bool(0.5) {
            let item = random_stack(rng);
            grid.put_items(inv.entity, inv.index, item);
        } else {
            for stack in grid.stacks(inv) {
                if is_ore_type(&stack.type_name) {
                    grid.take_items(
                        inv.entity,
                        inv.index,
                        &stack.subtype_name,
                        &stack.type_name,
                        stack.amount / 2.0,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invtrack_logic::config::InventorySelection;
    use invtrack_logic::host::GridHost;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_counts() {
        let config = GridConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generate_grid(&config, &mut rng);

        // containers + panels + assemblers + programmable block
        let expected = 6 + 3 + 2 + 1 + 2 + 1 + 1;
        assert_eq!(grid.block_count(), expected);
        assert_eq!(grid.panels(tags::PANEL).len(), 3);
        assert_eq!(grid.assemblers(tags::ASSEMBLER_MASTER).len(), 1);
        assert_eq!(
            grid.inventories(&InventorySelection::Tagged(tags::STORAGE.into()))
                .len(),
            6
        );
        assert_eq!(grid.own_config(), config.quota_text);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let config = GridConfig::default();
        let a = generate_grid(&config, &mut StdRng::seed_from_u64(5));
        let b = generate_grid(&config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.to_records(), b.to_records());
    }

    #[test]
    fn test_no_master_when_disabled() {
        let config = GridConfig {
            tagged_master_assembler: false,
            ..GridConfig::default()
        };
        let grid = generate_grid(&config, &mut StdRng::seed_from_u64(2));
        assert!(grid.assemblers(tags::ASSEMBLER_MASTER).is_empty());
        assert_eq!(grid.all_assemblers().len(), 2);
    }

    #[test]
    fn test_churn_changes_contents() {
        let config = GridConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = generate_grid(&config, &mut rng);
        let before = grid.to_records();
        churn_inventories(&mut grid, &mut rng);
        assert_ne!(grid.to_records(), before);
    }
}
