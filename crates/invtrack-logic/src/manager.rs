//! The inventory manager: one-time discovery, then per-tick aggregation and
//! panel rendering.
//!
//! Construction is the transition to the ready state. `init` discovers
//! inventories, panels, the master assembler and the quota table once; after
//! that, every `tick` rebuilds the counts and rewrites every panel. Nothing
//! carries over between ticks except the latest counts, which are replaced
//! wholesale.

use crate::aggregate::{aggregate_sources, ItemCounts};
use crate::config::{InventorySelection, ManagerConfig};
use crate::display::{DisplayDescriptor, DisplayMode};
use crate::host::GridHost;
use crate::quota::{parse_quotas, QuotaTable};
use crate::render::render;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickSummary {
    /// Distinct canonical item names counted.
    pub distinct_items: usize,
    /// Panels rewritten.
    pub panels_written: usize,
}

pub struct InventoryManager<H: GridHost> {
    config: ManagerConfig,
    inventories: Vec<H::Inventory>,
    displays: Vec<DisplayDescriptor<H::Panel>>,
    master_assembler: Option<H::Assembler>,
    assemblers: Vec<H::Assembler>,
    quotas: QuotaTable,
    counts: ItemCounts,
    ticks: u64,
}

impl<H: GridHost> InventoryManager<H> {
    /// Discover everything the manager works with and become ready.
    pub fn init(host: &mut H, config: ManagerConfig) -> Self {
        let mut manager = Self {
            config,
            inventories: Vec::new(),
            displays: Vec::new(),
            master_assembler: None,
            assemblers: Vec::new(),
            quotas: QuotaTable::new(),
            counts: ItemCounts::new(),
            ticks: 0,
        };

        host.report("Getting inventories...");
        manager.discover_inventories(host);

        if manager.config.use_panels {
            host.report("Getting panels...");
            manager.rediscover_displays(host);
        }

        if manager.config.use_assemblers {
            host.report("Getting assemblers...");
            manager.discover_assemblers(host);
        }

        host.report("Getting quotas...");
        manager.reload_quotas(host);

        log::info!(
            "Inventory manager ready: {} inventories, {} panels, {} quotas, master assembler {}",
            manager.inventories.len(),
            manager.displays.len(),
            manager.quotas.len(),
            if manager.master_assembler.is_some() {
                "found"
            } else {
                "absent"
            }
        );

        manager
    }

    fn discover_inventories(&mut self, host: &mut H) {
        let selection = InventorySelection::from_config(&self.config);
        self.inventories = host.inventories(&selection);
        host.report(&format!("Found {} inventories", self.inventories.len()));
    }

    fn discover_assemblers(&mut self, host: &mut H) {
        let tagged = host.assemblers(&self.config.assembler_tag);
        match tagged.first() {
            Some(&master) => {
                self.master_assembler = Some(master);
                self.assemblers = host.all_assemblers();
                host.report(&format!("Found {} assemblers", self.assemblers.len()));
            }
            None => {
                log::warn!(
                    "No assembler tagged {:?}; order placement disabled",
                    self.config.assembler_tag
                );
                host.report("No tagged assembler found!");
                self.master_assembler = None;
                self.assemblers.clear();
            }
        }
    }

    /// Re-read tagged panels and their modes. Normally only done at init.
    pub fn rediscover_displays(&mut self, host: &mut H) {
        let keyword = &self.config.full_dump_keyword;
        self.displays = host
            .panels(&self.config.panel_tag)
            .into_iter()
            .map(|panel| {
                let mode = DisplayMode::from_config(&host.panel_config(panel), keyword);
                DisplayDescriptor::new(panel, host.panel_title(panel), mode)
            })
            .collect();

        for display in &self.displays {
            host.show_text(display.panel);
        }
        host.report(&format!("Found {} panels", self.displays.len()));
    }

    /// Re-parse the quota table from the host's own configuration text.
    /// Normally only done at init.
    pub fn reload_quotas(&mut self, host: &mut H) {
        let parse = parse_quotas(&host.own_config());
        for rejection in &parse.rejected {
            log::warn!("Quota line {} skipped: {:?}", rejection.line_index, rejection.reason);
            host.report(&rejection.to_string());
        }
        self.quotas = parse.table;
        host.report(&format!("Found {} quotas", self.quotas.len()));
    }

    /// One scheduled update: recount every inventory, rewrite every panel.
    pub fn tick(&mut self, host: &mut H) -> TickSummary {
        self.ticks += 1;

        host.report("Getting item count");
        self.counts = aggregate_sources(host, &self.inventories);
        host.report(&format!("Found {} items", self.counts.len()));

        let mut panels_written = 0;
        if self.config.use_panels {
            host.report("Writing panels");
            for display in &self.displays {
                let text = render(display, &self.counts, &self.quotas);
                host.write_panel_text(display.panel, &text);
                panels_written += 1;
            }
        }

        log::debug!(
            "Tick {}: {} items across {} inventories, {} panels written",
            self.ticks,
            self.counts.len(),
            self.inventories.len(),
            panels_written
        );

        TickSummary {
            distinct_items: self.counts.len(),
            panels_written,
        }
    }

    /// Queue production orders on the master assembler to meet quotas.
    ///
    /// Not implemented: reports that fact and leaves counts, quotas and
    /// panels untouched.
    pub fn place_assembler_orders(&self, host: &mut H) {
        host.report("Place assembler orders not implemented");
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Counts from the most recent tick (empty before the first).
    pub fn counts(&self) -> &ItemCounts {
        &self.counts
    }

    pub fn quotas(&self) -> &QuotaTable {
        &self.quotas
    }

    pub fn displays(&self) -> &[DisplayDescriptor<H::Panel>] {
        &self.displays
    }

    pub fn inventories(&self) -> &[H::Inventory] {
        &self.inventories
    }

    pub fn inventory_count(&self) -> usize {
        self.inventories.len()
    }

    pub fn master_assembler(&self) -> Option<H::Assembler> {
        self.master_assembler
    }

    pub fn assemblers(&self) -> &[H::Assembler] {
        &self.assemblers
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
