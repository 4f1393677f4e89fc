//! Host interface: what the manager needs from the grid it runs on.
//!
//! The simulated grid in `invtrack-core` implements this over an ECS world;
//! a real host would implement it over its own block API. Discovery methods
//! return typed handle collections per capability, so the manager never has
//! to downcast a generic block list.

use std::fmt::Debug;

use crate::config::InventorySelection;
use crate::item::ItemRecord;

pub trait GridHost {
    /// Handle to one inventory of one block.
    type Inventory: Copy + Debug;
    /// Handle to a text panel.
    type Panel: Copy + Debug;
    /// Handle to an assembler.
    type Assembler: Copy + Debug;

    /// Inventories of every selected block, in discovery order.
    fn inventories(&self, selection: &InventorySelection) -> Vec<Self::Inventory>;

    /// Snapshot of the stacks currently held by an inventory.
    fn stacks(&self, inventory: Self::Inventory) -> Vec<ItemRecord>;

    /// Text panels whose name contains `tag`.
    fn panels(&self, tag: &str) -> Vec<Self::Panel>;

    fn panel_title(&self, panel: Self::Panel) -> String;

    /// The panel's own configuration text (custom data).
    fn panel_config(&self, panel: Self::Panel) -> String;

    /// Switch the panel to displaying its public text.
    fn show_text(&mut self, panel: Self::Panel);

    /// Replace the panel's public text.
    fn write_panel_text(&mut self, panel: Self::Panel, text: &str);

    /// Assemblers whose name contains `tag`.
    fn assemblers(&self, tag: &str) -> Vec<Self::Assembler>;

    /// Every assembler on the grid.
    fn all_assemblers(&self) -> Vec<Self::Assembler>;

    /// This program's own configuration text (quota declarations).
    fn own_config(&self) -> String;

    /// Diagnostic sink. Fire and forget.
    fn report(&mut self, message: &str);
}
