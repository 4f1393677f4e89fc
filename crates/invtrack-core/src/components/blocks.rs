//! Grid block components: Block, Inventories, TextPanel, Assembler, etc.

use invtrack_logic::item::ItemRecord;
use serde::{Deserialize, Serialize};

/// Block component - every terminal block on the grid has one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Custom name as shown in the terminal; tags live here
    pub name: String,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.name.contains(tag)
    }
}

/// A single item container (cargo hold, refinery input, reactor fuel slot...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ItemRecord>) -> Self {
        Self { items }
    }

    /// Add a stack, merging into an existing stack of the same item
    pub fn add(&mut self, item: ItemRecord) {
        match self
            .items
            .iter_mut()
            .find(|i| i.subtype_name == item.subtype_name && i.type_name == item.type_name)
        {
            Some(existing) => existing.amount += item.amount,
            None => self.items.push(item),
        }
    }

    /// Remove up to `amount` of an item, returning how much was removed
    pub fn remove(&mut self, subtype: &str, type_name: &str, amount: f64) -> f64 {
        let Some(pos) = self
            .items
            .iter()
            .position(|i| i.subtype_name == subtype && i.type_name == type_name)
        else {
            return 0.0;
        };
        let taken = self.items[pos].amount.min(amount.max(0.0));
        self.items[pos].amount -= taken;
        if self.items[pos].amount <= 0.0 {
            self.items.remove(pos);
        }
        taken
    }

    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Inventories component - blocks with storage carry one or more.
/// Blocks without this component are never inventory sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventories(pub Vec<Inventory>);

impl Inventories {
    /// `count` empty inventories (cargo = 1, refinery/assembler = 2)
    pub fn empty(count: usize) -> Self {
        Self(vec![Inventory::new(); count])
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }
}

/// Text panel component - an LCD that can show public text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPanel {
    /// Public title, written as the first line of every render
    pub title: String,
    /// Panel custom data: the full-dump keyword or a list of item names
    pub custom_data: String,
    /// Text currently on screen
    pub public_text: String,
    /// Whether the screen shows public text (vs. its default content)
    pub show_public_text: bool,
}

impl TextPanel {
    pub fn new(title: impl Into<String>, custom_data: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            custom_data: custom_data.into(),
            ..Self::default()
        }
    }
}

/// Assembler component - production block (order queue not modelled)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assembler {}

/// Programmable block component - holds the script's own config and echo log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgrammableBlock {
    /// Quota declarations, one `<name> <value>` per line
    pub custom_data: String,
    /// Diagnostic lines echoed by the running script
    pub echo: Vec<String>,
}
