//! Manager configuration: feature flags and block tags.
//!
//! Every field has a default, so a partial JSON object (or none at all)
//! deserializes into a working configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{keywords, tags};

/// User-facing switches for what the manager tracks and where it writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Count items in every block with an inventory, not just tagged ones.
    pub track_all: bool,
    /// Write inventory output to tagged text panels.
    pub use_panels: bool,
    /// Look up the master assembler for order placement.
    pub use_assemblers: bool,
    /// Name tag of tracked storage blocks (ignored when `track_all`).
    pub inventory_tag: String,
    /// Name tag of output panels.
    pub panel_tag: String,
    /// Panel custom data that selects full-dump mode.
    pub full_dump_keyword: String,
    /// Name tag of the master assembler.
    pub assembler_tag: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            track_all: false,
            use_panels: true,
            use_assemblers: true,
            inventory_tag: tags::STORAGE.to_string(),
            panel_tag: tags::PANEL.to_string(),
            full_dump_keyword: keywords::TRACK_ALL.to_string(),
            assembler_tag: tags::ASSEMBLER_MASTER.to_string(),
        }
    }
}

/// Which blocks contribute inventories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventorySelection {
    /// Every block on the grid that has an inventory.
    All,
    /// Only blocks whose name contains the tag.
    Tagged(String),
}

impl InventorySelection {
    pub fn from_config(config: &ManagerConfig) -> Self {
        if config.track_all {
            Self::All
        } else {
            Self::Tagged(config.inventory_tag.clone())
        }
    }

    /// Whether a block with this name is selected.
    pub fn matches(&self, block_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tagged(tag) => block_name.contains(tag.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert!(!config.track_all);
        assert!(config.use_panels);
        assert!(config.use_assemblers);
        assert_eq!(config.inventory_tag, "[STO]");
        assert_eq!(config.panel_tag, "[PNL]");
        assert_eq!(config.full_dump_keyword, "TrackAll");
        assert_eq!(config.assembler_tag, "[ASM]");
    }

    #[test]
    fn test_selection_from_flag() {
        let tagged = InventorySelection::from_config(&ManagerConfig::default());
        assert_eq!(tagged, InventorySelection::Tagged("[STO]".into()));

        let all = InventorySelection::from_config(&ManagerConfig {
            track_all: true,
            ..ManagerConfig::default()
        });
        assert_eq!(all, InventorySelection::All);
    }

    #[test]
    fn test_tag_is_substring_match() {
        let sel = InventorySelection::Tagged("[STO]".into());
        assert!(sel.matches("Large Cargo Container [STO]"));
        assert!(sel.matches("[STO] Ore Bin 2"));
        assert!(!sel.matches("Large Cargo Container"));
        assert!(!sel.matches("[sto] lowercase"));
        assert!(InventorySelection::All.matches("anything"));
    }
}
