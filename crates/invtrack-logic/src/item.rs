//! Item stacks and canonical item naming.
//!
//! The host hands the core snapshots of physical stacks. Every stack is
//! reduced to a canonical name before it is counted: the subtype id, with
//! `" Ore"` appended when the type id denotes an ore. Stone ore and stone
//! gravel share the subtype `Stone`, as do iron ore and iron ingots, so the
//! suffix is what keeps them apart.

use serde::{Deserialize, Serialize};

use crate::constants::items::{ORE_SUFFIX, ORE_TYPE_MARKER};

/// A physical item stack as reported by an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Subtype identifier, e.g. `Iron`, `SteelPlate`.
    pub subtype_name: String,
    /// Type identifier text, e.g. `MyObjectBuilder_Ore`.
    pub type_name: String,
    /// Stack size. Fractional for ores and ingots (kg), whole for components.
    pub amount: f64,
}

impl ItemRecord {
    pub fn new(subtype: impl Into<String>, type_name: impl Into<String>, amount: f64) -> Self {
        Self {
            subtype_name: subtype.into(),
            type_name: type_name.into(),
            amount,
        }
    }

    /// Whether the type id denotes raw ore.
    pub fn is_ore(&self) -> bool {
        is_ore_type(&self.type_name)
    }

    /// Canonical aggregate key for this stack.
    pub fn canonical_name(&self) -> String {
        canonical_name(self)
    }
}

/// Case-insensitive check for the ore marker in a type id.
pub fn is_ore_type(type_name: &str) -> bool {
    type_name.to_lowercase().contains(ORE_TYPE_MARKER)
}

/// Canonical item name: the subtype, plus `" Ore"` for ore types.
pub fn canonical_name(item: &ItemRecord) -> String {
    if item.is_ore() {
        format!("{}{}", item.subtype_name, ORE_SUFFIX)
    } else {
        item.subtype_name.clone()
    }
}
