//! Item catalog and block naming used by grid generation

use rand::Rng;

/// Type id of raw ore stacks
pub const ORE_TYPE: &str = "MyObjectBuilder_Ore";
/// Type id of refined ingot stacks
pub const INGOT_TYPE: &str = "MyObjectBuilder_Ingot";
/// Type id of component stacks
pub const COMPONENT_TYPE: &str = "MyObjectBuilder_Component";

// Sample catalog - subtypes shared between ore and ingot are the interesting case
pub static ORE_SUBTYPES: &[&str] = &[
    "Iron", "Nickel", "Cobalt", "Magnesium", "Silicon", "Silver", "Gold", "Platinum", "Uranium",
    "Stone", "Ice",
];

pub static INGOT_SUBTYPES: &[&str] = &[
    "Iron", "Nickel", "Cobalt", "Magnesium", "Silicon", "Silver", "Gold", "Platinum", "Uranium",
    "Stone",
];

pub static COMPONENT_SUBTYPES: &[&str] = &[
    "SteelPlate",
    "InteriorPlate",
    "Construction",
    "MetalGrid",
    "SmallTube",
    "LargeTube",
    "Motor",
    "Computer",
    "Display",
    "BulletproofGlass",
    "Girder",
    "PowerCell",
];

static CONTAINER_NAMES: &[&str] = &[
    "Large Cargo Container",
    "Small Cargo Container",
    "Medium Cargo Container",
    "Connector",
    "Ore Bin",
    "Component Locker",
];

/// Random container name, numbered to keep names distinct
pub fn container_name(index: usize, rng: &mut impl Rng) -> String {
    let base = CONTAINER_NAMES[rng.gen_range(0..CONTAINER_NAMES.len())];
    format!("{} {}", base, index + 1)
}

/// Pick a random `(subtype, type_id)` from the catalog
pub fn random_item(rng: &mut impl Rng) -> (&'static str, &'static str) {
    match rng.gen_range(0..3) {
        0 => (ORE_SUBTYPES[rng.gen_range(0..ORE_SUBTYPES.len())], ORE_TYPE),
        1 => (INGOT_SUBTYPES[rng.gen_range(0..INGOT_SUBTYPES.len())], INGOT_TYPE),
        _ => (
            COMPONENT_SUBTYPES[rng.gen_range(0..COMPONENT_SUBTYPES.len())],
            COMPONENT_TYPE,
        ),
    }
}
