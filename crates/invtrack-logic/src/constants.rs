//! Grid constants: default block tags, the full-dump keyword, item naming.
//!
//! These are plain `&str` constants with no host dependency.
//! Both the simulated grid in `invtrack-core` and the simtest harness use them.

pub mod tags {
    /// Blocks whose name contains this tag have their inventories tracked
    /// (unless the manager is configured to track every block).
    pub const STORAGE: &str = "[STO]";
    /// Text panels whose name contains this tag receive inventory output.
    pub const PANEL: &str = "[PNL]";
    /// The first assembler whose name contains this tag is the master.
    pub const ASSEMBLER_MASTER: &str = "[ASM]";
}

pub mod keywords {
    /// Panel custom data consisting of exactly this string selects full-dump mode.
    pub const TRACK_ALL: &str = "TrackAll";
}

pub mod items {
    /// Substring (matched case-insensitively) that marks an item type as ore.
    pub const ORE_TYPE_MARKER: &str = "ore";
    /// Appended to the subtype name of ore stacks so raw ore and the refined
    /// ingot of the same subtype aggregate separately.
    pub const ORE_SUFFIX: &str = " Ore";
}
