//! Pure inventory logic for InvTrack.
//!
//! This crate contains everything that turns raw item stacks into panel
//! text, independent of any game host or engine. Functions take plain data
//! and return results; the one stateful piece, [`manager::InventoryManager`],
//! talks to its host only through the [`host::GridHost`] trait.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`aggregate`] | Fold item stacks into per-name totals |
//! | [`config`] | Feature flags, block tags, inventory selection |
//! | [`constants`] | Default tags, full-dump keyword, ore naming |
//! | [`display`] | Panel descriptors and display modes |
//! | [`host`] | `GridHost` trait: discovery, stacks, panel I/O, diagnostics |
//! | [`item`] | Item stacks and canonical item names |
//! | [`manager`] | Startup discovery and the per-tick update cycle |
//! | [`quota`] | Quota declaration parsing |
//! | [`render`] | Full-dump and filtered panel text |

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod display;
pub mod host;
pub mod item;
pub mod manager;
pub mod quota;
pub mod render;
