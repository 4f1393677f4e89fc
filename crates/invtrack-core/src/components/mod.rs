//! Component definitions for the grid ECS.
//!
//! Components are pure data structs attached to block entities.
//! They have no behavior - discovery and I/O live in [`crate::grid`].

mod blocks;

pub use blocks::*;
