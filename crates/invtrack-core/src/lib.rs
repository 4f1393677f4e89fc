//! InvTrack Core - Simulated Grid Host
//!
//! An ECS model of a constructed grid (ship or station) that the inventory
//! manager from `invtrack-logic` can run against without a game attached.
//!
//! # Architecture
//!
//! The grid uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Terminal blocks (containers, panels, assemblers, the programmable block)
//! - **Components**: Capabilities attached to blocks (Inventories, TextPanel, Assembler, etc.)
//! - **Host**: [`grid::Grid`] answers discovery queries per capability and
//!   implements `GridHost`
//!
//! # Example
//!
//! ```rust,no_run
//! use invtrack_core::prelude::*;
//! use invtrack_core::generation::{generate_grid, GridConfig};
//! use invtrack_logic::config::ManagerConfig;
//!
//! let grid = generate_grid(&GridConfig::default(), &mut rand::thread_rng());
//! let mut engine = InventoryEngine::new(grid, ManagerConfig::default());
//!
//! // Run on the host schedule
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod grid;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::InventoryEngine;
    pub use crate::grid::{BlockRecord, Grid, InventoryRef};
}
