//! Generation - procedural creation of grids and their contents

mod layout;
mod names;

pub use layout::*;
pub use names::*;
